use std::fs;
use std::path::Path;

use chrono::Utc;
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use diet_planner::cli::{Cli, Command};
use diet_planner::error::Result;
use diet_planner::interface::{
    display_budget_plan, display_diet_plan, display_food_list, display_plan_history,
    prompt_profile, prompt_yes_no,
};
use diet_planner::models::{BudgetPlan, Catalog, Profile};
use diet_planner::planner::{assemble, assemble_budget};
use diet_planner::state::{
    builtin_catalog, load_catalog, save_catalog, PlanRecord, Screen, Session, SessionStore,
};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise `info`, or `debug` with `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let store = SessionStore::new(&cli.session);
    let mut session = store.load()?;
    let command = cli.command.unwrap_or_default();

    match command {
        Command::Plan { json } => cmd_plan(&cli.catalog, &store, &mut session, json),
        Command::Budget { json } => cmd_budget(&cli.catalog, &store, &mut session, json),
        Command::Profile => cmd_profile(&store, &mut session),
        Command::Login { token } => cmd_login(&store, &mut session, token),
        Command::Logout => store.logout(&mut session),
        Command::Status => {
            cmd_status(&session);
            Ok(())
        }
        Command::Foods { query, export } => cmd_foods(&cli.catalog, query, export),
        Command::History { json } => cmd_history(&session, json),
        Command::Show { file } => cmd_show(&file, &session),
    }
}

/// Load the configured catalog, or the built-in one.
fn resolve_catalog(path: &Option<impl AsRef<Path>>) -> Result<Catalog> {
    match path {
        Some(path) if path.as_ref().exists() => load_catalog(path),
        Some(path) => {
            warn!(
                path = %path.as_ref().display(),
                "catalog file not found, using the built-in catalog"
            );
            Ok(builtin_catalog())
        }
        None => Ok(builtin_catalog()),
    }
}

/// Cached profile, or one collected now and optionally cached.
fn resolve_profile(store: &SessionStore, session: &mut Session) -> Result<Profile> {
    if let Some(profile) = session.profile() {
        return Ok(profile.clone());
    }

    println!("No cached profile. Please enter your details.");
    let profile = prompt_profile(None)?;

    if session.is_logged_in() && prompt_yes_no("Cache this profile in the session?", true)? {
        session.set_profile(profile.clone());
        store.save(session)?;
    }
    Ok(profile)
}

/// Keep a generated plan in the logged-in user's history.
fn save_to_history(store: &SessionStore, session: &mut Session, record: PlanRecord) -> Result<()> {
    if !session.is_logged_in() {
        debug!("not logged in, plan not saved to history");
        return Ok(());
    }
    session.record_plan(record);
    store.save(session)
}

/// Build and display a deterministic diet plan.
fn cmd_plan(
    catalog_path: &Option<impl AsRef<Path>>,
    store: &SessionStore,
    session: &mut Session,
    json: bool,
) -> Result<()> {
    let catalog = resolve_catalog(catalog_path)?;
    let profile = resolve_profile(store, session)?;

    let plan = assemble(&profile, &catalog)?;
    info!(daily_calories = plan.daily_calories, "diet plan assembled");

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        display_diet_plan(&plan);
    }

    let record = PlanRecord::diet(plan, profile.monthly_budget, Utc::now());
    save_to_history(store, session, record)
}

/// Build and display a budget-constrained plan.
fn cmd_budget(
    catalog_path: &Option<impl AsRef<Path>>,
    store: &SessionStore,
    session: &mut Session,
    json: bool,
) -> Result<()> {
    let catalog = resolve_catalog(catalog_path)?;
    let profile = resolve_profile(store, session)?;

    let plan = assemble_budget(&profile, &catalog)?;
    info!(
        total_daily_cost = plan.total_daily_cost,
        "budget plan assembled"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        let summary = plan.summary(None);
        display_budget_plan(&plan, summary.as_ref());
    }

    let record = PlanRecord::budget(plan, profile.monthly_budget, Utc::now());
    save_to_history(store, session, record)
}

/// Collect a profile and cache it for the logged-in user.
fn cmd_profile(store: &SessionStore, session: &mut Session) -> Result<()> {
    session.require_login()?;

    let profile = prompt_profile(session.profile())?;
    session.set_profile(profile);
    store.save(session)?;
    println!("Profile saved.");
    Ok(())
}

fn cmd_login(store: &SessionStore, session: &mut Session, token: String) -> Result<()> {
    session.set_token(token);
    store.save(session)?;
    info!(path = %store.path().display(), "session token stored");
    Ok(())
}

fn cmd_status(session: &Session) {
    match session.initial_screen() {
        Screen::Login => println!("Not logged in. Run 'login --token <TOKEN>'."),
        Screen::ProfileSetup => println!("Logged in. No profile yet; run 'profile'."),
        Screen::Dashboard => {
            if let Ok(profile) = session.require_profile() {
                println!(
                    "Logged in. Profile: {} years, {}, {} cm, {} kg, {}, goal {}, budget {:.2}",
                    profile.age,
                    profile.gender,
                    profile.height_cm,
                    profile.weight_kg,
                    profile.activity_level,
                    profile.goal,
                    profile.monthly_budget
                );
            }
        }
    }
}

fn cmd_foods(
    catalog_path: &Option<impl AsRef<Path>>,
    query: Option<String>,
    export: Option<impl AsRef<Path>>,
) -> Result<()> {
    let catalog = resolve_catalog(catalog_path)?;

    if let Some(path) = export {
        save_catalog(&path, &catalog)?;
        println!("Catalog written to {}", path.as_ref().display());
        return Ok(());
    }

    let query = query.unwrap_or_default();
    let hits = catalog.search(&query);
    let title = if query.is_empty() {
        "Foods".to_string()
    } else {
        format!("Foods matching '{}'", query)
    };
    display_food_list(&hits, &title);
    Ok(())
}

fn cmd_history(session: &Session, json: bool) -> Result<()> {
    session.require_login()?;

    if json {
        println!("{}", serde_json::to_string_pretty(session.history())?);
    } else {
        display_plan_history(session.history());
    }
    Ok(())
}

/// Render a plan produced elsewhere (for example by the generative service).
fn cmd_show(file: &Path, session: &Session) -> Result<()> {
    let content = fs::read_to_string(file)?;
    let plan: BudgetPlan = serde_json::from_str(&content)?;
    let budget = session.profile().map(|p| p.monthly_budget);
    let summary = plan.summary(budget);
    display_budget_plan(&plan, summary.as_ref());
    Ok(())
}
