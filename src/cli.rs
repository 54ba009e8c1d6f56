use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Diet planner: calorie targets, macro splits and meal allocation from a profile.
#[derive(Parser, Debug)]
#[command(name = "diet_planner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Food catalog file (.json or .csv). Uses the built-in catalog when unset.
    #[arg(short, long, env = "DIET_CATALOG", global = true)]
    pub catalog: Option<PathBuf>,

    /// Session file holding the bearer token, cached profile and plan history.
    #[arg(
        short,
        long,
        env = "DIET_SESSION",
        default_value = "diet_session.json",
        global = true
    )]
    pub session: PathBuf,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a diet plan from the cached profile.
    Plan {
        /// Print the plan as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Build a budget-constrained plan and show the monthly spend.
    Budget {
        /// Print the plan as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Enter (or edit) the profile and cache it in the session.
    Profile,

    /// Store the bearer token returned by the account service.
    Login {
        /// Opaque bearer token.
        #[arg(long)]
        token: String,
    },

    /// Clear the session.
    Logout,

    /// Show which screen the session would open on.
    Status,

    /// Search the food catalog.
    Foods {
        /// Case-insensitive name fragment; lists the first foods when omitted.
        query: Option<String>,

        /// Write the whole catalog as JSON to this path.
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// List the most recent plans saved in the session.
    History {
        /// Print the records as JSON instead of a list.
        #[arg(long)]
        json: bool,
    },

    /// Render a plan document in the generated-plan JSON schema.
    Show {
        /// Plan JSON file.
        file: PathBuf,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Plan { json: false }
    }
}
