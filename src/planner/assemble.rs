use tracing::debug;

use crate::error::{PlanError, Result};
use crate::models::{Catalog, DietPlan, Profile, ProfileInput};
use crate::planner::calculations::{
    basal_metabolic_rate, goal_calories, macros, total_daily_expenditure,
};
use crate::planner::config::PlannerConfig;
use crate::planner::meals::allocate_meals_with;

/// Energy figures shared by the plain and budget planners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyTargets {
    pub bmr: f64,
    pub tdee: f64,
    pub daily_calories: f64,
}

/// Validate the profile and run the energy model and goal adjuster.
pub fn energy_targets(profile: &Profile) -> Result<EnergyTargets> {
    profile.validate()?;

    let bmr = basal_metabolic_rate(
        profile.age,
        profile.gender,
        profile.height_cm,
        profile.weight_kg,
    );
    let tdee = total_daily_expenditure(bmr, profile.activity_level);
    let daily_calories = goal_calories(tdee, profile.goal);

    debug!(bmr, tdee, daily_calories, goal = %profile.goal, "energy targets");

    if daily_calories <= 0.0 {
        return Err(PlanError::validation("dailyCalories", "> 0"));
    }

    Ok(EnergyTargets {
        bmr,
        tdee,
        daily_calories,
    })
}

/// Build a diet plan with the default planner settings.
///
/// Pure: identical inputs always produce an identical plan.
pub fn assemble(profile: &Profile, catalog: &Catalog) -> Result<DietPlan> {
    assemble_with(profile, catalog, &PlannerConfig::default())
}

pub fn assemble_with(
    profile: &Profile,
    catalog: &Catalog,
    config: &PlannerConfig,
) -> Result<DietPlan> {
    let targets = energy_targets(profile)?;
    catalog.validate()?;
    let macro_targets = macros(targets.daily_calories, profile.goal);
    let meals = allocate_meals_with(targets.daily_calories, catalog, config);

    Ok(DietPlan {
        daily_calories: targets.daily_calories,
        macros: macro_targets,
        meals,
        bmr: targets.bmr,
        tdee: targets.tdee,
    })
}

/// Build a diet plan from an untyped profile body.
///
/// Unknown enum literals fail with `InvalidArgument` before any work is done.
pub fn assemble_input(input: &ProfileInput, catalog: &Catalog) -> Result<DietPlan> {
    let profile = input.clone().into_profile()?;
    assemble(&profile, catalog)
}
