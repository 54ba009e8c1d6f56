use std::str::FromStr;

use dialoguer::{Confirm, Input, Select};

use crate::error::{PlanError, Result};
use crate::models::{ActivityLevel, Gender, Goal, Profile, ProfileInput};
use crate::planner::constants::DEFAULT_MONTHLY_BUDGET;

/// Prompt for a number, re-using the previous value as the default.
fn prompt_number<T>(prompt: &str, default: T) -> Result<T>
where
    T: FromStr + ToString,
{
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?;

    input
        .trim()
        .parse()
        .map_err(|_| PlanError::validation("input", format!("a number for '{}'", prompt)))
}

/// Let the user pick one literal from a table.
fn prompt_choice<T: Copy + PartialEq>(
    prompt: &str,
    table: &[(&'static str, T)],
    default: T,
) -> Result<T> {
    let items: Vec<&str> = table.iter().map(|(name, _)| *name).collect();
    let default_idx = table.iter().position(|(_, v)| *v == default).unwrap_or(0);

    let selection = Select::new()
        .with_prompt(prompt)
        .items(&items)
        .default(default_idx)
        .interact()?;

    Ok(table[selection].1)
}

/// Collect a full profile interactively.
///
/// `current` pre-fills every answer. The result is validated before it is
/// returned.
pub fn prompt_profile(current: Option<&Profile>) -> Result<Profile> {
    let defaults = current.cloned().unwrap_or(Profile {
        age: 30,
        gender: Gender::Female,
        height_cm: 170.0,
        weight_kg: 70.0,
        activity_level: ActivityLevel::Moderate,
        goal: Goal::Maintain,
        monthly_budget: DEFAULT_MONTHLY_BUDGET,
    });

    let age: i64 = prompt_number("Age (years)", i64::from(defaults.age))?;
    let gender = prompt_choice("Gender", &Gender::ALL, defaults.gender)?;
    let height: f64 = prompt_number("Height (cm)", defaults.height_cm)?;
    let weight: f64 = prompt_number("Weight (kg)", defaults.weight_kg)?;
    let activity_level =
        prompt_choice("Activity level", &ActivityLevel::ALL, defaults.activity_level)?;
    let goal = prompt_choice("Goal", &Goal::ALL, defaults.goal)?;
    let monthly_budget: f64 = prompt_number("Monthly food budget", defaults.monthly_budget)?;

    ProfileInput {
        age: Some(age),
        gender: Some(gender.to_string()),
        height: Some(height),
        weight: Some(weight),
        activity_level: Some(activity_level.to_string()),
        goal: Some(goal.to_string()),
        monthly_budget: Some(monthly_budget),
    }
    .into_profile()
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
