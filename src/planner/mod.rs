pub mod assemble;
pub mod budget;
pub mod calculations;
pub mod config;
pub mod constants;
pub mod meals;

pub use assemble::{assemble, assemble_input, assemble_with, energy_targets, EnergyTargets};
pub use budget::{assemble_budget, assemble_budget_with};
pub use calculations::{basal_metabolic_rate, goal_calories, macros, total_daily_expenditure};
pub use config::PlannerConfig;
pub use constants::*;
pub use meals::{allocate_meals, allocate_meals_with, first_fit, select_foods, Selection};
