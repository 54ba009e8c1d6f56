mod food;
mod plan;
mod profile;

pub use food::{Catalog, FoodItem, MealSlot};
pub use plan::{
    BudgetMeal, BudgetPlan, BudgetSummary, DietPlan, MacroTargets, MealAllocation, PlannedFood,
};
pub use profile::{ActivityLevel, Gender, Goal, Profile, ProfileInput};
