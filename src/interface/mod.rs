pub mod prompts;
pub mod render;

pub use prompts::{prompt_profile, prompt_yes_no};
pub use render::{
    display_budget_plan, display_diet_plan, display_food_list, display_plan_history,
};
