use serde::{Deserialize, Serialize};

use crate::models::{FoodItem, MealSlot};
use crate::planner::constants::DAYS_PER_MONTH;

/// Daily macronutrient targets in whole grams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroTargets {
    pub protein_grams: u32,
    pub fat_grams: u32,
    pub carb_grams: u32,
}

impl MacroTargets {
    /// Calories implied by the gram targets.
    pub fn calories(&self) -> f64 {
        use crate::planner::constants::{KCAL_PER_G_CARB, KCAL_PER_G_FAT, KCAL_PER_G_PROTEIN};

        self.protein_grams as f64 * KCAL_PER_G_PROTEIN
            + self.carb_grams as f64 * KCAL_PER_G_CARB
            + self.fat_grams as f64 * KCAL_PER_G_FAT
    }
}

/// One meal slot's calorie target and the foods chosen for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealAllocation {
    pub slot: MealSlot,
    pub target_calories: f64,
    pub selected_foods: Vec<FoodItem>,
}

impl MealAllocation {
    /// Sum of the selected foods' calories.
    pub fn selected_calories(&self) -> f64 {
        self.selected_foods.iter().map(|f| f.calories).sum()
    }
}

/// The assembled deterministic plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietPlan {
    pub daily_calories: f64,
    pub macros: MacroTargets,
    pub meals: Vec<MealAllocation>,
    pub bmr: f64,
    pub tdee: f64,
}

/// A food as listed in a generated plan: name and portion only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedFood {
    pub name: String,
    pub portion: String,
}

impl From<&FoodItem> for PlannedFood {
    fn from(food: &FoodItem) -> Self {
        Self {
            name: food.name.clone(),
            portion: food.portion.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetMeal {
    pub name: String,
    pub calories: f64,
    pub foods: Vec<PlannedFood>,
    #[serde(default)]
    pub cost: f64,
}

/// A budget-aware plan in the generative plan schema.
///
/// Budget fields and `generated_by` are optional so documents produced by
/// the external generator deserialize as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetPlan {
    pub daily_calories: f64,
    pub total_proteins: f64,
    pub total_carbs: f64,
    pub total_fat: f64,
    pub total_daily_cost: f64,
    pub meals: Vec<BudgetMeal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_budget: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_budget: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_by: Option<String>,
}

/// Monthly spend derived from a plan's daily cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetSummary {
    pub monthly_budget: f64,
    pub monthly_cost: f64,
    pub savings: f64,
    pub usage_percent: f64,
}

impl BudgetSummary {
    pub fn new(monthly_budget: f64, daily_cost: f64) -> Self {
        let monthly_cost = daily_cost * DAYS_PER_MONTH;
        let usage_percent = if monthly_budget > 0.0 {
            (monthly_cost / monthly_budget * 100.0).min(100.0)
        } else {
            100.0
        };
        Self {
            monthly_budget,
            monthly_cost,
            savings: (monthly_budget - monthly_cost).max(0.0),
            usage_percent,
        }
    }
}

impl BudgetPlan {
    /// Spend summary against `monthly_budget`, or the plan's own budget.
    pub fn summary(&self, monthly_budget: Option<f64>) -> Option<BudgetSummary> {
        monthly_budget
            .or(self.monthly_budget)
            .map(|budget| BudgetSummary::new(budget, self.total_daily_cost))
    }
}
