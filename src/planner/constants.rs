use crate::models::{ActivityLevel, Goal, MealSlot};

// ─────────────────────────────────────────────────────────────────────────────
// Profile bounds
// ─────────────────────────────────────────────────────────────────────────────

pub const AGE_MIN: u32 = 1;
pub const AGE_MAX: u32 = 120;

pub const HEIGHT_MIN_CM: f64 = 100.0;
pub const HEIGHT_MAX_CM: f64 = 250.0;

pub const WEIGHT_MIN_KG: f64 = 30.0;
pub const WEIGHT_MAX_KG: f64 = 200.0;

/// Minimum monthly food budget, in currency units.
pub const MONTHLY_BUDGET_MIN: f64 = 50.0;
/// Budget assumed when a submitted profile omits one.
pub const DEFAULT_MONTHLY_BUDGET: f64 = 300.0;

// ─────────────────────────────────────────────────────────────────────────────
// Mifflin-St Jeor coefficients
// ─────────────────────────────────────────────────────────────────────────────

pub const BMR_WEIGHT_COEF: f64 = 10.0;
pub const BMR_HEIGHT_COEF: f64 = 6.25;
pub const BMR_AGE_COEF: f64 = 5.0;
pub const BMR_MALE_OFFSET: f64 = 5.0;
pub const BMR_FEMALE_OFFSET: f64 = -161.0;

// ─────────────────────────────────────────────────────────────────────────────
// Macronutrient energy density (kcal per gram)
// ─────────────────────────────────────────────────────────────────────────────

pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
pub const KCAL_PER_G_CARB: f64 = 4.0;
pub const KCAL_PER_G_FAT: f64 = 9.0;

// ─────────────────────────────────────────────────────────────────────────────
// Meal allocation
// ─────────────────────────────────────────────────────────────────────────────

/// Fraction of the slot target at which food selection stops early.
pub const EARLY_STOP_FRACTION: f64 = 0.90;

/// Share of food price actually spent per portion.
pub const PORTION_COST_FACTOR: f64 = 0.70;

/// Days used to turn a monthly budget into a daily one.
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Fraction of the daily budget a single food may cost to count as affordable.
pub const AFFORDABLE_DAILY_FRACTION: f64 = 1.0 / 3.0;

/// Number of cheapest foods used when nothing is affordable.
pub const CHEAPEST_FALLBACK_COUNT: usize = 5;

/// Slot order and calorie shares. Shares sum to exactly 1.0.
pub const MEAL_SHARES: [(MealSlot, f64); 4] = [
    (MealSlot::Breakfast, 0.25),
    (MealSlot::Lunch, 0.35),
    (MealSlot::Dinner, 0.25),
    (MealSlot::Snack, 0.15),
];

/// TDEE multiplier for an activity level.
pub fn activity_multiplier(level: ActivityLevel) -> f64 {
    match level {
        ActivityLevel::Sedentary => 1.20,
        ActivityLevel::Light => 1.375,
        ActivityLevel::Moderate => 1.55,
        ActivityLevel::Active => 1.725,
        ActivityLevel::VeryActive => 1.90,
    }
}

/// Daily calorie delta applied on top of TDEE.
pub fn goal_delta(goal: Goal) -> f64 {
    match goal {
        Goal::WeightLoss => -500.0,
        Goal::Maintain => 0.0,
        Goal::GainMuscle => 300.0,
    }
}

/// Protein/fat/carb calorie ratios for a goal.
pub fn macro_ratios(goal: Goal) -> (f64, f64, f64) {
    match goal {
        Goal::WeightLoss => (0.35, 0.25, 0.40),
        Goal::GainMuscle => (0.40, 0.25, 0.35),
        Goal::Maintain => (0.30, 0.25, 0.45),
    }
}
