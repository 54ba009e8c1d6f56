use tracing::{debug, warn};

use crate::error::Result;
use crate::models::{BudgetMeal, BudgetPlan, Catalog, FoodItem, MealSlot, PlannedFood, Profile};
use crate::planner::assemble::energy_targets;
use crate::planner::config::PlannerConfig;
use crate::planner::constants::*;
use crate::planner::meals::{first_fit, slot_target};

/// Label recorded on plans produced by this planner.
pub const GENERATED_BY: &str = "deterministic";

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Foods a day's budget can afford, per slot, in catalog order.
///
/// A food is affordable when it costs at most a third of the daily budget.
/// When nothing qualifies, the cheapest foods across the whole catalog are
/// used instead.
fn affordable_foods(catalog: &Catalog, daily_budget: f64) -> Vec<(MealSlot, &FoodItem)> {
    let limit = daily_budget * AFFORDABLE_DAILY_FRACTION;
    let affordable: Vec<(MealSlot, &FoodItem)> = catalog
        .iter()
        .filter(|(_, f)| f.unit_price() <= limit)
        .collect();

    if !affordable.is_empty() || catalog.is_empty() {
        return affordable;
    }

    warn!(
        daily_budget,
        "no food within the daily budget, falling back to the cheapest {}",
        CHEAPEST_FALLBACK_COUNT
    );

    let mut indexed: Vec<(usize, (MealSlot, &FoodItem))> = catalog.iter().enumerate().collect();
    // Stable sort: equal prices keep catalog order.
    indexed.sort_by(|a, b| {
        a.1.1
            .unit_price()
            .partial_cmp(&b.1.1.unit_price())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    indexed.truncate(CHEAPEST_FALLBACK_COUNT);
    indexed.sort_by_key(|(idx, _)| *idx);
    indexed.into_iter().map(|(_, entry)| entry).collect()
}

/// Build a budget-constrained plan with the default planner settings.
pub fn assemble_budget(profile: &Profile, catalog: &Catalog) -> Result<BudgetPlan> {
    assemble_budget_with(profile, catalog, &PlannerConfig::default())
}

/// Build a budget-constrained plan.
///
/// Each slot gets its calorie share and the same share of the daily budget.
/// Foods are taken first-fit in catalog order while both the calorie target
/// and the slot budget hold.
pub fn assemble_budget_with(
    profile: &Profile,
    catalog: &Catalog,
    config: &PlannerConfig,
) -> Result<BudgetPlan> {
    let targets = energy_targets(profile)?;
    catalog.validate()?;

    let daily_budget = profile.monthly_budget / DAYS_PER_MONTH;
    let affordable = affordable_foods(catalog, daily_budget);

    let mut meals = Vec::with_capacity(MEAL_SHARES.len());
    let (mut proteins, mut carbs, mut fat) = (0.0, 0.0, 0.0);

    for &(slot, share) in MEAL_SHARES.iter() {
        let meal_calories = slot_target(targets.daily_calories, share);
        let slot_budget = daily_budget * share;
        let threshold = meal_calories * config.early_stop_fraction;

        let candidates = affordable
            .iter()
            .filter(|(s, f)| *s == slot && f.unit_price() <= slot_budget)
            .map(|(_, f)| *f);

        let selection = first_fit(
            candidates,
            |food| food.unit_price() * config.portion_cost_factor,
            |sel, food, cost| {
                sel.calories + food.calories <= meal_calories && sel.cost + cost <= slot_budget
            },
            |sel| sel.calories >= threshold,
        );

        for food in &selection.foods {
            proteins += food.protein.unwrap_or(0.0);
            carbs += food.carbs.unwrap_or(0.0);
            fat += food.fat.unwrap_or(0.0);
        }

        debug!(
            %slot,
            meal_calories,
            slot_budget,
            cost = selection.cost,
            selected = selection.foods.len(),
            "allocated budget meal"
        );

        meals.push(BudgetMeal {
            name: slot.label().to_string(),
            calories: meal_calories,
            foods: selection.foods.iter().map(|f| PlannedFood::from(*f)).collect(),
            cost: round_to(selection.cost, 2),
        });
    }

    let total_daily_cost = round_to(meals.iter().map(|m| m.cost).sum(), 2);

    Ok(BudgetPlan {
        daily_calories: targets.daily_calories,
        total_proteins: round_to(proteins, 1),
        total_carbs: round_to(carbs, 1),
        total_fat: round_to(fat, 1),
        total_daily_cost,
        meals,
        daily_budget: Some(round_to(daily_budget, 2)),
        monthly_budget: Some(profile.monthly_budget),
        generated_by: Some(GENERATED_BY.to_string()),
    })
}
