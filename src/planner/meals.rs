use std::ops::ControlFlow;

use tracing::{debug, trace};

use crate::models::{Catalog, FoodItem, MealAllocation, MealSlot};
use crate::planner::config::PlannerConfig;
use crate::planner::constants::MEAL_SHARES;

/// Running state of a first-fit selection.
#[derive(Debug, Default)]
pub struct Selection<'a> {
    pub foods: Vec<&'a FoodItem>,
    pub calories: f64,
    pub cost: f64,
}

impl<'a> Selection<'a> {
    fn add(&mut self, food: &'a FoodItem, cost: f64) {
        self.calories += food.calories;
        self.cost += cost;
        self.foods.push(food);
    }
}

/// Greedy first-fit over `candidates` in order.
///
/// `cost_of` prices each food; `fits` decides whether a food may join the
/// current selection. Foods that do not fit are skipped, never retried.
/// After each accepted food, selection stops once `done` holds. This is a
/// heuristic: no backtracking and no optimality guarantee.
pub fn first_fit<'a, I, C, F, D>(candidates: I, cost_of: C, fits: F, done: D) -> Selection<'a>
where
    I: IntoIterator<Item = &'a FoodItem>,
    C: Fn(&FoodItem) -> f64,
    F: Fn(&Selection<'a>, &FoodItem, f64) -> bool,
    D: Fn(&Selection<'a>) -> bool,
{
    let outcome = candidates
        .into_iter()
        .try_fold(Selection::default(), |mut selection, food| {
            let cost = cost_of(food);
            if !fits(&selection, food, cost) {
                trace!(food = %food.name, calories = food.calories, "skipped");
                return ControlFlow::Continue(selection);
            }

            trace!(food = %food.name, calories = food.calories, "accepted");
            selection.add(food, cost);
            if done(&selection) {
                ControlFlow::Break(selection)
            } else {
                ControlFlow::Continue(selection)
            }
        });

    match outcome {
        ControlFlow::Break(selection) | ControlFlow::Continue(selection) => selection,
    }
}

/// Pick foods for one slot under a calorie ceiling.
///
/// The summed calories never exceed `target_calories`.
pub fn select_foods<'a>(
    foods: &'a [FoodItem],
    target_calories: f64,
    early_stop_fraction: f64,
) -> Vec<&'a FoodItem> {
    let threshold = target_calories * early_stop_fraction;
    first_fit(
        foods,
        |_| 0.0,
        |sel, food, _| sel.calories + food.calories <= target_calories,
        |sel| sel.calories >= threshold,
    )
    .foods
}

/// Calorie target for a slot share, rounded to whole kcal.
#[inline]
pub fn slot_target(calories: f64, share: f64) -> f64 {
    (calories * share).round()
}

/// Distribute `calories` across the fixed slots and fill each from the catalog.
pub fn allocate_meals(calories: f64, catalog: &Catalog) -> Vec<MealAllocation> {
    allocate_meals_with(calories, catalog, &PlannerConfig::default())
}

pub fn allocate_meals_with(
    calories: f64,
    catalog: &Catalog,
    config: &PlannerConfig,
) -> Vec<MealAllocation> {
    MEAL_SHARES
        .iter()
        .map(|&(slot, share)| allocate_slot(slot, share, calories, catalog, config))
        .collect()
}

fn allocate_slot(
    slot: MealSlot,
    share: f64,
    calories: f64,
    catalog: &Catalog,
    config: &PlannerConfig,
) -> MealAllocation {
    let target_calories = slot_target(calories, share);
    let selected_foods: Vec<FoodItem> =
        select_foods(catalog.foods(slot), target_calories, config.early_stop_fraction)
            .into_iter()
            .cloned()
            .collect();

    debug!(
        %slot,
        target_calories,
        selected = selected_foods.len(),
        "allocated meal slot"
    );

    MealAllocation {
        slot,
        target_calories,
        selected_foods,
    }
}
