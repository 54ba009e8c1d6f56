use crate::models::{BudgetPlan, BudgetSummary, DietPlan, FoodItem, MealSlot};
use crate::state::PlanRecord;

/// Display a deterministic plan: energy figures, macros, then each meal.
pub fn display_diet_plan(plan: &DietPlan) {
    println!();
    println!("=== Diet Plan ===");
    println!();
    println!("BMR:            {:>6.0} kcal", plan.bmr);
    println!("TDEE:           {:>6.0} kcal", plan.tdee);
    println!("Daily target:   {:>6.0} kcal", plan.daily_calories);
    println!();
    println!(
        "Protein {} g | Fat {} g | Carbs {} g",
        plan.macros.protein_grams, plan.macros.fat_grams, plan.macros.carb_grams
    );

    for meal in &plan.meals {
        println!();
        println!(
            "{} ({:.0} kcal target, {:.0} kcal selected)",
            meal.slot.label(),
            meal.target_calories,
            meal.selected_calories()
        );
        if meal.selected_foods.is_empty() {
            println!("  (no catalog foods fit this meal)");
        }
        for food in &meal.selected_foods {
            println!("  - {} of {} ({:.0} kcal)", food.portion, food.name, food.calories);
        }
    }
    println!();
}

/// Display a plan in the generated-plan schema, with its budget summary.
pub fn display_budget_plan(plan: &BudgetPlan, summary: Option<&BudgetSummary>) {
    println!();
    println!("=== Budget Diet Plan ===");
    if let Some(source) = &plan.generated_by {
        println!("(generated by: {})", source);
    }
    println!();
    println!("Calories:   {:.0} kcal", plan.daily_calories);
    println!("Proteins:   {} g", plan.total_proteins);
    println!("Carbs:      {} g", plan.total_carbs);
    println!("Fat:        {} g", plan.total_fat);
    println!("Daily cost: {:.2}", plan.total_daily_cost);

    for meal in &plan.meals {
        println!();
        println!("{} ({:.0} kcal, cost {:.2})", meal.name, meal.calories, meal.cost);
        for food in &meal.foods {
            println!("  - {} of {}", food.portion, food.name);
        }
    }

    if let Some(summary) = summary {
        println!();
        println!("--- Budget ---");
        println!("Monthly budget: {:.2}", summary.monthly_budget);
        println!("Monthly cost:   {:.2}", summary.monthly_cost);
        println!("Savings:        {:.2}", summary.savings);
        println!("Budget used:    {:.0}%", summary.usage_percent);
    }
    println!();
}

/// Display a list of catalog foods with their slot.
pub fn display_food_list(foods: &[(MealSlot, &FoodItem)], title: &str) {
    if foods.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!();
    println!("=== {} ({} items) ===", title, foods.len());
    println!();

    for (slot, food) in foods {
        let price = food
            .price
            .map(|p| format!(", {:.2}", p))
            .unwrap_or_default();
        println!(
            "  [{}] {} - {} kcal per {}{}",
            slot, food.name, food.calories, food.portion, price
        );
    }

    println!();
}

/// Display saved plans, newest first.
pub fn display_plan_history(records: &[PlanRecord]) {
    if records.is_empty() {
        println!("No saved plans yet. Run 'plan' or 'budget' while logged in.");
        return;
    }

    println!();
    println!("=== Recent Plans ===");
    println!();

    for (i, record) in records.iter().enumerate() {
        let cost = record
            .total_cost
            .map(|c| format!(", {:.2}/month", c))
            .unwrap_or_default();
        println!(
            "  {}. {} [{}] {:.0} kcal, budget {:.2}{}",
            i + 1,
            record.created_at.format("%Y-%m-%d %H:%M"),
            record.kind(),
            record.daily_calories(),
            record.monthly_budget,
            cost
        );
    }

    println!();
}
