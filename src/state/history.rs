use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{BudgetPlan, DietPlan};
use crate::planner::constants::DAYS_PER_MONTH;

/// Number of generated plans a session keeps.
pub const HISTORY_LIMIT: usize = 5;

/// Either kind of generated plan, tagged in the session file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SavedPlan {
    Diet(DietPlan),
    Budget(BudgetPlan),
}

/// A generated plan with the budget it was built against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRecord {
    pub created_at: DateTime<Utc>,
    pub monthly_budget: f64,
    /// Monthly cost; only budget plans carry prices.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<f64>,
    pub plan: SavedPlan,
}

impl PlanRecord {
    pub fn diet(plan: DietPlan, monthly_budget: f64, created_at: DateTime<Utc>) -> Self {
        Self {
            created_at,
            monthly_budget,
            total_cost: None,
            plan: SavedPlan::Diet(plan),
        }
    }

    pub fn budget(plan: BudgetPlan, monthly_budget: f64, created_at: DateTime<Utc>) -> Self {
        Self {
            created_at,
            monthly_budget,
            total_cost: Some(plan.total_daily_cost * DAYS_PER_MONTH),
            plan: SavedPlan::Budget(plan),
        }
    }

    pub fn daily_calories(&self) -> f64 {
        match &self.plan {
            SavedPlan::Diet(plan) => plan.daily_calories,
            SavedPlan::Budget(plan) => plan.daily_calories,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self.plan {
            SavedPlan::Diet(_) => "diet",
            SavedPlan::Budget(_) => "budget",
        }
    }
}

/// Insert `record` as the newest entry and drop anything past the limit.
pub(crate) fn push_bounded(history: &mut Vec<PlanRecord>, record: PlanRecord) {
    history.insert(0, record);
    history.truncate(HISTORY_LIMIT);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn budget_plan(daily_cost: f64) -> BudgetPlan {
        BudgetPlan {
            daily_calories: 2000.0,
            total_proteins: 0.0,
            total_carbs: 0.0,
            total_fat: 0.0,
            total_daily_cost: daily_cost,
            meals: Vec::new(),
            daily_budget: None,
            monthly_budget: None,
            generated_by: None,
        }
    }

    #[test]
    fn test_budget_record_carries_monthly_cost() {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
        let record = PlanRecord::budget(budget_plan(4.0), 300.0, at);
        assert_eq!(record.total_cost, Some(120.0));
        assert_eq!(record.kind(), "budget");
        assert_eq!(record.daily_calories(), 2000.0);
    }

    #[test]
    fn test_record_json_is_tagged() {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
        let record = PlanRecord::budget(budget_plan(4.0), 300.0, at);
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["plan"]["kind"], "budget");
        assert!(value["plan"].get("total_daily_cost").is_some());

        let parsed: PlanRecord = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_push_bounded_keeps_newest_first() {
        let mut history = Vec::new();
        for day in 1..=7 {
            let at = Utc.with_ymd_and_hms(2026, 3, day, 8, 0, 0).unwrap();
            push_bounded(&mut history, PlanRecord::budget(budget_plan(day as f64), 300.0, at));
        }
        assert_eq!(history.len(), HISTORY_LIMIT);
        let days: Vec<u32> = history
            .iter()
            .map(|r| chrono::Datelike::day(&r.created_at))
            .collect();
        assert_eq!(days, vec![7, 6, 5, 4, 3]);
    }
}
