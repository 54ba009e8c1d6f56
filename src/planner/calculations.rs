use crate::models::{ActivityLevel, Gender, Goal, MacroTargets};
use crate::planner::constants::*;

/// Basal metabolic rate (kcal/day) by the Mifflin-St Jeor equation.
///
/// Male: `10w + 6.25h - 5a + 5`. Female: `10w + 6.25h - 5a - 161`.
pub fn basal_metabolic_rate(age: u32, gender: Gender, height_cm: f64, weight_kg: f64) -> f64 {
    let offset = match gender {
        Gender::Male => BMR_MALE_OFFSET,
        Gender::Female => BMR_FEMALE_OFFSET,
    };
    BMR_WEIGHT_COEF * weight_kg + BMR_HEIGHT_COEF * height_cm - BMR_AGE_COEF * age as f64 + offset
}

/// Total daily energy expenditure: BMR scaled by the activity factor.
pub fn total_daily_expenditure(bmr: f64, activity_level: ActivityLevel) -> f64 {
    bmr * activity_multiplier(activity_level)
}

/// Daily calorie target for a goal.
pub fn goal_calories(tdee: f64, goal: Goal) -> f64 {
    tdee + goal_delta(goal)
}

/// Split a calorie budget into gram targets.
///
/// Each gram value is rounded on its own, so the implied calories can drift
/// from `calories` by a few kcal. Non-positive budgets yield zero grams.
pub fn macros(calories: f64, goal: Goal) -> MacroTargets {
    let (protein_ratio, fat_ratio, carb_ratio) = macro_ratios(goal);
    let grams = |ratio: f64, kcal_per_gram: f64| -> u32 {
        ((calories * ratio) / kcal_per_gram).round().max(0.0) as u32
    };

    MacroTargets {
        protein_grams: grams(protein_ratio, KCAL_PER_G_PROTEIN),
        fat_grams: grams(fat_ratio, KCAL_PER_G_FAT),
        carb_grams: grams(carb_ratio, KCAL_PER_G_CARB),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::*;

    #[test]
    fn test_bmr_male() {
        let bmr = basal_metabolic_rate(30, Gender::Male, 180.0, 80.0);
        assert_float_absolute_eq!(bmr, 1880.0, 1e-9);
    }

    #[test]
    fn test_bmr_female() {
        // 10*60 + 6.25*165 - 5*25 - 161 = 1345.25
        let bmr = basal_metabolic_rate(25, Gender::Female, 165.0, 60.0);
        assert_float_absolute_eq!(bmr, 1345.25, 1e-9);
    }

    #[test]
    fn test_tdee_multipliers() {
        assert_float_absolute_eq!(total_daily_expenditure(1000.0, ActivityLevel::Sedentary), 1200.0, 1e-9);
        assert_float_absolute_eq!(total_daily_expenditure(1000.0, ActivityLevel::Light), 1375.0, 1e-9);
        assert_float_absolute_eq!(total_daily_expenditure(1000.0, ActivityLevel::Moderate), 1550.0, 1e-9);
        assert_float_absolute_eq!(total_daily_expenditure(1000.0, ActivityLevel::Active), 1725.0, 1e-9);
        assert_float_absolute_eq!(total_daily_expenditure(1000.0, ActivityLevel::VeryActive), 1900.0, 1e-9);
    }

    #[test]
    fn test_goal_calories() {
        assert_eq!(goal_calories(2914.0, Goal::Maintain), 2914.0);
        assert_eq!(goal_calories(2914.0, Goal::WeightLoss), 2414.0);
        assert_eq!(goal_calories(2914.0, Goal::GainMuscle), 3214.0);
    }

    #[test]
    fn test_maintain_is_identity_for_odd_values() {
        let tdee = 1880.0 * 1.55;
        assert_eq!(goal_calories(tdee, Goal::Maintain), tdee);
    }

    #[test]
    fn test_macros_weight_loss() {
        let m = macros(2414.0, Goal::WeightLoss);
        assert_eq!(m.protein_grams, 211);
        assert_eq!(m.fat_grams, 67);
        assert_eq!(m.carb_grams, 241);
    }

    #[test]
    fn test_macros_gain_and_maintain() {
        let gain = macros(3000.0, Goal::GainMuscle);
        assert_eq!((gain.protein_grams, gain.fat_grams, gain.carb_grams), (300, 83, 263));

        let maintain = macros(2000.0, Goal::Maintain);
        assert_eq!(
            (maintain.protein_grams, maintain.fat_grams, maintain.carb_grams),
            (150, 56, 225)
        );
    }

    #[test]
    fn test_macros_within_tolerance() {
        for calories in [1200.0, 1733.0, 2414.0, 3591.5] {
            for (_, goal) in Goal::ALL {
                let m = macros(calories, goal);
                let drift = (m.calories() - calories).abs();
                assert!(drift <= calories * 0.02, "{goal} at {calories}: drift {drift}");
            }
        }
    }

    #[test]
    fn test_macros_negative_budget_is_zero() {
        let m = macros(-250.0, Goal::WeightLoss);
        assert_eq!(m.calories(), 0.0);
    }
}
