use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;

use crate::error::{PlanError, Result};
use crate::planner::constants::{
    AGE_MAX, AGE_MIN, DEFAULT_MONTHLY_BUDGET, HEIGHT_MAX_CM, HEIGHT_MIN_CM, MONTHLY_BUDGET_MIN,
    WEIGHT_MAX_KG, WEIGHT_MIN_KG,
};

/// Minimum similarity for a known literal to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Match `value` exactly against a table of known literals.
///
/// On a miss, the closest literal (if similar enough) is attached to the error.
fn parse_literal<T: Copy>(
    field: &'static str,
    value: &str,
    table: &[(&'static str, T)],
) -> Result<T> {
    if let Some((_, v)) = table.iter().find(|(name, _)| *name == value) {
        return Ok(*v);
    }

    let lowered = value.to_lowercase();
    let suggestion = table
        .iter()
        .map(|(name, _)| (*name, jaro_winkler(name, &lowered)))
        .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(name, _)| name);

    Err(PlanError::InvalidArgument {
        field,
        value: value.to_string(),
        suggestion,
    })
}

/// Biological sex used by the Mifflin-St Jeor equation.
///
/// Only the two categories the equation defines are supported; callers map
/// any other representation before building a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [(&'static str, Gender); 2] = [("male", Gender::Male), ("female", Gender::Female)];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl FromStr for Gender {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self> {
        parse_literal("gender", s, &Gender::ALL)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub const ALL: [(&'static str, ActivityLevel); 5] = [
        ("sedentary", ActivityLevel::Sedentary),
        ("light", ActivityLevel::Light),
        ("moderate", ActivityLevel::Moderate),
        ("active", ActivityLevel::Active),
        ("very_active", ActivityLevel::VeryActive),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self> {
        parse_literal("activityLevel", s, &ActivityLevel::ALL)
    }
}

/// Caloric goal driving the calorie delta and macro ratios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    WeightLoss,
    Maintain,
    GainMuscle,
}

impl Goal {
    pub const ALL: [(&'static str, Goal); 3] = [
        ("weight_loss", Goal::WeightLoss),
        ("maintain", Goal::Maintain),
        ("gain_muscle", Goal::GainMuscle),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::WeightLoss => "weight_loss",
            Goal::Maintain => "maintain",
            Goal::GainMuscle => "gain_muscle",
        }
    }
}

impl FromStr for Goal {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self> {
        parse_literal("goal", s, &Goal::ALL)
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(Gender, ActivityLevel, Goal);

/// Anthropometric profile for one planning request.
///
/// Field names follow the JSON body the account service stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub age: u32,
    pub gender: Gender,
    #[serde(rename = "height")]
    pub height_cm: f64,
    #[serde(rename = "weight")]
    pub weight_kg: f64,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
    #[serde(rename = "monthly_budget")]
    pub monthly_budget: f64,
}

fn age_error() -> PlanError {
    PlanError::validation("age", format!("between {} and {} years", AGE_MIN, AGE_MAX))
}

/// Check that `value` is finite and inside `[min, max]`.
fn check_range(field: &'static str, value: f64, min: f64, max: f64, unit: &str) -> Result<()> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(PlanError::validation(
            field,
            format!("between {} and {} {}", min, max, unit),
        ))
    }
}

impl Profile {
    /// Validate every numeric field against its bound.
    ///
    /// Fails on the first offending field, in declaration order.
    pub fn validate(&self) -> Result<()> {
        if !(AGE_MIN..=AGE_MAX).contains(&self.age) {
            return Err(age_error());
        }
        check_range("heightCm", self.height_cm, HEIGHT_MIN_CM, HEIGHT_MAX_CM, "cm")?;
        check_range("weightKg", self.weight_kg, WEIGHT_MIN_KG, WEIGHT_MAX_KG, "kg")?;
        if !(self.monthly_budget.is_finite() && self.monthly_budget >= MONTHLY_BUDGET_MIN) {
            return Err(PlanError::validation(
                "monthlyBudget",
                format!("at least {}", MONTHLY_BUDGET_MIN),
            ));
        }
        Ok(())
    }
}

/// Untyped profile as submitted by a form or JSON body.
///
/// Enum fields are kept as raw strings so unknown literals surface as
/// `InvalidArgument` rather than a deserialization failure. Every field is
/// optional at this stage; absent fields are reported by `into_profile`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInput {
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub activity_level: Option<String>,
    pub goal: Option<String>,
    /// Falls back to `DEFAULT_MONTHLY_BUDGET` when absent.
    #[serde(rename = "monthly_budget")]
    pub monthly_budget: Option<f64>,
}

fn required<T>(field: &'static str, value: Option<T>) -> Result<T> {
    value.ok_or_else(|| PlanError::validation(field, "present"))
}

impl ProfileInput {
    /// Check presence, map enum literals and validate ranges.
    ///
    /// Missing fields are reported first, in body order.
    pub fn into_profile(self) -> Result<Profile> {
        let age = required("age", self.age)?;
        let gender = required("gender", self.gender)?;
        let height_cm = required("heightCm", self.height)?;
        let weight_kg = required("weightKg", self.weight)?;
        let activity_level = required("activityLevel", self.activity_level)?;
        let goal = required("goal", self.goal)?;

        let profile = Profile {
            age: u32::try_from(age).map_err(|_| age_error())?,
            gender: gender.parse()?,
            height_cm,
            weight_kg,
            activity_level: activity_level.parse()?,
            goal: goal.parse()?,
            monthly_budget: self.monthly_budget.unwrap_or(DEFAULT_MONTHLY_BUDGET),
        };
        profile.validate()?;
        Ok(profile)
    }
}

impl From<&Profile> for ProfileInput {
    fn from(profile: &Profile) -> Self {
        Self {
            age: Some(profile.age as i64),
            gender: Some(profile.gender.to_string()),
            height: Some(profile.height_cm),
            weight: Some(profile.weight_kg),
            activity_level: Some(profile.activity_level.to_string()),
            goal: Some(profile.goal.to_string()),
            monthly_budget: Some(profile.monthly_budget),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> ProfileInput {
        ProfileInput {
            age: Some(30),
            gender: Some("male".to_string()),
            height: Some(180.0),
            weight: Some(80.0),
            activity_level: Some("moderate".to_string()),
            goal: Some("weight_loss".to_string()),
            monthly_budget: Some(300.0),
        }
    }

    #[test]
    fn test_parse_known_literals() {
        assert_eq!("very_active".parse::<ActivityLevel>().unwrap(), ActivityLevel::VeryActive);
        assert_eq!("female".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!("gain_muscle".parse::<Goal>().unwrap(), Goal::GainMuscle);
    }

    #[test]
    fn test_literals_are_case_sensitive() {
        assert!("Male".parse::<Gender>().is_err());
    }

    #[test]
    fn test_unknown_goal_is_invalid_argument() {
        let err = "bulk".parse::<Goal>().unwrap_err();
        match err {
            PlanError::InvalidArgument { field, value, suggestion } => {
                assert_eq!(field, "goal");
                assert_eq!(value, "bulk");
                assert!(suggestion.is_none());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_near_miss_gets_suggestion() {
        let err = "moderat".parse::<ActivityLevel>().unwrap_err();
        match err {
            PlanError::InvalidArgument { suggestion, .. } => {
                assert_eq!(suggestion, Some("moderate"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_profile_json_field_names() {
        let json = r#"{"age": 30, "gender": "male", "height": 180, "weight": 80,
            "activityLevel": "moderate", "goal": "weight_loss", "monthly_budget": 300}"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.activity_level, ActivityLevel::Moderate);
        assert_eq!(profile.height_cm, 180.0);
        assert_eq!(profile.monthly_budget, 300.0);
    }

    #[test]
    fn test_into_profile() {
        let profile = sample_input().into_profile().unwrap();
        assert_eq!(profile.goal, Goal::WeightLoss);
        assert_eq!(profile.age, 30);
    }

    #[test]
    fn test_into_profile_rejects_unknown_activity() {
        let mut input = sample_input();
        input.activity_level = Some("couch".to_string());
        assert!(matches!(
            input.into_profile(),
            Err(PlanError::InvalidArgument { field: "activityLevel", .. })
        ));
    }

    #[test]
    fn test_into_profile_rejects_negative_age() {
        let mut input = sample_input();
        input.age = Some(-4);
        assert!(matches!(
            input.into_profile(),
            Err(PlanError::Validation { field: "age", .. })
        ));
    }

    #[test]
    fn test_input_roundtrip_from_profile() {
        let profile = sample_input().into_profile().unwrap();
        let again = ProfileInput::from(&profile).into_profile().unwrap();
        assert_eq!(profile, again);
    }

    #[test]
    fn test_missing_field_is_validation_error() {
        let json = r#"{"age": 30, "gender": "male", "height": 180, "weight": 80,
            "activityLevel": "moderate", "monthly_budget": 300}"#;
        let input: ProfileInput = serde_json::from_str(json).unwrap();
        match input.into_profile() {
            Err(PlanError::Validation { field, bound }) => {
                assert_eq!(field, "goal");
                assert_eq!(bound, "present");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_fields_reported_in_body_order() {
        let input: ProfileInput = serde_json::from_str(r#"{"goal": "maintain"}"#).unwrap();
        assert!(matches!(
            input.into_profile(),
            Err(PlanError::Validation { field: "age", .. })
        ));
    }

    #[test]
    fn test_missing_budget_uses_default() {
        let mut input = sample_input();
        input.monthly_budget = None;
        let profile = input.into_profile().unwrap();
        assert_eq!(profile.monthly_budget, DEFAULT_MONTHLY_BUDGET);
    }
}
