use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};

/// A named portion of the day's calorie budget.
///
/// Variant order is the order meals are served in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
            MealSlot::Snack => "snack",
        }
    }

    /// Display name used for meals in generated plans.
    pub fn label(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "Breakfast",
            MealSlot::Lunch => "Lunch",
            MealSlot::Dinner => "Dinner",
            MealSlot::Snack => "Snack",
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealSlot {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "breakfast" => Ok(MealSlot::Breakfast),
            "lunch" => Ok(MealSlot::Lunch),
            "dinner" => Ok(MealSlot::Dinner),
            "snack" => Ok(MealSlot::Snack),
            _ => Err(PlanError::InvalidArgument {
                field: "slot",
                value: s.to_string(),
                suggestion: None,
            }),
        }
    }
}

/// A catalog food with a human-readable portion.
///
/// Price and macros are optional; only the budget planner reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub name: String,
    pub calories: f64,
    pub portion: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbs: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
}

impl FoodItem {
    pub fn new(name: &str, calories: f64, portion: &str) -> Self {
        Self {
            name: name.to_string(),
            calories,
            portion: portion.to_string(),
            price: None,
            protein: None,
            carbs: None,
            fat: None,
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_macros(mut self, protein: f64, carbs: f64, fat: f64) -> Self {
        self.protein = Some(protein);
        self.carbs = Some(carbs);
        self.fat = Some(fat);
        self
    }

    /// Price with an unpriced food treated as free.
    #[inline]
    pub fn unit_price(&self) -> f64 {
        self.price.unwrap_or(0.0)
    }

    /// Non-negative, finite calories, price and macros.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("calories", Some(self.calories)),
            ("price", self.price),
            ("protein", self.protein),
            ("carbs", self.carbs),
            ("fat", self.fat),
        ];
        for (field, value) in fields {
            if let Some(v) = value {
                if !(v.is_finite() && v >= 0.0) {
                    return Err(PlanError::validation(
                        field,
                        format!("a non-negative number for '{}'", self.name),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Read-only food reference data, keyed by meal slot.
///
/// Order within a slot is significant: selection is first-fit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    slots: BTreeMap<MealSlot, Vec<FoodItem>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a food to the end of a slot's list.
    pub fn push(&mut self, slot: MealSlot, food: FoodItem) {
        self.slots.entry(slot).or_default().push(food);
    }

    pub fn with_slot(mut self, slot: MealSlot, foods: Vec<FoodItem>) -> Self {
        self.slots.insert(slot, foods);
        self
    }

    /// Foods for a slot in catalog order; empty when the slot is absent.
    pub fn foods(&self, slot: MealSlot) -> &[FoodItem] {
        self.slots.get(&slot).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All foods with their slot, slots in serving order.
    pub fn iter(&self) -> impl Iterator<Item = (MealSlot, &FoodItem)> {
        self.slots
            .iter()
            .flat_map(|(slot, foods)| foods.iter().map(move |f| (*slot, f)))
    }

    pub fn len(&self) -> usize {
        self.slots.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn validate(&self) -> Result<()> {
        self.iter().try_for_each(|(_, food)| food.validate())
    }

    /// Case-insensitive name search.
    ///
    /// An empty query lists the first 20 foods; otherwise at most 10 matches.
    pub fn search(&self, query: &str) -> Vec<(MealSlot, &FoodItem)> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.iter().take(20).collect();
        }
        self.iter()
            .filter(|(_, f)| f.name.to_lowercase().contains(&query))
            .take(10)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> Catalog {
        Catalog::new()
            .with_slot(
                MealSlot::Breakfast,
                vec![
                    FoodItem::new("Boiled eggs", 140.0, "2 units"),
                    FoodItem::new("Wholegrain bread", 80.0, "1 slice"),
                ],
            )
            .with_slot(MealSlot::Lunch, vec![FoodItem::new("Grilled chicken", 165.0, "100g")])
    }

    #[test]
    fn test_missing_slot_is_empty() {
        let catalog = sample_catalog();
        assert!(catalog.foods(MealSlot::Snack).is_empty());
        assert_eq!(catalog.foods(MealSlot::Breakfast).len(), 2);
    }

    #[test]
    fn test_push_preserves_order() {
        let mut catalog = Catalog::new();
        catalog.push(MealSlot::Dinner, FoodItem::new("B", 1.0, "x"));
        catalog.push(MealSlot::Dinner, FoodItem::new("A", 1.0, "x"));
        let names: Vec<&str> = catalog
            .foods(MealSlot::Dinner)
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn test_search_case_insensitive() {
        let catalog = sample_catalog();
        let hits = catalog.search("BREAD");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0, MealSlot::Breakfast);
        assert_eq!(catalog.search("").len(), 3);
        assert!(catalog.search("salmon").is_empty());
    }

    #[test]
    fn test_validate_rejects_negative_price() {
        let catalog = Catalog::new().with_slot(
            MealSlot::Snack,
            vec![FoodItem::new("Nuts", 579.0, "100g").with_price(-1.0)],
        );
        assert!(matches!(
            catalog.validate(),
            Err(PlanError::Validation { field: "price", .. })
        ));
    }

    #[test]
    fn test_json_shape() {
        let json = r#"{"lunch": [{"name": "Beans", "calories": 70, "portion": "3 tbsp", "price": 1.5}]}"#;
        let catalog: Catalog = serde_json::from_str(json).unwrap();
        let lunch = catalog.foods(MealSlot::Lunch);
        assert_eq!(lunch[0].price, Some(1.5));
        assert_eq!(lunch[0].protein, None);
    }

    #[test]
    fn test_slot_parse() {
        assert_eq!("snack".parse::<MealSlot>().unwrap(), MealSlot::Snack);
        assert!("brunch".parse::<MealSlot>().is_err());
    }
}
