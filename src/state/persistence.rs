use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::models::{Catalog, FoodItem, MealSlot};

/// One row of a CSV catalog.
#[derive(Debug, Deserialize)]
struct CatalogRow {
    slot: String,
    name: String,
    calories: f64,
    portion: String,
    price: Option<f64>,
    protein: Option<f64>,
    carbs: Option<f64>,
    fat: Option<f64>,
}

impl CatalogRow {
    fn into_entry(self) -> Result<(MealSlot, FoodItem)> {
        let slot = self.slot.trim().parse()?;
        Ok((
            slot,
            FoodItem {
                name: self.name,
                calories: self.calories,
                portion: self.portion,
                price: self.price,
                protein: self.protein,
                carbs: self.carbs,
                fat: self.fat,
            },
        ))
    }
}

fn read_csv_catalog(path: &Path) -> Result<Catalog> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
    let mut catalog = Catalog::new();
    for row in reader.deserialize::<CatalogRow>() {
        let (slot, food) = row?.into_entry()?;
        catalog.push(slot, food);
    }
    Ok(catalog)
}

/// JSON catalogs are keyed by slot name; keys parse like the CSV `slot` column.
fn read_json_catalog(content: &str) -> Result<Catalog> {
    let raw: BTreeMap<String, Vec<FoodItem>> = serde_json::from_str(content)?;
    let mut catalog = Catalog::new();
    for (key, foods) in raw {
        let slot: MealSlot = key.trim().parse()?;
        for food in foods {
            catalog.push(slot, food);
        }
    }
    Ok(catalog)
}

/// Load a food catalog from a `.csv` or JSON file.
///
/// Row order within each slot is kept. Every food is validated.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path = path.as_ref();
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    let catalog = if is_csv {
        read_csv_catalog(path)?
    } else {
        read_json_catalog(&fs::read_to_string(path)?)?
    };

    catalog.validate()?;
    info!(path = %path.display(), foods = catalog.len(), "loaded catalog");
    Ok(catalog)
}

/// Save a catalog as pretty-printed JSON.
pub fn save_catalog<P: AsRef<Path>>(path: P, catalog: &Catalog) -> Result<()> {
    let json = serde_json::to_string_pretty(catalog)?;
    fs::write(path.as_ref(), json)?;
    debug!(path = %path.as_ref().display(), "saved catalog");
    Ok(())
}

/// Catalog used when no catalog file is configured.
pub fn builtin_catalog() -> Catalog {
    Catalog::new()
        .with_slot(
            MealSlot::Breakfast,
            vec![
                FoodItem::new("Boiled eggs", 140.0, "2 units")
                    .with_price(1.60)
                    .with_macros(12.6, 1.2, 9.6),
                FoodItem::new("Wholegrain bread", 80.0, "1 slice")
                    .with_price(0.30)
                    .with_macros(4.0, 14.0, 1.0),
                FoodItem::new("Cottage cheese", 100.0, "4 tablespoons")
                    .with_price(8.00)
                    .with_macros(14.0, 3.0, 4.0),
            ],
        )
        .with_slot(
            MealSlot::Lunch,
            vec![
                FoodItem::new("Grilled chicken", 165.0, "100g")
                    .with_price(12.00)
                    .with_macros(31.0, 0.0, 3.6),
                FoodItem::new("Brown rice", 110.0, "4 tablespoons")
                    .with_price(4.50)
                    .with_macros(2.6, 23.0, 0.9),
                FoodItem::new("Beans", 70.0, "3 tablespoons"),
            ],
        )
        .with_slot(
            MealSlot::Dinner,
            vec![
                FoodItem::new("Salmon", 200.0, "100g")
                    .with_price(25.00)
                    .with_macros(22.0, 0.0, 12.0),
                FoodItem::new("Sweet potato", 86.0, "100g")
                    .with_price(3.50)
                    .with_macros(1.6, 20.0, 0.1),
                FoodItem::new("Green salad", 15.0, "100g")
                    .with_price(3.00)
                    .with_macros(1.0, 3.0, 0.2),
            ],
        )
        .with_slot(
            MealSlot::Snack,
            vec![
                FoodItem::new("Natural yogurt", 59.0, "100g")
                    .with_price(3.50)
                    .with_macros(3.5, 4.0, 3.3),
                FoodItem::new("Banana", 89.0, "100g")
                    .with_price(1.80)
                    .with_macros(1.1, 22.8, 0.3),
                FoodItem::new("Apple", 52.0, "100g")
                    .with_price(2.50)
                    .with_macros(0.3, 14.0, 0.2),
                FoodItem::new("Almonds", 579.0, "100g")
                    .with_price(15.00)
                    .with_macros(21.0, 22.0, 50.0),
            ],
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlanError;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    #[test]
    fn test_load_json_and_save_roundtrip() {
        let json = r#"{
            "breakfast": [
                {"name": "Eggs", "calories": 140, "portion": "2 units"},
                {"name": "Bread", "calories": 80, "portion": "1 slice", "price": 0.3}
            ]
        }"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.foods(MealSlot::Breakfast)[0].name, "Eggs");

        let out_file = NamedTempFile::new().unwrap();
        save_catalog(out_file.path(), &catalog).unwrap();
        let reloaded = load_catalog(out_file.path()).unwrap();
        assert_eq!(reloaded, catalog);
    }

    #[test]
    fn test_load_csv_keeps_row_order() {
        let csv = "slot,name,calories,portion,price,protein,carbs,fat\n\
                   lunch,Chicken,165,100g,12.0,31,0,3.6\n\
                   breakfast,Eggs,140,2 units,,,,\n\
                   lunch,Rice,110,4 tbsp,4.5,2.6,23,0.9\n";

        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(csv.as_bytes()).unwrap();

        let catalog = load_catalog(file.path()).unwrap();
        let lunch: Vec<&str> = catalog
            .foods(MealSlot::Lunch)
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(lunch, vec!["Chicken", "Rice"]);
        assert_eq!(catalog.foods(MealSlot::Breakfast)[0].price, None);
    }

    #[test]
    fn test_load_csv_rejects_unknown_slot() {
        let csv = "slot,name,calories,portion,price,protein,carbs,fat\n\
                   brunch,Waffles,300,1 unit,,,,\n";

        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(csv.as_bytes()).unwrap();

        assert!(matches!(
            load_catalog(file.path()),
            Err(PlanError::InvalidArgument { field: "slot", .. })
        ));
    }

    #[test]
    fn test_load_json_rejects_unknown_slot() {
        let json = r#"{"brunch": [{"name": "Waffles", "calories": 300, "portion": "1 unit"}]}"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        match load_catalog(file.path()) {
            Err(PlanError::InvalidArgument { field, value, .. }) => {
                assert_eq!(field, "slot");
                assert_eq!(value, "brunch");
            }
            other => panic!("expected invalid slot, got {other:?}"),
        }
    }

    #[test]
    fn test_load_rejects_negative_calories() {
        let json = r#"{"snack": [{"name": "Bad", "calories": -5, "portion": "1"}]}"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        assert!(load_catalog(file.path()).is_err());
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = builtin_catalog();
        assert!(catalog.validate().is_ok());
        assert!(!catalog.foods(MealSlot::Snack).is_empty());
    }
}
