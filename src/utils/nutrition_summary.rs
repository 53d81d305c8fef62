use serde::Serialize;

use crate::models::nutrition::FoodItemRecord;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutritionTotals {
    pub calories: f64,
    pub proteins: f64,
    pub carbs: f64,
    pub fats: f64,
    pub quantities: f64,
}

/// Sum the macros of a set of food items, rounded to two decimals.
pub fn summarize_nutrition(items: &[FoodItemRecord]) -> NutritionTotals {
    let mut totals = NutritionTotals {
        calories: 0.0,
        proteins: 0.0,
        carbs: 0.0,
        fats: 0.0,
        quantities: 0.0,
    };
    for item in items {
        totals.calories += item.calories;
        totals.proteins += item.proteins;
        totals.carbs += item.carbs;
        totals.fats += item.fats;
        totals.quantities += item.quantity as f64;
    }
    totals.calories = round2(totals.calories);
    totals.proteins = round2(totals.proteins);
    totals.carbs = round2(totals.carbs);
    totals.fats = round2(totals.fats);
    totals.quantities = round2(totals.quantities);
    totals
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn item(calories: f64, proteins: f64, carbs: f64, fats: f64, quantity: i32) -> FoodItemRecord {
        let now = Utc::now();
        FoodItemRecord {
            id: Uuid::new_v4(),
            name: "test".to_string(),
            calories,
            proteins,
            carbs,
            fats,
            quantity,
            unit: "g".to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn sums_across_items() {
        let items = [item(120.0, 8.5, 20.0, 2.5, 100), item(80.0, 1.5, 15.0, 0.5, 50)];
        let totals = summarize_nutrition(&items);
        assert_eq!(totals.calories, 200.0);
        assert_eq!(totals.proteins, 10.0);
        assert_eq!(totals.carbs, 35.0);
        assert_eq!(totals.fats, 3.0);
        assert_eq!(totals.quantities, 150.0);
    }

    #[test]
    fn empty_input_is_all_zero() {
        let totals = summarize_nutrition(&[]);
        assert_eq!(totals.calories, 0.0);
        assert_eq!(totals.quantities, 0.0);
    }
}
