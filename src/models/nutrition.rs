use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FoodItemRecord {
    pub id: Uuid,
    pub name: String,
    pub calories: f64,
    pub proteins: f64,
    pub carbs: f64,
    pub fats: f64,
    pub quantity: i32,
    pub unit: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateFoodItemRequest {
    pub name: String,
    pub calories: f64,
    pub proteins: f64,
    pub carbs: f64,
    pub fats: f64,
    pub quantity: i32,
    pub unit: String,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MealRecord {
    pub id: Uuid,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateMealRequest {
    pub name: String,
    pub food_item_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct MealDetail {
    #[serde(flatten)]
    pub meal: MealRecord,
    pub food_items: Vec<FoodItemRecord>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NutritionPlanRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub plan_date: Option<NaiveDate>,
    pub total_calories: f64,
    pub total_proteins: f64,
    pub total_carbs: f64,
    pub total_fats: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateNutritionPlanRequest {
    pub name: String,
    #[serde(default)]
    pub plan_date: Option<NaiveDate>,
    pub meal_ids: Vec<Uuid>,
}
