use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::nutrition::{
    CreateFoodItemRequest, FoodItemRecord, MealRecord, NutritionPlanRecord,
};
use crate::utils::nutrition_summary::NutritionTotals;

const FOOD_COLUMNS: &str =
    "id, name, calories, proteins, carbs, fats, quantity, unit, is_active, created_at, updated_at";

const MEAL_COLUMNS: &str = "id, name, is_active, created_at, updated_at";

const PLAN_COLUMNS: &str = "id, user_id, name, plan_date, total_calories, total_proteins, \
     total_carbs, total_fats, is_active, created_at, updated_at";

pub async fn insert_food_item(
    pool: &PgPool,
    data: &CreateFoodItemRequest,
) -> Result<FoodItemRecord, sqlx::Error> {
    let now = Utc::now();
    sqlx::query_as::<_, FoodItemRecord>(&format!(
        r#"
        INSERT INTO food_items (id, name, calories, proteins, carbs, fats, quantity, unit,
                                is_active, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, TRUE, $9, $10)
        RETURNING {FOOD_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(&data.name)
    .bind(data.calories)
    .bind(data.proteins)
    .bind(data.carbs)
    .bind(data.fats)
    .bind(data.quantity)
    .bind(&data.unit)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn list_food_items(pool: &PgPool) -> Result<Vec<FoodItemRecord>, sqlx::Error> {
    sqlx::query_as::<_, FoodItemRecord>(&format!(
        "SELECT {FOOD_COLUMNS} FROM food_items WHERE is_active = TRUE ORDER BY name"
    ))
    .fetch_all(pool)
    .await
}

pub async fn find_active_food_items(
    pool: &PgPool,
    ids: &[Uuid],
) -> Result<Vec<FoodItemRecord>, sqlx::Error> {
    sqlx::query_as::<_, FoodItemRecord>(&format!(
        "SELECT {FOOD_COLUMNS} FROM food_items WHERE id = ANY($1) AND is_active = TRUE"
    ))
    .bind(ids)
    .fetch_all(pool)
    .await
}

pub async fn insert_meal(
    pool: &PgPool,
    name: &str,
    food_items: &[FoodItemRecord],
) -> Result<MealRecord, sqlx::Error> {
    let now = Utc::now();
    let meal_id = Uuid::new_v4();

    let mut tx = pool.begin().await?;

    let meal = sqlx::query_as::<_, MealRecord>(&format!(
        r#"
        INSERT INTO meals (id, name, is_active, created_at, updated_at)
        VALUES ($1, $2, TRUE, $3, $4)
        RETURNING {MEAL_COLUMNS}
        "#
    ))
    .bind(meal_id)
    .bind(name)
    .bind(now)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    for item in food_items {
        sqlx::query("INSERT INTO meal_food_items (meal_id, food_item_id) VALUES ($1, $2)")
            .bind(meal_id)
            .bind(item.id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(meal)
}

pub async fn list_meals(pool: &PgPool) -> Result<Vec<MealRecord>, sqlx::Error> {
    sqlx::query_as::<_, MealRecord>(&format!(
        "SELECT {MEAL_COLUMNS} FROM meals WHERE is_active = TRUE ORDER BY name"
    ))
    .fetch_all(pool)
    .await
}

pub async fn meal_food_items(
    pool: &PgPool,
    meal_id: Uuid,
) -> Result<Vec<FoodItemRecord>, sqlx::Error> {
    sqlx::query_as::<_, FoodItemRecord>(&format!(
        r#"
        SELECT {FOOD_COLUMNS}
        FROM food_items f
        JOIN meal_food_items mfi ON mfi.food_item_id = f.id
        WHERE mfi.meal_id = $1
        ORDER BY f.name
        "#
    ))
    .bind(meal_id)
    .fetch_all(pool)
    .await
}

/// Food items across several meals, for plan total computation.
pub async fn food_items_for_meals(
    pool: &PgPool,
    meal_ids: &[Uuid],
) -> Result<Vec<FoodItemRecord>, sqlx::Error> {
    sqlx::query_as::<_, FoodItemRecord>(&format!(
        r#"
        SELECT {FOOD_COLUMNS}
        FROM food_items f
        JOIN meal_food_items mfi ON mfi.food_item_id = f.id
        WHERE mfi.meal_id = ANY($1)
        "#
    ))
    .bind(meal_ids)
    .fetch_all(pool)
    .await
}

pub async fn find_active_meals(
    pool: &PgPool,
    ids: &[Uuid],
) -> Result<Vec<MealRecord>, sqlx::Error> {
    sqlx::query_as::<_, MealRecord>(&format!(
        "SELECT {MEAL_COLUMNS} FROM meals WHERE id = ANY($1) AND is_active = TRUE"
    ))
    .bind(ids)
    .fetch_all(pool)
    .await
}

pub async fn insert_nutrition_plan(
    pool: &PgPool,
    user_id: Uuid,
    name: &str,
    plan_date: Option<NaiveDate>,
    meals: &[MealRecord],
    totals: &NutritionTotals,
) -> Result<NutritionPlanRecord, sqlx::Error> {
    let now = Utc::now();
    let plan_id = Uuid::new_v4();

    let mut tx = pool.begin().await?;

    let plan = sqlx::query_as::<_, NutritionPlanRecord>(&format!(
        r#"
        INSERT INTO nutrition_plans (id, user_id, name, plan_date, total_calories,
                                     total_proteins, total_carbs, total_fats, is_active,
                                     created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, TRUE, $9, $10)
        RETURNING {PLAN_COLUMNS}
        "#
    ))
    .bind(plan_id)
    .bind(user_id)
    .bind(name)
    .bind(plan_date)
    .bind(totals.calories)
    .bind(totals.proteins)
    .bind(totals.carbs)
    .bind(totals.fats)
    .bind(now)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    for meal in meals {
        sqlx::query("INSERT INTO nutrition_plan_meals (plan_id, meal_id) VALUES ($1, $2)")
            .bind(plan_id)
            .bind(meal.id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(plan)
}

pub async fn plans_for_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<NutritionPlanRecord>, sqlx::Error> {
    sqlx::query_as::<_, NutritionPlanRecord>(&format!(
        r#"
        SELECT {PLAN_COLUMNS}
        FROM nutrition_plans
        WHERE user_id = $1 AND is_active = TRUE
        ORDER BY created_at DESC
        "#
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
}
