use actix_web::{web, HttpResponse};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::middleware::auth::Claims;
use crate::models::nutrition::{
    CreateFoodItemRequest, CreateMealRequest, CreateNutritionPlanRequest, MealDetail,
};
use crate::utils::nutrition_summary::summarize_nutrition;

#[tracing::instrument(
    name = "Create food item",
    skip(pool, claims, data),
    fields(username = %claims.username)
)]
pub async fn create_food_item(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
    data: web::Json<CreateFoodItemRequest>,
) -> HttpResponse {
    if data.name.trim().is_empty() {
        return HttpResponse::BadRequest().json(json!({ "error": "Food item name is required" }));
    }

    match db::nutrition::insert_food_item(&pool, &data).await {
        Ok(item) => HttpResponse::Created().json(json!({
            "success": true,
            "data": item
        })),
        Err(e) => {
            tracing::error!("Failed to insert food item: {:?}", e);
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to create food item" }))
        }
    }
}

#[tracing::instrument(name = "List food items", skip(pool))]
pub async fn list_food_items(pool: web::Data<PgPool>) -> HttpResponse {
    match db::nutrition::list_food_items(&pool).await {
        Ok(items) => HttpResponse::Ok().json(json!({
            "success": true,
            "data": items
        })),
        Err(e) => {
            tracing::error!("Failed to fetch food items: {:?}", e);
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to fetch food items" }))
        }
    }
}

#[tracing::instrument(
    name = "Create meal",
    skip(pool, claims, data),
    fields(username = %claims.username)
)]
pub async fn create_meal(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
    data: web::Json<CreateMealRequest>,
) -> HttpResponse {
    if data.name.trim().is_empty() {
        return HttpResponse::BadRequest().json(json!({ "error": "Meal name is required" }));
    }
    if data.food_item_ids.is_empty() {
        return HttpResponse::BadRequest()
            .json(json!({ "error": "A meal needs at least one food item" }));
    }

    let food_items = match db::nutrition::find_active_food_items(&pool, &data.food_item_ids).await {
        Ok(items) => items,
        Err(e) => {
            tracing::error!("Failed to resolve food items: {:?}", e);
            return HttpResponse::InternalServerError().finish();
        }
    };
    if food_items.len() != data.food_item_ids.len() {
        return HttpResponse::BadRequest()
            .json(json!({ "error": "One or more food items do not exist" }));
    }

    match db::nutrition::insert_meal(&pool, &data.name, &food_items).await {
        Ok(meal) => HttpResponse::Created().json(json!({
            "success": true,
            "data": MealDetail { meal, food_items }
        })),
        Err(e) => {
            tracing::error!("Failed to insert meal: {:?}", e);
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to create meal" }))
        }
    }
}

#[tracing::instrument(name = "List meals", skip(pool))]
pub async fn list_meals(pool: web::Data<PgPool>) -> HttpResponse {
    let meals = match db::nutrition::list_meals(&pool).await {
        Ok(meals) => meals,
        Err(e) => {
            tracing::error!("Failed to fetch meals: {:?}", e);
            return HttpResponse::InternalServerError()
                .json(json!({ "error": "Failed to fetch meals" }));
        }
    };

    let mut details = Vec::with_capacity(meals.len());
    for meal in meals {
        match db::nutrition::meal_food_items(&pool, meal.id).await {
            Ok(food_items) => details.push(MealDetail { meal, food_items }),
            Err(e) => {
                tracing::error!("Failed to fetch meal items: {:?}", e);
                return HttpResponse::InternalServerError()
                    .json(json!({ "error": "Failed to fetch meals" }));
            }
        }
    }

    HttpResponse::Ok().json(json!({
        "success": true,
        "data": details
    }))
}

#[tracing::instrument(
    name = "Create nutrition plan",
    skip(pool, claims, data),
    fields(username = %claims.username)
)]
pub async fn create_nutrition_plan(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
    data: web::Json<CreateNutritionPlanRequest>,
) -> HttpResponse {
    let user_id = match claims.user_id() {
        Some(id) => id,
        None => return HttpResponse::BadRequest().json(json!({ "error": "Invalid user ID" })),
    };

    if data.name.trim().is_empty() {
        return HttpResponse::BadRequest().json(json!({ "error": "Plan name is required" }));
    }
    if data.meal_ids.is_empty() {
        return HttpResponse::BadRequest()
            .json(json!({ "error": "A plan needs at least one meal" }));
    }

    let meals = match db::nutrition::find_active_meals(&pool, &data.meal_ids).await {
        Ok(meals) => meals,
        Err(e) => {
            tracing::error!("Failed to resolve meals: {:?}", e);
            return HttpResponse::InternalServerError().finish();
        }
    };
    if meals.len() != data.meal_ids.len() {
        return HttpResponse::BadRequest().json(json!({ "error": "One or more meals do not exist" }));
    }

    // Plan totals are derived from the meals' food items at write time
    let meal_ids: Vec<Uuid> = meals.iter().map(|m| m.id).collect();
    let food_items = match db::nutrition::food_items_for_meals(&pool, &meal_ids).await {
        Ok(items) => items,
        Err(e) => {
            tracing::error!("Failed to fetch plan food items: {:?}", e);
            return HttpResponse::InternalServerError().finish();
        }
    };
    let totals = summarize_nutrition(&food_items);

    match db::nutrition::insert_nutrition_plan(
        &pool,
        user_id,
        &data.name,
        data.plan_date,
        &meals,
        &totals,
    )
    .await
    {
        Ok(plan) => HttpResponse::Created().json(json!({
            "success": true,
            "data": plan
        })),
        Err(e) => {
            tracing::error!("Failed to insert nutrition plan: {:?}", e);
            HttpResponse::InternalServerError()
                .json(json!({ "error": "Failed to create nutrition plan" }))
        }
    }
}

#[tracing::instrument(
    name = "List nutrition plans",
    skip(pool, claims),
    fields(username = %claims.username)
)]
pub async fn list_nutrition_plans(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> HttpResponse {
    let user_id = match claims.user_id() {
        Some(id) => id,
        None => return HttpResponse::BadRequest().json(json!({ "error": "Invalid user ID" })),
    };

    match db::nutrition::plans_for_user(&pool, user_id).await {
        Ok(plans) => HttpResponse::Ok().json(json!({
            "success": true,
            "data": plans
        })),
        Err(e) => {
            tracing::error!("Failed to fetch nutrition plans: {:?}", e);
            HttpResponse::InternalServerError()
                .json(json!({ "error": "Failed to fetch nutrition plans" }))
        }
    }
}
