use actix_web::{get, post, web, HttpResponse};
use sqlx::PgPool;

use crate::handlers::nutrition_handler;
use crate::middleware::auth::Claims;
use crate::models::nutrition::{
    CreateFoodItemRequest, CreateMealRequest, CreateNutritionPlanRequest,
};

#[post("/food-items")]
async fn create_food_item(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
    data: web::Json<CreateFoodItemRequest>,
) -> HttpResponse {
    nutrition_handler::create_food_item(pool, claims, data).await
}

#[get("/food-items")]
async fn list_food_items(pool: web::Data<PgPool>) -> HttpResponse {
    nutrition_handler::list_food_items(pool).await
}

#[post("/meals")]
async fn create_meal(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
    data: web::Json<CreateMealRequest>,
) -> HttpResponse {
    nutrition_handler::create_meal(pool, claims, data).await
}

#[get("/meals")]
async fn list_meals(pool: web::Data<PgPool>) -> HttpResponse {
    nutrition_handler::list_meals(pool).await
}

#[post("/plans")]
async fn create_plan(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
    data: web::Json<CreateNutritionPlanRequest>,
) -> HttpResponse {
    nutrition_handler::create_nutrition_plan(pool, claims, data).await
}

#[get("/plans")]
async fn list_plans(pool: web::Data<PgPool>, claims: web::ReqData<Claims>) -> HttpResponse {
    nutrition_handler::list_nutrition_plans(pool, claims).await
}
