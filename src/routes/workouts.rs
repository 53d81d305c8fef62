use actix_web::{delete, get, post, web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

use crate::handlers::workout_handler;
use crate::middleware::auth::Claims;
use crate::models::workout::CreateWorkoutSessionRequest;

#[post("")]
async fn create_workout(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
    data: web::Json<CreateWorkoutSessionRequest>,
) -> HttpResponse {
    workout_handler::create_workout(pool, claims, data).await
}

#[get("")]
async fn list_workouts(pool: web::Data<PgPool>, claims: web::ReqData<Claims>) -> HttpResponse {
    workout_handler::list_workouts(pool, claims).await
}

#[get("/{id}")]
async fn get_workout(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
    path: web::Path<Uuid>,
) -> HttpResponse {
    workout_handler::get_workout(pool, claims, path).await
}

#[delete("/{id}")]
async fn delete_workout(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
    path: web::Path<Uuid>,
) -> HttpResponse {
    workout_handler::delete_workout(pool, claims, path).await
}
