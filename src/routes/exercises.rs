use actix_web::{delete, get, patch, post, web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

use crate::handlers::exercise_handler;
use crate::middleware::auth::Claims;
use crate::models::exercise::{CreateExerciseRequest, UpdateExerciseRequest};

#[post("")]
async fn create_exercise(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
    data: web::Json<CreateExerciseRequest>,
) -> HttpResponse {
    exercise_handler::create_exercise(pool, claims, data).await
}

#[get("")]
async fn list_exercises(pool: web::Data<PgPool>) -> HttpResponse {
    exercise_handler::list_exercises(pool).await
}

#[get("/{id}")]
async fn get_exercise(pool: web::Data<PgPool>, path: web::Path<Uuid>) -> HttpResponse {
    exercise_handler::get_exercise(pool, path).await
}

#[patch("/{id}")]
async fn update_exercise(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
    path: web::Path<Uuid>,
    data: web::Json<UpdateExerciseRequest>,
) -> HttpResponse {
    exercise_handler::update_exercise(pool, claims, path, data).await
}

#[delete("/{id}")]
async fn delete_exercise(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
    path: web::Path<Uuid>,
) -> HttpResponse {
    exercise_handler::delete_exercise(pool, claims, path).await
}
