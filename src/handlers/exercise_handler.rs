use actix_web::{web, HttpResponse};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::middleware::auth::Claims;
use crate::models::exercise::{CreateExerciseRequest, UpdateExerciseRequest};

#[tracing::instrument(
    name = "Create exercise",
    skip(pool, claims, data),
    fields(username = %claims.username)
)]
pub async fn create_exercise(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
    data: web::Json<CreateExerciseRequest>,
) -> HttpResponse {
    let user_id = match claims.user_id() {
        Some(id) => id,
        None => return HttpResponse::BadRequest().json(json!({ "error": "Invalid user ID" })),
    };

    if data.name.trim().is_empty() {
        return HttpResponse::BadRequest().json(json!({ "error": "Exercise name is required" }));
    }
    if data.duration_min < 0 || data.calories_burned < 0.0 {
        return HttpResponse::BadRequest()
            .json(json!({ "error": "Duration and calories must not be negative" }));
    }

    match db::exercises::insert_exercise(&pool, user_id, &data).await {
        Ok(exercise) => HttpResponse::Created().json(json!({
            "success": true,
            "data": exercise
        })),
        Err(e) => {
            tracing::error!("Failed to insert exercise: {:?}", e);
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to create exercise" }))
        }
    }
}

#[tracing::instrument(name = "List exercises", skip(pool))]
pub async fn list_exercises(pool: web::Data<PgPool>) -> HttpResponse {
    match db::exercises::list_active(&pool).await {
        Ok(exercises) => HttpResponse::Ok().json(json!({
            "success": true,
            "data": exercises
        })),
        Err(e) => {
            tracing::error!("Failed to fetch exercises: {:?}", e);
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to fetch exercises" }))
        }
    }
}

#[tracing::instrument(name = "Get exercise", skip(pool))]
pub async fn get_exercise(pool: web::Data<PgPool>, path: web::Path<Uuid>) -> HttpResponse {
    match db::exercises::find_by_id(&pool, path.into_inner()).await {
        Ok(Some(exercise)) => HttpResponse::Ok().json(json!({
            "success": true,
            "data": exercise
        })),
        Ok(None) => HttpResponse::NotFound().json(json!({ "error": "Exercise not found" })),
        Err(e) => {
            tracing::error!("Failed to fetch exercise: {:?}", e);
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to fetch exercise" }))
        }
    }
}

#[tracing::instrument(
    name = "Update exercise",
    skip(pool, claims, data),
    fields(username = %claims.username)
)]
pub async fn update_exercise(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
    path: web::Path<Uuid>,
    data: web::Json<UpdateExerciseRequest>,
) -> HttpResponse {
    let exercise_id = path.into_inner();

    let existing = match db::exercises::find_by_id(&pool, exercise_id).await {
        Ok(Some(exercise)) => exercise,
        Ok(None) => {
            return HttpResponse::NotFound().json(json!({ "error": "Exercise not found" }));
        }
        Err(e) => {
            tracing::error!("Failed to fetch exercise: {:?}", e);
            return HttpResponse::InternalServerError().finish();
        }
    };

    // Only the author may edit a catalog entry
    if existing.created_by != claims.user_id() {
        return HttpResponse::Forbidden()
            .json(json!({ "error": "Cannot modify an exercise you did not create" }));
    }

    match db::exercises::update_exercise(&pool, exercise_id, &data).await {
        Ok(Some(exercise)) => HttpResponse::Ok().json(json!({
            "success": true,
            "data": exercise
        })),
        Ok(None) => HttpResponse::NotFound().json(json!({ "error": "Exercise not found" })),
        Err(e) => {
            tracing::error!("Failed to update exercise: {:?}", e);
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to update exercise" }))
        }
    }
}

#[tracing::instrument(
    name = "Delete exercise",
    skip(pool, claims),
    fields(username = %claims.username)
)]
pub async fn delete_exercise(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
    path: web::Path<Uuid>,
) -> HttpResponse {
    let exercise_id = path.into_inner();

    let existing = match db::exercises::find_by_id(&pool, exercise_id).await {
        Ok(Some(exercise)) => exercise,
        Ok(None) => {
            return HttpResponse::NotFound().json(json!({ "error": "Exercise not found" }));
        }
        Err(e) => {
            tracing::error!("Failed to fetch exercise: {:?}", e);
            return HttpResponse::InternalServerError().finish();
        }
    };

    if existing.created_by != claims.user_id() {
        return HttpResponse::Forbidden()
            .json(json!({ "error": "Cannot delete an exercise you did not create" }));
    }

    match db::exercises::soft_delete(&pool, exercise_id).await {
        Ok(true) => HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Exercise deleted"
        })),
        Ok(false) => HttpResponse::NotFound().json(json!({ "error": "Exercise not found" })),
        Err(e) => {
            tracing::error!("Failed to delete exercise: {:?}", e);
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to delete exercise" }))
        }
    }
}
