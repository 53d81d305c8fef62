use actix_web::{web, HttpResponse};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::middleware::auth::Claims;
use crate::models::workout::{CreateWorkoutSessionRequest, WorkoutSessionDetail};

#[tracing::instrument(
    name = "Create workout session",
    skip(pool, claims, data),
    fields(username = %claims.username)
)]
pub async fn create_workout(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
    data: web::Json<CreateWorkoutSessionRequest>,
) -> HttpResponse {
    let user_id = match claims.user_id() {
        Some(id) => id,
        None => return HttpResponse::BadRequest().json(json!({ "error": "Invalid user ID" })),
    };

    if data.name.trim().is_empty() {
        return HttpResponse::BadRequest().json(json!({ "error": "Workout name is required" }));
    }
    if data.exercise_ids.is_empty() {
        return HttpResponse::BadRequest()
            .json(json!({ "error": "A workout needs at least one exercise" }));
    }

    let exercises = match db::exercises::find_active_by_ids(&pool, &data.exercise_ids).await {
        Ok(exercises) => exercises,
        Err(e) => {
            tracing::error!("Failed to resolve exercises: {:?}", e);
            return HttpResponse::InternalServerError().finish();
        }
    };
    if exercises.len() != data.exercise_ids.len() {
        return HttpResponse::BadRequest()
            .json(json!({ "error": "One or more exercises do not exist" }));
    }

    // Session totals are derived from the selected exercises at write time
    match db::workouts::insert_session(
        &pool,
        user_id,
        &data.name,
        data.goal.as_deref(),
        data.scheduled_at,
        &exercises,
    )
    .await
    {
        Ok(session) => HttpResponse::Created().json(json!({
            "success": true,
            "data": WorkoutSessionDetail { session, exercises }
        })),
        Err(e) => {
            tracing::error!("Failed to insert workout session: {:?}", e);
            HttpResponse::InternalServerError()
                .json(json!({ "error": "Failed to create workout session" }))
        }
    }
}

#[tracing::instrument(
    name = "List workout sessions",
    skip(pool, claims),
    fields(username = %claims.username)
)]
pub async fn list_workouts(pool: web::Data<PgPool>, claims: web::ReqData<Claims>) -> HttpResponse {
    let user_id = match claims.user_id() {
        Some(id) => id,
        None => return HttpResponse::BadRequest().json(json!({ "error": "Invalid user ID" })),
    };

    match db::workouts::sessions_for_user(&pool, user_id).await {
        Ok(sessions) => HttpResponse::Ok().json(json!({
            "success": true,
            "data": sessions
        })),
        Err(e) => {
            tracing::error!("Failed to fetch workout sessions: {:?}", e);
            HttpResponse::InternalServerError()
                .json(json!({ "error": "Failed to fetch workout sessions" }))
        }
    }
}

#[tracing::instrument(
    name = "Get workout session",
    skip(pool, claims),
    fields(username = %claims.username)
)]
pub async fn get_workout(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
    path: web::Path<Uuid>,
) -> HttpResponse {
    let user_id = match claims.user_id() {
        Some(id) => id,
        None => return HttpResponse::BadRequest().json(json!({ "error": "Invalid user ID" })),
    };
    let session_id = path.into_inner();

    let session = match db::workouts::find_session(&pool, session_id).await {
        Ok(Some(session)) => session,
        Ok(None) => {
            return HttpResponse::NotFound().json(json!({ "error": "Workout session not found" }));
        }
        Err(e) => {
            tracing::error!("Failed to fetch workout session: {:?}", e);
            return HttpResponse::InternalServerError().finish();
        }
    };

    if session.user_id != user_id {
        return HttpResponse::Forbidden()
            .json(json!({ "error": "Cannot view another user's workout" }));
    }

    let exercises = match db::workouts::session_exercises(&pool, session_id).await {
        Ok(exercises) => exercises,
        Err(e) => {
            tracing::error!("Failed to fetch session exercises: {:?}", e);
            return HttpResponse::InternalServerError().finish();
        }
    };

    HttpResponse::Ok().json(json!({
        "success": true,
        "data": WorkoutSessionDetail { session, exercises }
    }))
}

#[tracing::instrument(
    name = "Delete workout session",
    skip(pool, claims),
    fields(username = %claims.username)
)]
pub async fn delete_workout(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
    path: web::Path<Uuid>,
) -> HttpResponse {
    let user_id = match claims.user_id() {
        Some(id) => id,
        None => return HttpResponse::BadRequest().json(json!({ "error": "Invalid user ID" })),
    };

    match db::workouts::soft_delete_session(&pool, path.into_inner(), user_id).await {
        Ok(true) => HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Workout session deleted"
        })),
        Ok(false) => HttpResponse::NotFound().json(json!({ "error": "Workout session not found" })),
        Err(e) => {
            tracing::error!("Failed to delete workout session: {:?}", e);
            HttpResponse::InternalServerError()
                .json(json!({ "error": "Failed to delete workout session" }))
        }
    }
}
