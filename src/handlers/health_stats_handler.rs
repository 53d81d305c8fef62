use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::middleware::auth::Claims;
use crate::models::health_stat::{calc_bmi, CreateHealthStatRequest, UpdateHealthStatRequest};

const RECENT_STATS_LIMIT: i64 = 50;

#[tracing::instrument(
    name = "Record health measurement",
    skip(pool, claims, data),
    fields(username = %claims.username)
)]
pub async fn create_health_stat(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
    data: web::Json<CreateHealthStatRequest>,
) -> HttpResponse {
    let user_id = match claims.user_id() {
        Some(id) => id,
        None => return HttpResponse::BadRequest().json(json!({ "error": "Invalid user ID" })),
    };

    if let Some(height) = data.height_m {
        if height <= 0.0 {
            return HttpResponse::BadRequest()
                .json(json!({ "error": "Height must be positive" }));
        }
    }

    let bmi = calc_bmi(data.weight_kg, data.height_m);

    match db::health_stats::insert_health_stat(
        &pool,
        user_id,
        Utc::now(),
        data.weight_kg,
        data.height_m,
        bmi,
        data.water_intake_l.unwrap_or(0.0),
        data.step_count.unwrap_or(0),
        data.heart_rate,
    )
    .await
    {
        Ok(record) => HttpResponse::Created().json(json!({
            "success": true,
            "data": record
        })),
        Err(e) => {
            tracing::error!("Failed to insert health stat: {:?}", e);
            HttpResponse::InternalServerError()
                .json(json!({ "error": "Failed to record health measurement" }))
        }
    }
}

#[tracing::instrument(
    name = "List health measurements",
    skip(pool, claims),
    fields(username = %claims.username)
)]
pub async fn list_health_stats(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> HttpResponse {
    let user_id = match claims.user_id() {
        Some(id) => id,
        None => return HttpResponse::BadRequest().json(json!({ "error": "Invalid user ID" })),
    };

    match db::health_stats::recent_for_user(&pool, user_id, RECENT_STATS_LIMIT).await {
        Ok(records) => HttpResponse::Ok().json(json!({
            "success": true,
            "data": records
        })),
        Err(e) => {
            tracing::error!("Failed to fetch health stats: {:?}", e);
            HttpResponse::InternalServerError()
                .json(json!({ "error": "Failed to fetch health measurements" }))
        }
    }
}

#[tracing::instrument(
    name = "Update health measurement",
    skip(pool, claims, data),
    fields(username = %claims.username)
)]
pub async fn update_health_stat(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
    path: web::Path<Uuid>,
    data: web::Json<UpdateHealthStatRequest>,
) -> HttpResponse {
    let user_id = match claims.user_id() {
        Some(id) => id,
        None => return HttpResponse::BadRequest().json(json!({ "error": "Invalid user ID" })),
    };
    let stat_id = path.into_inner();

    let existing = match db::health_stats::find_by_id(&pool, stat_id).await {
        Ok(Some(record)) => record,
        Ok(None) => {
            return HttpResponse::NotFound().json(json!({ "error": "Health stat not found" }));
        }
        Err(e) => {
            tracing::error!("Failed to fetch health stat: {:?}", e);
            return HttpResponse::InternalServerError().finish();
        }
    };

    if existing.user_id != user_id {
        return HttpResponse::Forbidden()
            .json(json!({ "error": "Cannot modify another user's measurement" }));
    }

    // Merge the patch over the stored values, then recompute the derived BMI
    let weight_kg = data.weight_kg.or(existing.weight_kg);
    let height_m = data.height_m.or(existing.height_m);
    if let Some(height) = height_m {
        if height <= 0.0 {
            return HttpResponse::BadRequest()
                .json(json!({ "error": "Height must be positive" }));
        }
    }
    let bmi = calc_bmi(weight_kg, height_m);
    let water_intake_l = data.water_intake_l.unwrap_or(existing.water_intake_l);
    let step_count = data.step_count.unwrap_or(existing.step_count);
    let heart_rate = data.heart_rate.or(existing.heart_rate);

    match db::health_stats::update_health_stat(
        &pool,
        stat_id,
        weight_kg,
        height_m,
        bmi,
        water_intake_l,
        step_count,
        heart_rate,
    )
    .await
    {
        Ok(record) => HttpResponse::Ok().json(json!({
            "success": true,
            "data": record
        })),
        Err(e) => {
            tracing::error!("Failed to update health stat: {:?}", e);
            HttpResponse::InternalServerError()
                .json(json!({ "error": "Failed to update health measurement" }))
        }
    }
}
