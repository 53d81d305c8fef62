use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::db;
use crate::db::users::ProfileChanges;
use crate::middleware::auth::Claims;
use crate::models::common::ApiResponse;
use crate::models::user::{UpdateProfileRequest, UserResponse};
use crate::utils::password::hash_password;

#[tracing::instrument(
    name = "Get user profile",
    skip(pool, claims),
    fields(username = %claims.username)
)]
pub async fn get_profile(pool: web::Data<PgPool>, claims: web::ReqData<Claims>) -> HttpResponse {
    let user_id = match claims.user_id() {
        Some(id) => id,
        None => {
            return HttpResponse::BadRequest().json(ApiResponse::<()>::error("Invalid user ID"));
        }
    };

    match db::users::find_by_id(&pool, user_id).await {
        Ok(Some(user)) => {
            HttpResponse::Ok().json(ApiResponse::success(UserResponse::from(user)))
        }
        Ok(None) => HttpResponse::NotFound().json(ApiResponse::<()>::error("User not found")),
        Err(e) => {
            tracing::error!("Database error fetching user: {}", e);
            HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to fetch user profile"))
        }
    }
}

#[tracing::instrument(
    name = "Update user profile",
    skip(pool, claims, data),
    fields(username = %claims.username)
)]
pub async fn update_profile(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
    data: web::Json<UpdateProfileRequest>,
) -> HttpResponse {
    let user_id = match claims.user_id() {
        Some(id) => id,
        None => {
            return HttpResponse::BadRequest().json(ApiResponse::<()>::error("Invalid user ID"));
        }
    };

    if let Some(height) = data.height_m {
        if height <= 0.0 {
            return HttpResponse::BadRequest()
                .json(ApiResponse::<()>::error("Height must be positive"));
        }
    }
    if let Some(weight) = data.weight_kg {
        if weight <= 0.0 {
            return HttpResponse::BadRequest()
                .json(ApiResponse::<()>::error("Weight must be positive"));
        }
    }

    let password_hash = match &data.password {
        Some(password) => match hash_password(password) {
            Ok(hash) => Some(hash),
            Err(e) => {
                tracing::error!("Failed to hash password: {:?}", e);
                return HttpResponse::InternalServerError().finish();
            }
        },
        None => None,
    };

    let changes = ProfileChanges {
        first_name: data.first_name.as_deref(),
        last_name: data.last_name.as_deref(),
        password_hash: password_hash.as_deref(),
        date_of_birth: data.date_of_birth,
        height_m: data.height_m,
        weight_kg: data.weight_kg,
        health_goal: data.health_goal,
    };

    match db::users::update_profile(&pool, user_id, changes).await {
        Ok(Some(user)) => {
            HttpResponse::Ok().json(ApiResponse::success(UserResponse::from(user)))
        }
        Ok(None) => HttpResponse::NotFound().json(ApiResponse::<()>::error("User not found")),
        Err(e) => {
            tracing::error!("Database error updating profile: {}", e);
            HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to update profile"))
        }
    }
}
