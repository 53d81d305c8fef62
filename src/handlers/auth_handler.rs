use actix_web::{web, HttpResponse};
use serde_json::json;
use sqlx::PgPool;

use crate::auth::jwt::generate_token;
use crate::config::jwt::JwtSettings;
use crate::db;
use crate::models::user::{AuthResponse, LoginRequest, UserResponse, UserStatus};
use crate::utils::password::verify_password;

#[tracing::instrument(
    name = "User login",
    skip(credentials, pool, jwt_settings),
    fields(username = %credentials.username)
)]
pub async fn login_user(
    credentials: web::Json<LoginRequest>,
    pool: web::Data<PgPool>,
    jwt_settings: web::Data<JwtSettings>,
) -> HttpResponse {
    let user = match db::users::find_by_username(&pool, &credentials.username).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return HttpResponse::Unauthorized().json(json!({
                "status": "error",
                "message": "Invalid username or password"
            }));
        }
        Err(e) => {
            tracing::error!("Failed to query user: {:?}", e);
            return HttpResponse::InternalServerError().finish();
        }
    };

    if !verify_password(&credentials.password, &user.password_hash) {
        return HttpResponse::Unauthorized().json(json!({
            "status": "error",
            "message": "Invalid username or password"
        }));
    }

    if user.status != UserStatus::Active {
        return HttpResponse::Unauthorized().json(json!({
            "status": "error",
            "message": "Account is not active"
        }));
    }

    let token = match generate_token(&user, &jwt_settings) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!("Failed to generate token: {:?}", e);
            return HttpResponse::InternalServerError().finish();
        }
    };

    HttpResponse::Ok().json(AuthResponse {
        user: UserResponse::from(user),
        token,
    })
}
