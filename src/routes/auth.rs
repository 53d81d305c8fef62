use actix_web::{post, web, HttpResponse};
use sqlx::PgPool;

use crate::config::jwt::JwtSettings;
use crate::handlers::auth_handler::login_user;
use crate::models::user::LoginRequest;

#[post("/login")]
async fn login(
    credentials: web::Json<LoginRequest>,
    pool: web::Data<PgPool>,
    jwt_settings: web::Data<JwtSettings>,
) -> HttpResponse {
    login_user(credentials, pool, jwt_settings).await
}
