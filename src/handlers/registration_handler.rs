use actix_web::{web, HttpResponse};
use serde_json::json;
use sqlx::PgPool;

use crate::models::user::{RegistrationRequest, UserResponse};
use crate::utils::password::hash_password;
use crate::db;

#[tracing::instrument(
    name = "Adding a new user",
    // Don't show the password
    skip(user_form, pool),
    fields(username = %user_form.username, email = %user_form.email)
)]
pub async fn register_user(
    user_form: web::Json<RegistrationRequest>,
    pool: web::Data<PgPool>,
) -> HttpResponse {
    if user_form.username.trim().is_empty() || user_form.password.is_empty() {
        return HttpResponse::BadRequest().json(json!({
            "status": "error",
            "message": "Username and password must not be empty"
        }));
    }

    match db::users::username_or_email_taken(&pool, &user_form.username, &user_form.email).await {
        Ok(true) => {
            return HttpResponse::BadRequest().json(json!({
                "status": "error",
                "message": "Username or email already in use"
            }));
        }
        Ok(false) => {}
        Err(e) => {
            tracing::error!("Failed to check for existing user: {:?}", e);
            return HttpResponse::InternalServerError().finish();
        }
    }

    let password_hash = match hash_password(&user_form.password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Failed to hash password: {:?}", e);
            return HttpResponse::InternalServerError().finish();
        }
    };

    let user = match db::users::insert_user(
        &pool,
        &user_form.username,
        &user_form.email,
        &password_hash,
        user_form.first_name.as_deref().unwrap_or(""),
        user_form.last_name.as_deref().unwrap_or(""),
    )
    .await
    {
        Ok(user) => user,
        Err(e) => {
            tracing::error!("Failed to insert user: {:?}", e);
            return HttpResponse::InternalServerError().finish();
        }
    };

    HttpResponse::Created().json(json!({
        "status": "success",
        "data": UserResponse::from(user)
    }))
}
