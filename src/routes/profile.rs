use actix_web::{get, patch, web, HttpResponse};
use sqlx::PgPool;

use crate::handlers::profile_handler::{get_profile, update_profile};
use crate::middleware::auth::Claims;
use crate::models::user::UpdateProfileRequest;

#[get("")]
async fn get_user(pool: web::Data<PgPool>, claims: web::ReqData<Claims>) -> HttpResponse {
    get_profile(pool, claims).await
}

#[patch("")]
async fn update_user(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
    data: web::Json<UpdateProfileRequest>,
) -> HttpResponse {
    update_profile(pool, claims, data).await
}
