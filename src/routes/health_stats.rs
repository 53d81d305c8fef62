use actix_web::{get, patch, post, web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

use crate::handlers::health_stats_handler::{
    create_health_stat, list_health_stats, update_health_stat,
};
use crate::middleware::auth::Claims;
use crate::models::health_stat::{CreateHealthStatRequest, UpdateHealthStatRequest};

#[post("")]
async fn create_stat(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
    data: web::Json<CreateHealthStatRequest>,
) -> HttpResponse {
    create_health_stat(pool, claims, data).await
}

#[get("")]
async fn list_stats(pool: web::Data<PgPool>, claims: web::ReqData<Claims>) -> HttpResponse {
    list_health_stats(pool, claims).await
}

#[patch("/{id}")]
async fn update_stat(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
    path: web::Path<Uuid>,
    data: web::Json<UpdateHealthStatRequest>,
) -> HttpResponse {
    update_health_stat(pool, claims, path, data).await
}
