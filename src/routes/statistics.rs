use actix_web::{get, web, HttpResponse};
use sqlx::PgPool;

use crate::handlers::statistics_handler::{personal_statistics, track_changes, StatisticsQuery};
use crate::middleware::auth::Claims;

#[get("/my-statistics")]
async fn my_statistics(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
    query: web::Query<StatisticsQuery>,
) -> HttpResponse {
    personal_statistics(pool, claims, query).await
}

#[get("/track-changes")]
async fn health_stat_track_changes(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
    query: web::Query<StatisticsQuery>,
) -> HttpResponse {
    track_changes(pool, claims, query).await
}
