use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::middleware::auth::Claims;
use crate::stats::assemble::{
    build_statistics, build_track_changes, resolve_target, TargetUser,
};
use crate::stats::error::StatsError;
use crate::stats::period::{resolve, Period, ResolvedPeriod};

#[derive(Debug, Deserialize)]
pub struct StatisticsQuery {
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub week: Option<String>,
    #[serde(default)]
    pub month: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub target_user_id: Option<Uuid>,
}

impl StatisticsQuery {
    /// The selector matching the requested period; selectors for other
    /// periods are ignored.
    fn selector_for(&self, period: Period) -> Option<&str> {
        match period {
            Period::Weekly => self.week.as_deref(),
            Period::Monthly => self.month.as_deref(),
            Period::Yearly => self.year.as_deref(),
        }
    }
}

fn stats_error_response(error: &StatsError) -> HttpResponse {
    let body = json!({
        "status": "error",
        "message": error.to_string()
    });
    match error {
        StatsError::InvalidPeriod(_) | StatsError::InvalidSelector(_) => {
            HttpResponse::BadRequest().json(body)
        }
        StatsError::Forbidden => HttpResponse::Forbidden().json(body),
        StatsError::NotFound => HttpResponse::NotFound().json(body),
    }
}

/// Resolve the target user and reporting period for a statistics request.
/// Errors come back as the ready-to-send response.
async fn resolve_request(
    pool: &PgPool,
    claims: &Claims,
    query: &StatisticsQuery,
) -> Result<(TargetUser, ResolvedPeriod), HttpResponse> {
    let requester = claims
        .user_id()
        .ok_or_else(|| HttpResponse::BadRequest().json(json!({ "error": "Invalid user ID" })))?;

    let target_id = resolve_target(
        requester,
        query.target_user_id,
        claims.role.can_view_client_stats(),
    )
    .map_err(|e| stats_error_response(&e))?;

    let target = match db::users::find_active_summary(pool, target_id).await {
        Ok(Some(summary)) => TargetUser::from(&summary),
        Ok(None) => return Err(stats_error_response(&StatsError::NotFound)),
        Err(e) => {
            tracing::error!("Failed to look up target user: {:?}", e);
            return Err(HttpResponse::InternalServerError().finish());
        }
    };

    let period = Period::parse(query.period.as_deref().unwrap_or("weekly"))
        .map_err(|e| stats_error_response(&e))?;
    let resolved = resolve(period, query.selector_for(period), Utc::now().date_naive())
        .map_err(|e| stats_error_response(&e))?;

    Ok((target, resolved))
}

#[tracing::instrument(
    name = "Get personal statistics",
    skip(pool, claims, query),
    fields(username = %claims.username)
)]
pub async fn personal_statistics(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
    query: web::Query<StatisticsQuery>,
) -> HttpResponse {
    let (target, resolved) = match resolve_request(&pool, &claims, &query).await {
        Ok(context) => context,
        Err(response) => return response,
    };

    let sessions = match db::workouts::sessions_in_range(&pool, target.id, &resolved.range).await {
        Ok(sessions) => sessions,
        Err(e) => {
            tracing::error!("Failed to fetch workout sessions: {:?}", e);
            return HttpResponse::InternalServerError().finish();
        }
    };
    let health = match db::health_stats::stats_in_range(&pool, target.id, &resolved.range).await {
        Ok(health) => health,
        Err(e) => {
            tracing::error!("Failed to fetch health stats: {:?}", e);
            return HttpResponse::InternalServerError().finish();
        }
    };

    let report = build_statistics(target, &resolved, &sessions, &health);
    HttpResponse::Ok().json(report)
}

#[tracing::instrument(
    name = "Track health stat changes",
    skip(pool, claims, query),
    fields(username = %claims.username)
)]
pub async fn track_changes(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
    query: web::Query<StatisticsQuery>,
) -> HttpResponse {
    let (target, resolved) = match resolve_request(&pool, &claims, &query).await {
        Ok(context) => context,
        Err(response) => return response,
    };

    let health = match db::health_stats::stats_in_range(&pool, target.id, &resolved.range).await {
        Ok(health) => health,
        Err(e) => {
            tracing::error!("Failed to fetch health stats: {:?}", e);
            return HttpResponse::InternalServerError().finish();
        }
    };

    let report = build_track_changes(target, &resolved, &health);
    HttpResponse::Ok().json(report)
}
