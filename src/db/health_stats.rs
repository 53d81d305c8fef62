use chrono::{DateTime, Duration, NaiveTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::health_stat::HealthStatRecord;
use crate::stats::period::DateRange;

const STAT_COLUMNS: &str = "id, seq, user_id, recorded_at, weight_kg, height_m, bmi, \
     water_intake_l, step_count, heart_rate";

fn range_bounds(range: &DateRange) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = range.start.and_time(NaiveTime::MIN).and_utc();
    let end = (range.end + Duration::days(1)).and_time(NaiveTime::MIN).and_utc();
    (start, end)
}

pub async fn insert_health_stat(
    pool: &PgPool,
    user_id: Uuid,
    recorded_at: DateTime<Utc>,
    weight_kg: Option<f64>,
    height_m: Option<f64>,
    bmi: Option<f64>,
    water_intake_l: f64,
    step_count: i32,
    heart_rate: Option<i32>,
) -> Result<HealthStatRecord, sqlx::Error> {
    sqlx::query_as::<_, HealthStatRecord>(&format!(
        r#"
        INSERT INTO health_stats (id, user_id, recorded_at, weight_kg, height_m, bmi,
                                  water_intake_l, step_count, heart_rate)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING {STAT_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(recorded_at)
    .bind(weight_kg)
    .bind(height_m)
    .bind(bmi)
    .bind(water_intake_l)
    .bind(step_count)
    .bind(heart_rate)
    .fetch_one(pool)
    .await
}

pub async fn recent_for_user(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
) -> Result<Vec<HealthStatRecord>, sqlx::Error> {
    sqlx::query_as::<_, HealthStatRecord>(&format!(
        r#"
        SELECT {STAT_COLUMNS}
        FROM health_stats
        WHERE user_id = $1
        ORDER BY recorded_at DESC, seq DESC
        LIMIT $2
        "#
    ))
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(
    pool: &PgPool,
    stat_id: Uuid,
) -> Result<Option<HealthStatRecord>, sqlx::Error> {
    sqlx::query_as::<_, HealthStatRecord>(&format!(
        "SELECT {STAT_COLUMNS} FROM health_stats WHERE id = $1"
    ))
    .bind(stat_id)
    .fetch_optional(pool)
    .await
}

pub async fn update_health_stat(
    pool: &PgPool,
    stat_id: Uuid,
    weight_kg: Option<f64>,
    height_m: Option<f64>,
    bmi: Option<f64>,
    water_intake_l: f64,
    step_count: i32,
    heart_rate: Option<i32>,
) -> Result<HealthStatRecord, sqlx::Error> {
    sqlx::query_as::<_, HealthStatRecord>(&format!(
        r#"
        UPDATE health_stats SET
            weight_kg = $2,
            height_m = $3,
            bmi = $4,
            water_intake_l = $5,
            step_count = $6,
            heart_rate = $7
        WHERE id = $1
        RETURNING {STAT_COLUMNS}
        "#
    ))
    .bind(stat_id)
    .bind(weight_kg)
    .bind(height_m)
    .bind(bmi)
    .bind(water_intake_l)
    .bind(step_count)
    .bind(heart_rate)
    .fetch_one(pool)
    .await
}

/// Measurements with an event time inside the range, oldest first.
pub async fn stats_in_range(
    pool: &PgPool,
    user_id: Uuid,
    range: &DateRange,
) -> Result<Vec<HealthStatRecord>, sqlx::Error> {
    let (start, end) = range_bounds(range);
    sqlx::query_as::<_, HealthStatRecord>(&format!(
        r#"
        SELECT {STAT_COLUMNS}
        FROM health_stats
        WHERE user_id = $1 AND recorded_at >= $2 AND recorded_at < $3
        ORDER BY recorded_at, seq
        "#
    ))
    .bind(user_id)
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await
}
