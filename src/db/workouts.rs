use chrono::{DateTime, Duration, NaiveTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::exercise::ExerciseRecord;
use crate::models::workout::WorkoutSessionRecord;
use crate::stats::period::DateRange;

const SESSION_COLUMNS: &str = "id, user_id, name, goal, scheduled_at, total_duration_min, \
     calories_burned, is_active, created_at, updated_at";

const EXERCISE_COLUMNS: &str = "id, name, description, difficulty_level, equipment, \
     duration_min, repetition, sets, calories_burned, rating, created_by, is_active, \
     created_at, updated_at";

pub async fn insert_session(
    pool: &PgPool,
    user_id: Uuid,
    name: &str,
    goal: Option<&str>,
    scheduled_at: DateTime<Utc>,
    exercises: &[ExerciseRecord],
) -> Result<WorkoutSessionRecord, sqlx::Error> {
    let total_duration_min: i32 = exercises.iter().map(|e| e.duration_min).sum();
    let calories_burned: f64 = exercises.iter().map(|e| e.calories_burned).sum();
    let now = Utc::now();
    let session_id = Uuid::new_v4();

    let mut tx = pool.begin().await?;

    let session = sqlx::query_as::<_, WorkoutSessionRecord>(&format!(
        r#"
        INSERT INTO workout_sessions (id, user_id, name, goal, scheduled_at,
                                      total_duration_min, calories_burned, is_active,
                                      created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, TRUE, $8, $9)
        RETURNING {SESSION_COLUMNS}
        "#
    ))
    .bind(session_id)
    .bind(user_id)
    .bind(name)
    .bind(goal)
    .bind(scheduled_at)
    .bind(total_duration_min)
    .bind(calories_burned)
    .bind(now)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    for exercise in exercises {
        sqlx::query(
            "INSERT INTO workout_session_exercises (session_id, exercise_id) VALUES ($1, $2)",
        )
        .bind(session_id)
        .bind(exercise.id)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(session)
}

pub async fn sessions_for_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<WorkoutSessionRecord>, sqlx::Error> {
    sqlx::query_as::<_, WorkoutSessionRecord>(&format!(
        r#"
        SELECT {SESSION_COLUMNS}
        FROM workout_sessions
        WHERE user_id = $1 AND is_active = TRUE
        ORDER BY scheduled_at DESC
        "#
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn find_session(
    pool: &PgPool,
    session_id: Uuid,
) -> Result<Option<WorkoutSessionRecord>, sqlx::Error> {
    sqlx::query_as::<_, WorkoutSessionRecord>(&format!(
        "SELECT {SESSION_COLUMNS} FROM workout_sessions WHERE id = $1 AND is_active = TRUE"
    ))
    .bind(session_id)
    .fetch_optional(pool)
    .await
}

pub async fn session_exercises(
    pool: &PgPool,
    session_id: Uuid,
) -> Result<Vec<ExerciseRecord>, sqlx::Error> {
    sqlx::query_as::<_, ExerciseRecord>(&format!(
        r#"
        SELECT {EXERCISE_COLUMNS}
        FROM exercises e
        JOIN workout_session_exercises wse ON wse.exercise_id = e.id
        WHERE wse.session_id = $1
        ORDER BY e.name
        "#
    ))
    .bind(session_id)
    .fetch_all(pool)
    .await
}

pub async fn soft_delete_session(
    pool: &PgPool,
    session_id: Uuid,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE workout_sessions
        SET is_active = FALSE, updated_at = $3
        WHERE id = $1 AND user_id = $2 AND is_active = TRUE
        "#,
    )
    .bind(session_id)
    .bind(user_id)
    .bind(Utc::now())
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Active sessions whose event time falls inside the range, oldest first.
pub async fn sessions_in_range(
    pool: &PgPool,
    user_id: Uuid,
    range: &DateRange,
) -> Result<Vec<WorkoutSessionRecord>, sqlx::Error> {
    let start = range.start.and_time(NaiveTime::MIN).and_utc();
    let end = (range.end + Duration::days(1)).and_time(NaiveTime::MIN).and_utc();
    sqlx::query_as::<_, WorkoutSessionRecord>(&format!(
        r#"
        SELECT {SESSION_COLUMNS}
        FROM workout_sessions
        WHERE user_id = $1 AND is_active = TRUE AND updated_at >= $2 AND updated_at < $3
        ORDER BY updated_at
        "#
    ))
    .bind(user_id)
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await
}
