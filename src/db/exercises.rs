use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::exercise::{CreateExerciseRequest, ExerciseRecord, UpdateExerciseRequest};

const EXERCISE_COLUMNS: &str = "id, name, description, difficulty_level, equipment, \
     duration_min, repetition, sets, calories_burned, rating, created_by, is_active, \
     created_at, updated_at";

pub async fn insert_exercise(
    pool: &PgPool,
    created_by: Uuid,
    data: &CreateExerciseRequest,
) -> Result<ExerciseRecord, sqlx::Error> {
    let now = Utc::now();
    sqlx::query_as::<_, ExerciseRecord>(&format!(
        r#"
        INSERT INTO exercises (id, name, description, difficulty_level, equipment,
                               duration_min, repetition, sets, calories_burned, rating,
                               created_by, is_active, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, TRUE, $12, $13)
        RETURNING {EXERCISE_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(&data.name)
    .bind(data.description.as_deref().unwrap_or(""))
    .bind(&data.difficulty_level)
    .bind(data.equipment.as_deref())
    .bind(data.duration_min)
    .bind(data.repetition)
    .bind(data.sets)
    .bind(data.calories_burned)
    .bind(data.rating)
    .bind(created_by)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn list_active(pool: &PgPool) -> Result<Vec<ExerciseRecord>, sqlx::Error> {
    sqlx::query_as::<_, ExerciseRecord>(&format!(
        "SELECT {EXERCISE_COLUMNS} FROM exercises WHERE is_active = TRUE ORDER BY name"
    ))
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(
    pool: &PgPool,
    exercise_id: Uuid,
) -> Result<Option<ExerciseRecord>, sqlx::Error> {
    sqlx::query_as::<_, ExerciseRecord>(&format!(
        "SELECT {EXERCISE_COLUMNS} FROM exercises WHERE id = $1 AND is_active = TRUE"
    ))
    .bind(exercise_id)
    .fetch_optional(pool)
    .await
}

/// Resolve a set of exercise ids to active records. Missing or inactive ids
/// simply do not come back; callers decide whether that is an error.
pub async fn find_active_by_ids(
    pool: &PgPool,
    ids: &[Uuid],
) -> Result<Vec<ExerciseRecord>, sqlx::Error> {
    sqlx::query_as::<_, ExerciseRecord>(&format!(
        "SELECT {EXERCISE_COLUMNS} FROM exercises WHERE id = ANY($1) AND is_active = TRUE"
    ))
    .bind(ids)
    .fetch_all(pool)
    .await
}

pub async fn update_exercise(
    pool: &PgPool,
    exercise_id: Uuid,
    data: &UpdateExerciseRequest,
) -> Result<Option<ExerciseRecord>, sqlx::Error> {
    sqlx::query_as::<_, ExerciseRecord>(&format!(
        r#"
        UPDATE exercises SET
            name = COALESCE($2, name),
            description = COALESCE($3, description),
            difficulty_level = COALESCE($4, difficulty_level),
            equipment = COALESCE($5, equipment),
            duration_min = COALESCE($6, duration_min),
            repetition = COALESCE($7, repetition),
            sets = COALESCE($8, sets),
            calories_burned = COALESCE($9, calories_burned),
            rating = COALESCE($10, rating),
            updated_at = $11
        WHERE id = $1 AND is_active = TRUE
        RETURNING {EXERCISE_COLUMNS}
        "#
    ))
    .bind(exercise_id)
    .bind(data.name.as_deref())
    .bind(data.description.as_deref())
    .bind(data.difficulty_level.as_deref())
    .bind(data.equipment.as_deref())
    .bind(data.duration_min)
    .bind(data.repetition)
    .bind(data.sets)
    .bind(data.calories_burned)
    .bind(data.rating)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await
}

pub async fn soft_delete(pool: &PgPool, exercise_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE exercises SET is_active = FALSE, updated_at = $2 WHERE id = $1 AND is_active = TRUE",
    )
    .bind(exercise_id)
    .bind(Utc::now())
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}
