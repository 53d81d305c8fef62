use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::exercise::ExerciseRecord;

/// A logged workout session. `updated_at` is the event time the statistics
/// engine buckets by; soft-deleted rows (`is_active = false`) never
/// participate in statistics.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkoutSessionRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub goal: Option<String>,
    pub scheduled_at: DateTime<Utc>,
    pub total_duration_min: i32,
    pub calories_burned: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateWorkoutSessionRequest {
    pub name: String,
    #[serde(default)]
    pub goal: Option<String>,
    pub scheduled_at: DateTime<Utc>,
    pub exercise_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct WorkoutSessionDetail {
    #[serde(flatten)]
    pub session: WorkoutSessionRecord,
    pub exercises: Vec<ExerciseRecord>,
}
