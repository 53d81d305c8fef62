use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ExerciseRecord {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub difficulty_level: String,
    pub equipment: Option<String>,
    pub duration_min: i32,
    pub repetition: Option<i32>,
    pub sets: Option<i32>,
    pub calories_burned: f64,
    pub rating: Option<f64>,
    pub created_by: Option<Uuid>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateExerciseRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub difficulty_level: String,
    #[serde(default)]
    pub equipment: Option<String>,
    pub duration_min: i32,
    #[serde(default)]
    pub repetition: Option<i32>,
    #[serde(default)]
    pub sets: Option<i32>,
    pub calories_burned: f64,
    #[serde(default)]
    pub rating: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateExerciseRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub difficulty_level: Option<String>,
    #[serde(default)]
    pub equipment: Option<String>,
    #[serde(default)]
    pub duration_min: Option<i32>,
    #[serde(default)]
    pub repetition: Option<i32>,
    #[serde(default)]
    pub sets: Option<i32>,
    #[serde(default)]
    pub calories_burned: Option<f64>,
    #[serde(default)]
    pub rating: Option<f64>,
}
