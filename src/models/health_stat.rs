use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A point-in-time health measurement. `recorded_at` is the event time used
/// for bucketing; `seq` is the insertion order and breaks same-instant ties,
/// so the most recently written record wins for "value on that day".
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HealthStatRecord {
    pub id: Uuid,
    pub seq: i64,
    pub user_id: Uuid,
    pub recorded_at: DateTime<Utc>,
    pub weight_kg: Option<f64>,
    pub height_m: Option<f64>,
    pub bmi: Option<f64>,
    pub water_intake_l: f64,
    pub step_count: i32,
    pub heart_rate: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct CreateHealthStatRequest {
    #[serde(default)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub height_m: Option<f64>,
    #[serde(default)]
    pub water_intake_l: Option<f64>,
    #[serde(default)]
    pub step_count: Option<i32>,
    #[serde(default)]
    pub heart_rate: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateHealthStatRequest {
    #[serde(default)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub height_m: Option<f64>,
    #[serde(default)]
    pub water_intake_l: Option<f64>,
    #[serde(default)]
    pub step_count: Option<i32>,
    #[serde(default)]
    pub heart_rate: Option<i32>,
}

/// BMI is derived at write time from weight (kg) and height (m).
/// Returns None when either input is missing or height is zero.
pub fn calc_bmi(weight_kg: Option<f64>, height_m: Option<f64>) -> Option<f64> {
    match (weight_kg, height_m) {
        (Some(weight), Some(height)) if height > 0.0 => {
            Some((weight / (height * height) * 100.0).round() / 100.0)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bmi_rounds_to_two_decimals() {
        assert_eq!(calc_bmi(Some(70.0), Some(1.75)), Some(22.86));
        assert_eq!(calc_bmi(Some(80.0), Some(2.0)), Some(20.0));
    }

    #[test]
    fn bmi_requires_both_measurements() {
        assert_eq!(calc_bmi(Some(70.0), None), None);
        assert_eq!(calc_bmi(None, Some(1.75)), None);
        assert_eq!(calc_bmi(None, None), None);
    }

    #[test]
    fn bmi_guards_zero_height() {
        assert_eq!(calc_bmi(Some(70.0), Some(0.0)), None);
    }
}
