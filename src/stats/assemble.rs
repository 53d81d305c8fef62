use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::health_stat::HealthStatRecord;
use crate::models::user::{UserRole, UserSummaryRecord};
use crate::models::workout::WorkoutSessionRecord;
use crate::stats::bucket::{average, latest_per_bucket, sum_per_bucket, SeriesPoint};
use crate::stats::change;
use crate::stats::error::StatsError;
use crate::stats::period::{Period, ResolvedPeriod};

/// Identity block echoed back with every statistics response.
#[derive(Debug, Clone, Serialize)]
pub struct TargetUser {
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub role: UserRole,
}

impl From<&UserSummaryRecord> for TargetUser {
    fn from(record: &UserSummaryRecord) -> Self {
        Self {
            id: record.id,
            username: record.username.clone(),
            full_name: record.full_name(),
            role: record.role,
        }
    }
}

/// Decide whose data a statistics request is about. Naming a target user
/// requires the viewer capability; the engine only sees that boolean, never
/// the caller's role.
pub fn resolve_target(
    requester: Uuid,
    requested: Option<Uuid>,
    can_view_others: bool,
) -> Result<Uuid, StatsError> {
    match requested {
        None => Ok(requester),
        Some(target) if can_view_others => Ok(target),
        Some(_) => Err(StatsError::Forbidden),
    }
}

#[derive(Debug, Serialize)]
pub struct HealthSummary {
    pub avg_weight: Option<f64>,
    pub avg_bmi: Option<f64>,
    pub avg_water_intake: Option<f64>,
    pub avg_step_count: Option<f64>,
    pub avg_heart_rate: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct StatisticsReport {
    pub target_user: TargetUser,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub period: Period,
    pub total_calories_burned: Vec<f64>,
    pub total_time: Vec<i64>,
    pub total_sessions: i64,
    pub weight_data: Vec<Option<f64>>,
    pub bmi_data: Vec<Option<f64>>,
    pub water_intake_data: Vec<Option<f64>>,
    pub step_count_data: Vec<Option<f64>>,
    pub heart_rate_data: Vec<Option<f64>>,
    pub health_summary: HealthSummary,
    pub weight_change: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct FirstRecord {
    pub date: DateTime<Utc>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct LastRecord {
    pub date: DateTime<Utc>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ChangeDeltas {
    pub weight_change: Option<f64>,
    pub height_change: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct TrackChangesReport {
    pub target_user: TargetUser,
    pub period: Period,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    pub first_record: Option<FirstRecord>,
    pub last_record: Option<LastRecord>,
    pub changes: ChangeDeltas,
}

/// Assemble the full statistics payload for one resolved period. Pure:
/// records in, report out, nothing mutated, no clock read.
pub fn build_statistics(
    target: TargetUser,
    resolved: &ResolvedPeriod,
    sessions: &[WorkoutSessionRecord],
    health: &[HealthStatRecord],
) -> StatisticsReport {
    // Soft-deleted sessions and out-of-range rows never contribute, whatever
    // the storage layer handed over.
    let sessions: Vec<&WorkoutSessionRecord> = sessions
        .iter()
        .filter(|s| s.is_active && resolved.range.contains(s.updated_at.date_naive()))
        .collect();

    let calories: Vec<SeriesPoint> = sessions
        .iter()
        .map(|s| SeriesPoint {
            recorded_at: s.updated_at,
            seq: 0,
            value: Some(s.calories_burned),
        })
        .collect();
    let durations: Vec<SeriesPoint> = sessions
        .iter()
        .map(|s| SeriesPoint {
            recorded_at: s.updated_at,
            seq: 0,
            value: Some(s.total_duration_min as f64),
        })
        .collect();

    let weight = snapshot_points(health, |h| h.weight_kg);
    let bmi = snapshot_points(health, |h| h.bmi);
    let water = snapshot_points(health, |h| Some(h.water_intake_l));
    let steps = snapshot_points(health, |h| Some(h.step_count as f64));
    let heart_rate = snapshot_points(health, |h| h.heart_rate.map(f64::from));

    let in_range = |points: &[SeriesPoint]| -> Vec<SeriesPoint> {
        points
            .iter()
            .copied()
            .filter(|p| resolved.range.contains(p.recorded_at.date_naive()))
            .collect()
    };

    let changes = change::track(health, &resolved.range);

    StatisticsReport {
        start_date: resolved.range.start,
        end_date: resolved.range.end,
        period: resolved.period,
        total_calories_burned: sum_per_bucket(resolved, &calories),
        total_time: sum_per_bucket(resolved, &durations)
            .into_iter()
            .map(|minutes| minutes.round() as i64)
            .collect(),
        total_sessions: sessions.len() as i64,
        weight_data: latest_per_bucket(resolved, &weight),
        bmi_data: latest_per_bucket(resolved, &bmi),
        water_intake_data: latest_per_bucket(resolved, &water),
        step_count_data: latest_per_bucket(resolved, &steps),
        heart_rate_data: latest_per_bucket(resolved, &heart_rate),
        health_summary: HealthSummary {
            avg_weight: average(&in_range(&weight)),
            avg_bmi: average(&in_range(&bmi)),
            avg_water_intake: average(&in_range(&water)),
            avg_step_count: average(&in_range(&steps)),
            avg_heart_rate: average(&in_range(&heart_rate)),
        },
        weight_change: changes.weight_change,
        target_user: target,
    }
}

/// Assemble the track-changes payload: the range's endpoint measurements and
/// their deltas.
pub fn build_track_changes(
    target: TargetUser,
    resolved: &ResolvedPeriod,
    health: &[HealthStatRecord],
) -> TrackChangesReport {
    let report = change::track(health, &resolved.range);
    TrackChangesReport {
        target_user: target,
        period: resolved.period,
        start_date: resolved.range.start,
        end_date: resolved.range.end,
        year: match resolved.period {
            Period::Yearly => Some(resolved.range.start.year()),
            _ => None,
        },
        first_record: report.first.map(|r| FirstRecord {
            date: r.recorded_at,
            weight: r.weight_kg,
            height: r.height_m,
        }),
        last_record: report.last.map(|r| LastRecord {
            date: r.recorded_at,
            weight: r.weight_kg,
            height: r.height_m,
            id: r.id,
        }),
        changes: ChangeDeltas {
            weight_change: report.weight_change,
            height_change: report.height_change,
        },
    }
}

fn snapshot_points(
    health: &[HealthStatRecord],
    field: impl Fn(&HealthStatRecord) -> Option<f64>,
) -> Vec<SeriesPoint> {
    health
        .iter()
        .map(|h| SeriesPoint {
            recorded_at: h.recorded_at,
            seq: h.seq,
            value: field(h),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_target_defaults_to_requester() {
        let me = Uuid::new_v4();
        assert_eq!(resolve_target(me, None, false).unwrap(), me);
    }

    #[test]
    fn named_target_requires_the_viewer_capability() {
        let me = Uuid::new_v4();
        let client = Uuid::new_v4();
        assert_eq!(resolve_target(me, Some(client), true).unwrap(), client);
        assert_eq!(
            resolve_target(me, Some(client), false),
            Err(StatsError::Forbidden)
        );
    }

    #[test]
    fn naming_any_target_without_capability_is_forbidden() {
        // Even the caller's own id: presence of the parameter gates on role.
        let me = Uuid::new_v4();
        assert_eq!(resolve_target(me, Some(me), false), Err(StatsError::Forbidden));
    }
}
