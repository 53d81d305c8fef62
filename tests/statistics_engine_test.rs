use chrono::NaiveDate;
use uuid::Uuid;

use healthtrack_backend::models::health_stat::HealthStatRecord;
use healthtrack_backend::models::user::{UserRole, UserSummaryRecord};
use healthtrack_backend::models::workout::WorkoutSessionRecord;
use healthtrack_backend::stats::assemble::{
    build_statistics, build_track_changes, resolve_target, TargetUser,
};
use healthtrack_backend::stats::error::StatsError;
use healthtrack_backend::stats::period::{resolve, Period};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn target_user() -> TargetUser {
    let record = UserSummaryRecord {
        id: Uuid::new_v4(),
        username: "anna".to_string(),
        first_name: "Anna".to_string(),
        last_name: "Keller".to_string(),
        role: UserRole::User,
    };
    TargetUser::from(&record)
}

fn session(
    user_id: Uuid,
    year: i32,
    month: u32,
    day: u32,
    duration_min: i32,
    calories: f64,
) -> WorkoutSessionRecord {
    let at = date(year, month, day).and_hms_opt(17, 30, 0).unwrap().and_utc();
    WorkoutSessionRecord {
        id: Uuid::new_v4(),
        user_id,
        name: "Evening workout".to_string(),
        goal: None,
        scheduled_at: at,
        total_duration_min: duration_min,
        calories_burned: calories,
        is_active: true,
        created_at: at,
        updated_at: at,
    }
}

fn health_stat(
    user_id: Uuid,
    seq: i64,
    year: i32,
    month: u32,
    day: u32,
    weight: Option<f64>,
) -> HealthStatRecord {
    HealthStatRecord {
        id: Uuid::new_v4(),
        seq,
        user_id,
        recorded_at: date(year, month, day).and_hms_opt(8, 0, 0).unwrap().and_utc(),
        weight_kg: weight,
        height_m: Some(1.75),
        bmi: weight.map(|w| (w / (1.75 * 1.75) * 100.0).round() / 100.0),
        water_intake_l: 1.5,
        step_count: 8000,
        heart_rate: Some(62),
    }
}

#[test]
fn single_workout_lands_in_its_weekly_slot() {
    let target = target_user();
    let user_id = target.id;
    // 2024-W01 runs Mon Jan 1 .. Sun Jan 7
    let resolved = resolve(Period::Weekly, Some("2024-W01"), date(2024, 6, 1)).unwrap();
    let sessions = vec![session(user_id, 2024, 1, 2, 30, 200.0)];

    let report = build_statistics(target, &resolved, &sessions, &[]);

    assert_eq!(report.start_date, date(2024, 1, 1));
    assert_eq!(report.end_date, date(2024, 1, 7));
    assert_eq!(report.total_time, vec![0, 30, 0, 0, 0, 0, 0]);
    assert_eq!(
        report.total_calories_burned,
        vec![0.0, 200.0, 0.0, 0.0, 0.0, 0.0, 0.0]
    );
    assert_eq!(report.total_sessions, 1);
    // No measurements: every snapshot series is null, never zero
    assert!(report.weight_data.iter().all(|v| v.is_none()));
    assert!(report.heart_rate_data.iter().all(|v| v.is_none()));
    assert_eq!(report.health_summary.avg_weight, None);
    assert_eq!(report.weight_change, None);
}

#[test]
fn non_elevated_caller_cannot_name_a_target() {
    let requester = Uuid::new_v4();
    let other = Uuid::new_v4();
    assert_eq!(
        resolve_target(requester, Some(other), UserRole::User.can_view_client_stats()),
        Err(StatsError::Forbidden)
    );
    assert_eq!(
        resolve_target(requester, Some(other), UserRole::Coach.can_view_client_stats()),
        Ok(other)
    );
    assert_eq!(
        resolve_target(requester, Some(other), UserRole::Expert.can_view_client_stats()),
        Ok(other)
    );
}

#[test]
fn past_year_buckets_are_the_twelve_month_starts() {
    let target = target_user();
    let resolved = resolve(Period::Yearly, Some("2023"), date(2025, 3, 10)).unwrap();
    assert_eq!(resolved.buckets.len(), 12);

    let report = build_statistics(target, &resolved, &[], &[]);
    assert_eq!(report.total_time.len(), 12);
    assert_eq!(report.weight_data.len(), 12);
    assert!(report.total_time.iter().all(|v| *v == 0));
}

#[test]
fn same_day_records_resolve_to_the_latest_insert() {
    let target = target_user();
    let user_id = target.id;
    let resolved = resolve(Period::Weekly, Some("2024-W01"), date(2024, 6, 1)).unwrap();
    let mut first = health_stat(user_id, 10, 2024, 1, 3, Some(68.0));
    let second = health_stat(user_id, 11, 2024, 1, 3, Some(69.0));
    // Same event time: insertion order must decide
    first.recorded_at = second.recorded_at;

    let report = build_statistics(target, &resolved, &[], &[first, second]);
    assert_eq!(report.weight_data[2], Some(69.0));
}

#[test]
fn statistics_are_idempotent_for_a_fixed_today() {
    let target = target_user();
    let user_id = target.id;
    let resolved = resolve(Period::Monthly, Some("2024-02"), date(2024, 6, 1)).unwrap();
    let sessions = vec![
        session(user_id, 2024, 2, 5, 45, 310.0),
        session(user_id, 2024, 2, 5, 20, 150.0),
        session(user_id, 2024, 2, 17, 60, 480.0),
    ];
    let health = vec![
        health_stat(user_id, 1, 2024, 2, 2, Some(71.0)),
        health_stat(user_id, 2, 2024, 2, 20, Some(70.2)),
    ];

    let a = build_statistics(target.clone(), &resolved, &sessions, &health);
    let b = build_statistics(target, &resolved, &sessions, &health);

    assert_eq!(
        serde_json::to_value(&a).unwrap(),
        serde_json::to_value(&b).unwrap()
    );
}

#[test]
fn summary_averages_span_the_whole_range() {
    let target = target_user();
    let user_id = target.id;
    let resolved = resolve(Period::Monthly, Some("2024-02"), date(2024, 6, 1)).unwrap();
    let health = vec![
        health_stat(user_id, 1, 2024, 2, 2, Some(70.0)),
        health_stat(user_id, 2, 2024, 2, 20, Some(72.0)),
    ];

    let report = build_statistics(target, &resolved, &[], &health);
    assert_eq!(report.health_summary.avg_weight, Some(71.0));
    assert_eq!(report.health_summary.avg_water_intake, Some(1.5));
    assert_eq!(report.health_summary.avg_heart_rate, Some(62.0));
    // Deltas come from the endpoint records
    assert_eq!(report.weight_change, Some(2.0));
    // Snapshot buckets are only set on measurement days
    assert_eq!(report.weight_data[1], Some(70.0));
    assert_eq!(report.weight_data[19], Some(72.0));
    assert_eq!(report.weight_data[10], None);
}

#[test]
fn soft_deleted_sessions_never_count() {
    let target = target_user();
    let user_id = target.id;
    let resolved = resolve(Period::Weekly, Some("2024-W01"), date(2024, 6, 1)).unwrap();
    let mut deleted = session(user_id, 2024, 1, 2, 30, 200.0);
    deleted.is_active = false;

    let report = build_statistics(target, &resolved, &[deleted], &[]);
    assert_eq!(report.total_sessions, 0);
    assert!(report.total_time.iter().all(|v| *v == 0));
}

#[test]
fn track_changes_with_single_record_has_null_deltas() {
    let target = target_user();
    let user_id = target.id;
    let resolved = resolve(Period::Monthly, Some("2024-02"), date(2024, 6, 1)).unwrap();
    let health = vec![health_stat(user_id, 1, 2024, 2, 10, Some(70.0))];

    let report = build_track_changes(target, &resolved, &health);
    let first = report.first_record.expect("first record present");
    let last = report.last_record.expect("last record present");
    assert_eq!(first.date, last.date);
    assert_eq!(report.changes.weight_change, None);
    assert_eq!(report.changes.height_change, None);
}

#[test]
fn track_changes_reports_weight_delta() {
    let target = target_user();
    let user_id = target.id;
    let resolved = resolve(Period::Monthly, Some("2024-02"), date(2024, 6, 1)).unwrap();
    let health = vec![
        health_stat(user_id, 1, 2024, 2, 2, Some(70.0)),
        health_stat(user_id, 2, 2024, 2, 25, Some(72.5)),
    ];

    let report = build_track_changes(target, &resolved, &health);
    assert_eq!(report.changes.weight_change, Some(2.5));
    assert_eq!(report.changes.height_change, Some(0.0));
    assert_eq!(report.last_record.unwrap().weight, Some(72.5));
    assert!(report.year.is_none());
}

#[test]
fn yearly_track_changes_carries_the_year() {
    let target = target_user();
    let resolved = resolve(Period::Yearly, Some("2023"), date(2024, 6, 1)).unwrap();
    let report = build_track_changes(target, &resolved, &[]);
    assert_eq!(report.year, Some(2023));
    assert!(report.first_record.is_none());
    assert!(report.last_record.is_none());
}

#[test]
fn current_week_clamps_to_today_even_with_explicit_selector() {
    let target = target_user();
    let today = date(2024, 1, 3);
    let resolved = resolve(Period::Weekly, Some("2024-W01"), today).unwrap();
    let report = build_statistics(target, &resolved, &[], &[]);
    assert_eq!(report.end_date, today);
    assert_eq!(report.total_time.len(), 3);
}

#[test]
fn report_serializes_with_the_public_field_names() {
    let target = target_user();
    let resolved = resolve(Period::Weekly, Some("2024-W01"), date(2024, 6, 1)).unwrap();
    let report = build_statistics(target, &resolved, &[], &[]);
    let value = serde_json::to_value(&report).unwrap();

    for key in [
        "target_user",
        "start_date",
        "end_date",
        "period",
        "total_calories_burned",
        "total_time",
        "total_sessions",
        "weight_data",
        "bmi_data",
        "water_intake_data",
        "step_count_data",
        "heart_rate_data",
        "health_summary",
        "weight_change",
    ] {
        assert!(value.get(key).is_some(), "missing response key {key}");
    }
    assert_eq!(value["period"], "weekly");
    assert_eq!(value["target_user"]["role"], "user");
    assert_eq!(value["target_user"]["full_name"], "Anna Keller");
}
