use chrono::{DateTime, Utc};

use crate::stats::period::ResolvedPeriod;

/// One observation feeding a bucketed series: the event time, a total
/// insertion order used for tie-breaks, and the (possibly absent) value.
#[derive(Debug, Clone, Copy)]
pub struct SeriesPoint {
    pub recorded_at: DateTime<Utc>,
    pub seq: i64,
    pub value: Option<f64>,
}

/// Sum rule: additive quantities where an empty bucket is a true zero.
pub fn sum_per_bucket(resolved: &ResolvedPeriod, points: &[SeriesPoint]) -> Vec<f64> {
    let mut totals = vec![0.0; resolved.buckets.len()];
    for point in points {
        if let Some(index) = resolved.bucket_index(point.recorded_at.date_naive()) {
            totals[index] += point.value.unwrap_or(0.0);
        }
    }
    totals
}

/// Latest-by-recency rule: point-in-time snapshots where the newest record in
/// a bucket is authoritative and an empty bucket is unknown, not zero.
/// Ties on event time go to the highest insertion order, so the output is
/// identical for any input ordering.
pub fn latest_per_bucket(resolved: &ResolvedPeriod, points: &[SeriesPoint]) -> Vec<Option<f64>> {
    let mut picked: Vec<Option<(DateTime<Utc>, i64, Option<f64>)>> =
        vec![None; resolved.buckets.len()];
    for point in points {
        if let Some(index) = resolved.bucket_index(point.recorded_at.date_naive()) {
            let newer = match picked[index] {
                Some((at, seq, _)) => (point.recorded_at, point.seq) > (at, seq),
                None => true,
            };
            if newer {
                picked[index] = Some((point.recorded_at, point.seq, point.value));
            }
        }
    }
    picked
        .into_iter()
        .map(|slot| slot.and_then(|(_, _, value)| value))
        .collect()
}

/// Average rule: one scalar over the whole range, ignoring absent values.
pub fn average(points: &[SeriesPoint]) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for point in points {
        if let Some(value) = point.value {
            sum += value;
            count += 1;
        }
    }
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::period::{resolve, Period};
    use chrono::NaiveDate;

    fn resolved_february() -> ResolvedPeriod {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        resolve(Period::Monthly, Some("2024-02"), today).unwrap()
    }

    fn point(day: u32, hour: u32, seq: i64, value: Option<f64>) -> SeriesPoint {
        SeriesPoint {
            recorded_at: NaiveDate::from_ymd_opt(2024, 2, day)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap()
                .and_utc(),
            seq,
            value,
        }
    }

    #[test]
    fn sum_over_empty_input_is_all_zeros() {
        let resolved = resolved_february();
        let totals = sum_per_bucket(&resolved, &[]);
        assert_eq!(totals.len(), 29);
        assert!(totals.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn sum_accumulates_same_day_records() {
        let resolved = resolved_february();
        let points = [
            point(3, 8, 1, Some(200.0)),
            point(3, 19, 2, Some(150.0)),
            point(10, 12, 3, Some(50.0)),
        ];
        let totals = sum_per_bucket(&resolved, &points);
        assert_eq!(totals[2], 350.0);
        assert_eq!(totals[9], 50.0);
        assert_eq!(totals[0], 0.0);
    }

    #[test]
    fn latest_over_empty_input_is_all_nulls() {
        let resolved = resolved_february();
        let series = latest_per_bucket(&resolved, &[]);
        assert_eq!(series.len(), 29);
        assert!(series.iter().all(|v| v.is_none()));
    }

    #[test]
    fn latest_prefers_later_event_time_within_a_day() {
        let resolved = resolved_february();
        let points = [point(5, 7, 1, Some(70.0)), point(5, 21, 2, Some(71.5))];
        let series = latest_per_bucket(&resolved, &points);
        assert_eq!(series[4], Some(71.5));
    }

    #[test]
    fn latest_breaks_equal_timestamps_by_insertion_order() {
        let resolved = resolved_february();
        let points = [point(5, 9, 11, Some(68.0)), point(5, 9, 12, Some(69.0))];
        let series = latest_per_bucket(&resolved, &points);
        assert_eq!(series[4], Some(69.0));

        // Same records, reversed arrival order: identical output.
        let reversed = [points[1], points[0]];
        assert_eq!(latest_per_bucket(&resolved, &reversed), series);
    }

    #[test]
    fn latest_keeps_null_when_newest_record_lacks_the_field() {
        // The newest record is authoritative even when its value is absent.
        let resolved = resolved_february();
        let points = [point(5, 7, 1, Some(70.0)), point(5, 21, 2, None)];
        let series = latest_per_bucket(&resolved, &points);
        assert_eq!(series[4], None);
    }

    #[test]
    fn out_of_range_points_are_ignored() {
        let resolved = resolved_february();
        let outside = SeriesPoint {
            recorded_at: NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
                .and_utc(),
            seq: 1,
            value: Some(500.0),
        };
        assert!(sum_per_bucket(&resolved, &[outside]).iter().all(|v| *v == 0.0));
        assert!(latest_per_bucket(&resolved, &[outside])
            .iter()
            .all(|v| v.is_none()));
    }

    #[test]
    fn monthly_buckets_for_yearly_period() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let resolved = resolve(Period::Yearly, Some("2023"), today).unwrap();
        let points = [
            SeriesPoint {
                recorded_at: NaiveDate::from_ymd_opt(2023, 1, 10)
                    .unwrap()
                    .and_hms_opt(10, 0, 0)
                    .unwrap()
                    .and_utc(),
                seq: 1,
                value: Some(30.0),
            },
            SeriesPoint {
                recorded_at: NaiveDate::from_ymd_opt(2023, 1, 25)
                    .unwrap()
                    .and_hms_opt(10, 0, 0)
                    .unwrap()
                    .and_utc(),
                seq: 2,
                value: Some(45.0),
            },
        ];
        let totals = sum_per_bucket(&resolved, &points);
        assert_eq!(totals.len(), 12);
        assert_eq!(totals[0], 75.0);
        assert!(totals[1..].iter().all(|v| *v == 0.0));
    }

    #[test]
    fn average_ignores_missing_values() {
        let points = [
            point(1, 8, 1, Some(70.0)),
            point(2, 8, 2, None),
            point(3, 8, 3, Some(72.0)),
        ];
        assert_eq!(average(&points), Some(71.0));
    }

    #[test]
    fn average_of_no_values_is_null() {
        assert_eq!(average(&[]), None);
        let points = [point(1, 8, 1, None)];
        assert_eq!(average(&points), None);
    }
}
