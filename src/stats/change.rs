use crate::models::health_stat::HealthStatRecord;
use crate::stats::period::DateRange;

/// First/last health measurement in a range and the deltas between them.
/// Deltas are null unless the endpoints are two distinct records that both
/// carry the field.
#[derive(Debug)]
pub struct ChangeReport<'a> {
    pub first: Option<&'a HealthStatRecord>,
    pub last: Option<&'a HealthStatRecord>,
    pub weight_change: Option<f64>,
    pub height_change: Option<f64>,
}

/// Pick the range's endpoint records. On a shared earliest instant the first
/// written record wins; on a shared latest instant the most recently written
/// one wins.
pub fn track<'a>(records: &'a [HealthStatRecord], range: &DateRange) -> ChangeReport<'a> {
    let in_range = || {
        records
            .iter()
            .filter(|r| range.contains(r.recorded_at.date_naive()))
    };
    let first = in_range().min_by_key(|r| (r.recorded_at, r.seq));
    let last = in_range().max_by_key(|r| (r.recorded_at, r.seq));

    let (weight_change, height_change) = match (first, last) {
        (Some(first), Some(last)) if first.seq != last.seq => (
            delta(first.weight_kg, last.weight_kg),
            delta(first.height_m, last.height_m),
        ),
        _ => (None, None),
    };

    ChangeReport {
        first,
        last,
        weight_change,
        height_change,
    }
}

fn delta(first: Option<f64>, last: Option<f64>) -> Option<f64> {
    match (first, last) {
        (Some(first), Some(last)) => Some(round2(last - first)),
        _ => None,
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn range() -> DateRange {
        DateRange {
            start: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
        }
    }

    fn record(day: u32, seq: i64, weight: Option<f64>, height: Option<f64>) -> HealthStatRecord {
        HealthStatRecord {
            id: Uuid::new_v4(),
            seq,
            user_id: Uuid::new_v4(),
            recorded_at: NaiveDate::from_ymd_opt(2024, 2, day)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap()
                .and_utc(),
            weight_kg: weight,
            height_m: height,
            bmi: None,
            water_intake_l: 0.0,
            step_count: 0,
            heart_rate: None,
        }
    }

    #[test]
    fn empty_range_yields_all_nulls() {
        let report = track(&[], &range());
        assert!(report.first.is_none());
        assert!(report.last.is_none());
        assert_eq!(report.weight_change, None);
        assert_eq!(report.height_change, None);
    }

    #[test]
    fn single_record_has_no_deltas() {
        let records = [record(10, 1, Some(70.0), Some(1.75))];
        let report = track(&records, &range());
        assert_eq!(report.first.unwrap().seq, 1);
        assert_eq!(report.last.unwrap().seq, 1);
        assert_eq!(report.weight_change, None);
        assert_eq!(report.height_change, None);
    }

    #[test]
    fn weight_delta_between_two_records() {
        let records = [
            record(2, 1, Some(70.0), Some(1.75)),
            record(20, 2, Some(72.5), Some(1.75)),
        ];
        let report = track(&records, &range());
        assert_eq!(report.weight_change, Some(2.5));
        assert_eq!(report.height_change, Some(0.0));
    }

    #[test]
    fn delta_is_rounded_to_two_decimals() {
        let records = [
            record(2, 1, Some(70.0), None),
            record(20, 2, Some(72.125), None),
        ];
        let report = track(&records, &range());
        assert_eq!(report.weight_change, Some(2.13));
        assert_eq!(report.height_change, None);
    }

    #[test]
    fn same_instant_ties_split_first_low_last_high() {
        let mut a = record(10, 5, Some(68.0), None);
        let mut b = record(10, 6, Some(69.0), None);
        b.recorded_at = a.recorded_at;
        a.weight_kg = Some(68.0);
        b.weight_kg = Some(69.0);
        let records = [b.clone(), a.clone()];
        let report = track(&records, &range());
        assert_eq!(report.first.unwrap().seq, 5);
        assert_eq!(report.last.unwrap().seq, 6);
        assert_eq!(report.weight_change, Some(1.0));
    }

    #[test]
    fn records_outside_range_are_not_endpoints() {
        let mut early = record(1, 1, Some(60.0), None);
        early.recorded_at = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
            .and_utc();
        let records = [early, record(5, 2, Some(70.0), None), record(25, 3, Some(71.0), None)];
        let report = track(&records, &range());
        assert_eq!(report.first.unwrap().seq, 2);
        assert_eq!(report.weight_change, Some(1.0));
    }

    #[test]
    fn missing_endpoint_field_nulls_that_delta_only() {
        let records = [
            record(2, 1, None, Some(1.70)),
            record(20, 2, Some(72.5), Some(1.72)),
        ];
        let report = track(&records, &range());
        assert_eq!(report.weight_change, None);
        assert_eq!(report.height_change, Some(0.02));
    }
}
