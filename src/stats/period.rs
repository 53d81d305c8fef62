use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::stats::error::StatsError;

/// Selector years outside this window are rejected as implausible.
const MIN_YEAR: i32 = 1970;
const MAX_YEAR: i32 = 9999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Weekly,
    Monthly,
    Yearly,
}

impl Period {
    pub fn parse(value: &str) -> Result<Self, StatsError> {
        match value {
            "weekly" => Ok(Period::Weekly),
            "monthly" => Ok(Period::Monthly),
            "yearly" => Ok(Period::Yearly),
            other => Err(StatsError::InvalidPeriod(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
            Period::Yearly => "yearly",
        }
    }
}

/// Inclusive date range. Invariants: `start <= end` and `end` never lies
/// after the `today` the range was resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, day: NaiveDate) -> bool {
        day >= self.start && day <= self.end
    }

    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketUnit {
    Day,
    Month,
}

/// A period request resolved against a concrete `today`: the date range plus
/// the ordered bucket keys every series aligns to.
#[derive(Debug, Clone)]
pub struct ResolvedPeriod {
    pub period: Period,
    pub range: DateRange,
    pub unit: BucketUnit,
    pub buckets: Vec<NaiveDate>,
}

impl ResolvedPeriod {
    /// Index of the bucket a calendar day falls into, or None when the day
    /// lies outside the resolved range.
    pub fn bucket_index(&self, day: NaiveDate) -> Option<usize> {
        if !self.range.contains(day) {
            return None;
        }
        match self.unit {
            BucketUnit::Day => Some((day - self.range.start).num_days() as usize),
            BucketUnit::Month => {
                let months = (day.year() - self.range.start.year()) * 12
                    + day.month() as i32
                    - self.range.start.month() as i32;
                Some(months as usize)
            }
        }
    }
}

/// Resolve a period request into a concrete range and bucket keys.
/// The range never extends past `today`, even when an explicit selector
/// names the current (still running) week, month or year.
pub fn resolve(
    period: Period,
    selector: Option<&str>,
    today: NaiveDate,
) -> Result<ResolvedPeriod, StatsError> {
    match period {
        Period::Weekly => resolve_weekly(selector, today),
        Period::Monthly => resolve_monthly(selector, today),
        Period::Yearly => resolve_yearly(selector, today),
    }
}

fn resolve_weekly(selector: Option<&str>, today: NaiveDate) -> Result<ResolvedPeriod, StatsError> {
    let monday = match selector {
        Some(sel) => {
            let (year, week) = parse_week_selector(sel)?;
            // ISO-8601 week dates: week 1 is the week containing Jan 4.
            NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)
                .ok_or_else(|| StatsError::InvalidSelector(sel.to_string()))?
        }
        None => today - Duration::days(today.weekday().num_days_from_monday() as i64),
    };
    if monday > today {
        return Err(StatsError::InvalidSelector(
            selector.unwrap_or("").to_string(),
        ));
    }
    let end = (monday + Duration::days(6)).min(today);
    let range = DateRange { start: monday, end };
    Ok(ResolvedPeriod {
        period: Period::Weekly,
        unit: BucketUnit::Day,
        buckets: days_of(&range),
        range,
    })
}

fn resolve_monthly(selector: Option<&str>, today: NaiveDate) -> Result<ResolvedPeriod, StatsError> {
    let (year, month) = match selector {
        Some(sel) => parse_month_selector(sel)?,
        None => (today.year(), today.month()),
    };
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .expect("validated year and month form a valid first-of-month");
    if start > today {
        return Err(StatsError::InvalidSelector(
            selector.unwrap_or("").to_string(),
        ));
    }
    let end = last_day_of_month(year, month).min(today);
    let range = DateRange { start, end };
    Ok(ResolvedPeriod {
        period: Period::Monthly,
        unit: BucketUnit::Day,
        buckets: days_of(&range),
        range,
    })
}

fn resolve_yearly(selector: Option<&str>, today: NaiveDate) -> Result<ResolvedPeriod, StatsError> {
    let year = match selector {
        Some(sel) => parse_year_selector(sel)?,
        None => today.year(),
    };
    let start = NaiveDate::from_ymd_opt(year, 1, 1).expect("validated year has a Jan 1");
    if start > today {
        return Err(StatsError::InvalidSelector(
            selector.unwrap_or("").to_string(),
        ));
    }
    let end = NaiveDate::from_ymd_opt(year, 12, 31)
        .expect("validated year has a Dec 31")
        .min(today);
    let buckets = (1..=12u32)
        .map(|month| {
            NaiveDate::from_ymd_opt(year, month, 1).expect("validated year has 12 month starts")
        })
        .take_while(|first| *first <= end)
        .collect();
    Ok(ResolvedPeriod {
        period: Period::Yearly,
        unit: BucketUnit::Month,
        range: DateRange { start, end },
        buckets,
    })
}

fn days_of(range: &DateRange) -> Vec<NaiveDate> {
    range
        .start
        .iter_days()
        .take_while(|day| *day <= range.end)
        .collect()
}

fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .expect("first of next month is always a valid date")
        .pred_opt()
        .expect("first of next month always has a predecessor")
}

/// `YYYY-Www`, e.g. `2024-W01`.
fn parse_week_selector(sel: &str) -> Result<(i32, u32), StatsError> {
    let invalid = || StatsError::InvalidSelector(sel.to_string());
    let (year, week) = sel.split_once("-W").ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let week: u32 = week.parse().map_err(|_| invalid())?;
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) || !(1..=53).contains(&week) {
        return Err(invalid());
    }
    Ok((year, week))
}

/// `YYYY-MM`, e.g. `2024-02`.
fn parse_month_selector(sel: &str) -> Result<(i32, u32), StatsError> {
    let invalid = || StatsError::InvalidSelector(sel.to_string());
    let (year, month) = sel.split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) || !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((year, month))
}

/// `YYYY`.
fn parse_year_selector(sel: &str) -> Result<i32, StatsError> {
    let invalid = || StatsError::InvalidSelector(sel.to_string());
    let year: i32 = sel.parse().map_err(|_| invalid())?;
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(invalid());
    }
    Ok(year)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn weekly_selector_resolves_to_monday() {
        let resolved = resolve(Period::Weekly, Some("2024-W01"), date(2024, 6, 1)).unwrap();
        assert_eq!(resolved.range.start, date(2024, 1, 1));
        assert_eq!(resolved.range.end, date(2024, 1, 7));
        assert_eq!(resolved.range.start.weekday(), Weekday::Mon);
        assert_eq!(resolved.buckets.len(), 7);
    }

    #[test]
    fn weekly_week_one_can_start_in_previous_calendar_year() {
        // ISO week 2025-W01 starts on Monday Dec 30, 2024.
        let resolved = resolve(Period::Weekly, Some("2025-W01"), date(2025, 6, 1)).unwrap();
        assert_eq!(resolved.range.start, date(2024, 12, 30));
        assert_eq!(resolved.range.end, date(2025, 1, 5));
    }

    #[test]
    fn weekly_week_53_exists_only_in_long_years() {
        // 2020 has 53 ISO weeks, 2021 does not.
        let resolved = resolve(Period::Weekly, Some("2020-W53"), date(2021, 6, 1)).unwrap();
        assert_eq!(resolved.range.start, date(2020, 12, 28));
        assert!(matches!(
            resolve(Period::Weekly, Some("2021-W53"), date(2022, 6, 1)),
            Err(StatsError::InvalidSelector(_))
        ));
    }

    #[test]
    fn weekly_defaults_to_current_week_clamped_to_today() {
        // Wednesday Jan 3, 2024: week runs Mon Jan 1 .. today.
        let resolved = resolve(Period::Weekly, None, date(2024, 1, 3)).unwrap();
        assert_eq!(resolved.range.start, date(2024, 1, 1));
        assert_eq!(resolved.range.end, date(2024, 1, 3));
        assert_eq!(resolved.buckets.len(), 3);
    }

    #[test]
    fn weekly_explicit_current_week_is_clamped_to_today() {
        let resolved = resolve(Period::Weekly, Some("2024-W01"), date(2024, 1, 3)).unwrap();
        assert_eq!(resolved.range.end, date(2024, 1, 3));
    }

    #[test]
    fn weekly_start_is_always_monday_and_span_at_most_a_week() {
        for week in 1..=52u32 {
            let selector = format!("2023-W{:02}", week);
            let resolved = resolve(Period::Weekly, Some(&selector), date(2024, 6, 1)).unwrap();
            assert_eq!(resolved.range.start.weekday(), Weekday::Mon);
            assert!(resolved.range.num_days() <= 7);
            assert!(resolved.range.start <= resolved.range.end);
        }
    }

    #[test]
    fn weekly_rejects_future_week() {
        assert!(matches!(
            resolve(Period::Weekly, Some("2024-W20"), date(2024, 1, 3)),
            Err(StatsError::InvalidSelector(_))
        ));
    }

    #[test]
    fn weekly_rejects_malformed_selectors() {
        for sel in ["2024W01", "2024-W", "abcd-W02", "2024-Wxx", "2024-W00", "2024-W54"] {
            assert!(
                matches!(
                    resolve(Period::Weekly, Some(sel), date(2024, 6, 1)),
                    Err(StatsError::InvalidSelector(_))
                ),
                "selector {:?} should be rejected",
                sel
            );
        }
    }

    #[test]
    fn monthly_spans_whole_past_month() {
        let resolved = resolve(Period::Monthly, Some("2023-11"), date(2024, 6, 1)).unwrap();
        assert_eq!(resolved.range.start, date(2023, 11, 1));
        assert_eq!(resolved.range.end, date(2023, 11, 30));
        assert_eq!(resolved.buckets.len(), 30);
    }

    #[test]
    fn monthly_honors_leap_february() {
        let leap = resolve(Period::Monthly, Some("2024-02"), date(2024, 6, 1)).unwrap();
        assert_eq!(leap.range.num_days(), 29);
        let common = resolve(Period::Monthly, Some("2023-02"), date(2024, 6, 1)).unwrap();
        assert_eq!(common.range.num_days(), 28);
    }

    #[test]
    fn monthly_clamps_current_month_to_today() {
        let resolved = resolve(Period::Monthly, Some("2024-06"), date(2024, 6, 10)).unwrap();
        assert_eq!(resolved.range.start, date(2024, 6, 1));
        assert_eq!(resolved.range.end, date(2024, 6, 10));
        assert_eq!(resolved.buckets.len(), 10);
    }

    #[test]
    fn monthly_defaults_to_current_month() {
        let resolved = resolve(Period::Monthly, None, date(2024, 2, 15)).unwrap();
        assert_eq!(resolved.range.start, date(2024, 2, 1));
        assert_eq!(resolved.range.end, date(2024, 2, 15));
    }

    #[test]
    fn monthly_rejects_bad_selectors() {
        for sel in ["2024-13", "2024-00", "2024", "03-2024", "2024-3x"] {
            assert!(matches!(
                resolve(Period::Monthly, Some(sel), date(2024, 6, 1)),
                Err(StatsError::InvalidSelector(_))
            ));
        }
        assert!(matches!(
            resolve(Period::Monthly, Some("2024-07"), date(2024, 6, 1)),
            Err(StatsError::InvalidSelector(_))
        ));
    }

    #[test]
    fn yearly_past_year_has_twelve_month_buckets() {
        let resolved = resolve(Period::Yearly, Some("2023"), date(2024, 6, 1)).unwrap();
        assert_eq!(resolved.range.start, date(2023, 1, 1));
        assert_eq!(resolved.range.end, date(2023, 12, 31));
        assert_eq!(resolved.buckets.len(), 12);
        assert_eq!(resolved.buckets[0], date(2023, 1, 1));
        assert_eq!(resolved.buckets[11], date(2023, 12, 1));
    }

    #[test]
    fn yearly_current_year_stops_at_current_month() {
        let resolved = resolve(Period::Yearly, Some("2024"), date(2024, 4, 15)).unwrap();
        assert_eq!(resolved.range.end, date(2024, 4, 15));
        assert_eq!(resolved.buckets.len(), 4);
        assert_eq!(resolved.buckets[3], date(2024, 4, 1));
    }

    #[test]
    fn yearly_rejects_future_year_and_garbage() {
        assert!(matches!(
            resolve(Period::Yearly, Some("2025"), date(2024, 6, 1)),
            Err(StatsError::InvalidSelector(_))
        ));
        assert!(matches!(
            resolve(Period::Yearly, Some("20x4"), date(2024, 6, 1)),
            Err(StatsError::InvalidSelector(_))
        ));
        assert!(matches!(
            resolve(Period::Yearly, Some("1800"), date(2024, 6, 1)),
            Err(StatsError::InvalidSelector(_))
        ));
    }

    #[test]
    fn period_parse_rejects_unknown_values() {
        assert!(matches!(
            Period::parse("daily"),
            Err(StatsError::InvalidPeriod(_))
        ));
        assert_eq!(Period::parse("weekly").unwrap(), Period::Weekly);
    }

    #[test]
    fn day_bucket_index_is_offset_from_start() {
        let resolved = resolve(Period::Monthly, Some("2024-02"), date(2024, 6, 1)).unwrap();
        assert_eq!(resolved.bucket_index(date(2024, 2, 1)), Some(0));
        assert_eq!(resolved.bucket_index(date(2024, 2, 29)), Some(28));
        assert_eq!(resolved.bucket_index(date(2024, 3, 1)), None);
    }

    #[test]
    fn month_bucket_index_counts_months() {
        let resolved = resolve(Period::Yearly, Some("2023"), date(2024, 6, 1)).unwrap();
        assert_eq!(resolved.bucket_index(date(2023, 1, 15)), Some(0));
        assert_eq!(resolved.bucket_index(date(2023, 12, 31)), Some(11));
        assert_eq!(resolved.bucket_index(date(2024, 1, 1)), None);
    }
}
