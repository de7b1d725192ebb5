//! Calendar-bucket alignment: the start of the year/month/week/day/… that
//! contains a given datetime.
//!
//! These are the primitives the chunking and windowing generators are driven
//! by. All of them resolve through the local calendar and return `Option`:
//! `None` marks a pathological local time (a zone transition landing exactly
//! on the computed boundary), mirroring chrono's `.single()` discipline.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Timelike};
use serde::Serialize;

// ── Configurable week start ─────────────────────────────────────────────────

/// Which day begins a week for [`start_of_week_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum WeekStart {
    /// ISO 8601 standard (Monday = day 0 of the week).
    #[default]
    Monday,
    /// US/Canada convention (Sunday = day 0 of the week).
    Sunday,
}

/// How many days `dt`'s weekday is from the week-start day.
fn days_from_week_start<Tz: TimeZone>(dt: &DateTime<Tz>, week_start: WeekStart) -> i64 {
    match week_start {
        WeekStart::Monday => dt.weekday().num_days_from_monday() as i64,
        WeekStart::Sunday => dt.weekday().num_days_from_sunday() as i64,
    }
}

// ── Date-level boundaries ───────────────────────────────────────────────────

fn local_midnight<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Option<DateTime<Tz>> {
    let naive = date.and_hms_opt(0, 0, 0)?;
    tz.from_local_datetime(&naive).single()
}

/// Midnight on January 1 of `dt`'s year.
pub fn start_of_year<Tz: TimeZone>(dt: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    let date = NaiveDate::from_ymd_opt(dt.year(), 1, 1)?;
    local_midnight(date, &dt.timezone())
}

/// Midnight on the first day of `dt`'s month.
pub fn start_of_month<Tz: TimeZone>(dt: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    let date = NaiveDate::from_ymd_opt(dt.year(), dt.month(), 1)?;
    local_midnight(date, &dt.timezone())
}

/// Midnight on the first day of `dt`'s ISO week (Monday).
pub fn start_of_week<Tz: TimeZone>(dt: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    start_of_week_with(dt, WeekStart::Monday)
}

/// Midnight on the first day of `dt`'s week under the given convention.
pub fn start_of_week_with<Tz: TimeZone>(
    dt: &DateTime<Tz>,
    week_start: WeekStart,
) -> Option<DateTime<Tz>> {
    let date = dt.date_naive() - Duration::days(days_from_week_start(dt, week_start));
    local_midnight(date, &dt.timezone())
}

/// Midnight of `dt`'s day.
pub fn start_of_day<Tz: TimeZone>(dt: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    local_midnight(dt.date_naive(), &dt.timezone())
}

// ── Time-level boundaries ───────────────────────────────────────────────────

pub fn start_of_hour<Tz: TimeZone>(dt: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    dt.with_minute(0)?.with_second(0)?.with_nanosecond(0)
}

pub fn start_of_minute<Tz: TimeZone>(dt: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    dt.with_second(0)?.with_nanosecond(0)
}

pub fn start_of_second<Tz: TimeZone>(dt: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    dt.with_nanosecond(0)
}

/// Truncates sub-millisecond precision, leaving the millisecond boundary.
pub fn start_of_millisecond<Tz: TimeZone>(dt: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    let nanos = dt.nanosecond();
    dt.with_nanosecond(nanos - nanos % 1_000_000)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use chrono_tz::Tz;

    fn anchor() -> DateTime<Utc> {
        // Wednesday, February 18, 2026, 14:30:45.123456789 UTC
        Utc.with_ymd_and_hms(2026, 2, 18, 14, 30, 45)
            .unwrap()
            .with_nanosecond(123_456_789)
            .unwrap()
    }

    #[test]
    fn test_start_of_year() {
        let start = start_of_year(&anchor()).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_start_of_month() {
        let start = start_of_month(&anchor()).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_start_of_week_monday_and_sunday() {
        // Wed Feb 18 → ISO week starts Mon Feb 16, US week Sun Feb 15.
        let monday = start_of_week(&anchor()).unwrap();
        assert_eq!(monday, Utc.with_ymd_and_hms(2026, 2, 16, 0, 0, 0).unwrap());
        let sunday = start_of_week_with(&anchor(), WeekStart::Sunday).unwrap();
        assert_eq!(sunday, Utc.with_ymd_and_hms(2026, 2, 15, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_start_of_day_in_zone() {
        let eastern: Tz = "America/New_York".parse().unwrap();
        let local = anchor().with_timezone(&eastern);
        let start = start_of_day(&local).unwrap();
        assert_eq!(start.hour(), 0);
        assert_eq!(start.date_naive(), local.date_naive());
        // Midnight Eastern is not midnight UTC.
        assert_ne!(start.with_timezone(&Utc).hour(), 0);
    }

    #[test]
    fn test_time_level_truncation() {
        let dt = anchor();
        assert_eq!(
            start_of_hour(&dt).unwrap(),
            Utc.with_ymd_and_hms(2026, 2, 18, 14, 0, 0).unwrap()
        );
        assert_eq!(
            start_of_minute(&dt).unwrap(),
            Utc.with_ymd_and_hms(2026, 2, 18, 14, 30, 0).unwrap()
        );
        assert_eq!(
            start_of_second(&dt).unwrap(),
            Utc.with_ymd_and_hms(2026, 2, 18, 14, 30, 45).unwrap()
        );
        assert_eq!(
            start_of_millisecond(&dt).unwrap().nanosecond(),
            123_000_000
        );
    }

    #[test]
    fn test_week_start_serializes_as_name() {
        assert_eq!(
            serde_json::to_value(WeekStart::Monday).unwrap(),
            serde_json::json!("Monday")
        );
        assert_eq!(WeekStart::default(), WeekStart::Monday);
    }

    #[test]
    fn test_already_aligned_is_identity() {
        let midnight = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
        assert_eq!(start_of_month(&midnight).unwrap(), midnight);
        assert_eq!(start_of_day(&midnight).unwrap(), midnight);
    }
}
