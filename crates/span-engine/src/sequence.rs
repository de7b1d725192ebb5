//! Lazy calendar-aligned sequence generators over intervals.
//!
//! [`Interval::chunk`], [`Interval::windowed`], and
//! [`Interval::zip_with_next`] walk an interval in whole calendar units.
//! All three are driven by the **unit-aligned start** of the interval —
//! chunking by month begins at the first day of the month containing the
//! start, not at the start itself: these are calendar-bucket semantics, not
//! raw-span slicing.
//!
//! Advancing a cursor is calendar-aware: years and months go through
//! chrono's month arithmetic (day-of-month clamped), weeks and days keep the
//! local wall-clock time across DST transitions, and hours and finer use
//! fixed durations. The fixed-step enumerators ([`Interval::days`] and
//! friends) are the calendar-*unaligned* counterpart, built directly on
//! [`Progression`] over the half-open span.
//!
//! Everything here is pull-based and lazy; a sequence captures `start` and
//! `end` by value at construction and can be rebuilt (restarted) at any time
//! from its interval.

use std::fmt;
use std::iter::FusedIterator;
use std::str::FromStr;

use chrono::{DateTime, Days, Duration, Months, TimeZone};
use serde::Serialize;

use crate::align;
use crate::error::{Result, SpanError};
use crate::interval::Interval;
use crate::progression::{Progression, ProgressionIter};

// ── Calendar units ──────────────────────────────────────────────────────────

/// The calendar granularities the sequence generators understand: nothing
/// coarser than a year, nothing finer than a millisecond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CalendarUnit {
    Year,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
}

impl CalendarUnit {
    fn name(&self) -> &'static str {
        match self {
            CalendarUnit::Year => "year",
            CalendarUnit::Month => "month",
            CalendarUnit::Week => "week",
            CalendarUnit::Day => "day",
            CalendarUnit::Hour => "hour",
            CalendarUnit::Minute => "minute",
            CalendarUnit::Second => "second",
            CalendarUnit::Millisecond => "millisecond",
        }
    }
}

impl fmt::Display for CalendarUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CalendarUnit {
    type Err = SpanError;

    /// Accepts the lowercase unit name, singular or plural.
    ///
    /// # Errors
    ///
    /// [`SpanError::UnsupportedUnit`] for anything outside the supported
    /// set — units coarser than a year, finer than a millisecond, or simply
    /// unknown.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "year" | "years" => Ok(CalendarUnit::Year),
            "month" | "months" => Ok(CalendarUnit::Month),
            "week" | "weeks" => Ok(CalendarUnit::Week),
            "day" | "days" => Ok(CalendarUnit::Day),
            "hour" | "hours" => Ok(CalendarUnit::Hour),
            "minute" | "minutes" => Ok(CalendarUnit::Minute),
            "second" | "seconds" => Ok(CalendarUnit::Second),
            "millisecond" | "milliseconds" => Ok(CalendarUnit::Millisecond),
            other => Err(SpanError::UnsupportedUnit(format!("'{other}'"))),
        }
    }
}

/// `dt` moved forward by `count` whole units, calendar-aware. `None` when
/// the result leaves the representable range or lands on a pathological
/// local time.
fn advance_units<Tz: TimeZone>(
    dt: &DateTime<Tz>,
    unit: CalendarUnit,
    count: usize,
) -> Option<DateTime<Tz>>
where
    Tz::Offset: Copy,
{
    match unit {
        CalendarUnit::Year => {
            let months = u32::try_from(count.checked_mul(12)?).ok()?;
            dt.checked_add_months(Months::new(months))
        }
        CalendarUnit::Month => dt.checked_add_months(Months::new(u32::try_from(count).ok()?)),
        CalendarUnit::Week => {
            let days = u64::try_from(count.checked_mul(7)?).ok()?;
            dt.checked_add_days(Days::new(days))
        }
        CalendarUnit::Day => dt.checked_add_days(Days::new(u64::try_from(count).ok()?)),
        CalendarUnit::Hour => dt.checked_add_signed(Duration::hours(i64::try_from(count).ok()?)),
        CalendarUnit::Minute => {
            dt.checked_add_signed(Duration::minutes(i64::try_from(count).ok()?))
        }
        CalendarUnit::Second => {
            dt.checked_add_signed(Duration::seconds(i64::try_from(count).ok()?))
        }
        CalendarUnit::Millisecond => {
            dt.checked_add_signed(Duration::milliseconds(i64::try_from(count).ok()?))
        }
    }
}

/// The start of the unit-sized calendar bucket containing `dt`.
fn unit_start<Tz: TimeZone>(dt: &DateTime<Tz>, unit: CalendarUnit) -> Option<DateTime<Tz>>
where
    Tz::Offset: Copy,
{
    match unit {
        CalendarUnit::Year => align::start_of_year(dt),
        CalendarUnit::Month => align::start_of_month(dt),
        CalendarUnit::Week => align::start_of_week(dt),
        CalendarUnit::Day => align::start_of_day(dt),
        CalendarUnit::Hour => align::start_of_hour(dt),
        CalendarUnit::Minute => align::start_of_minute(dt),
        CalendarUnit::Second => align::start_of_second(dt),
        CalendarUnit::Millisecond => align::start_of_millisecond(dt),
    }
}

/// Builds the list `[cursor + 0·unit, …, cursor + (size-1)·unit]`, keeping
/// only points strictly before `end`. Never empty when `cursor < end`.
fn bucket_points<Tz: TimeZone>(
    cursor: &DateTime<Tz>,
    end: &DateTime<Tz>,
    unit: CalendarUnit,
    size: usize,
) -> Vec<DateTime<Tz>>
where
    Tz::Offset: Copy,
{
    let mut points = Vec::with_capacity(size);
    let mut next = Some(*cursor);
    for _ in 0..size {
        match next {
            Some(p) if p < *end => {
                points.push(p);
                next = advance_units(&p, unit, 1);
            }
            _ => break,
        }
    }
    points
}

// ── Sequence iterators ──────────────────────────────────────────────────────

/// Consecutive unit-boundary buckets of up to `size` points each; only the
/// final bucket may be smaller. Produced by [`Interval::chunk`].
#[derive(Debug, Clone)]
pub struct Chunks<Tz: TimeZone> {
    cursor: Option<DateTime<Tz>>,
    end: DateTime<Tz>,
    unit: CalendarUnit,
    size: usize,
}

impl<Tz: TimeZone> Iterator for Chunks<Tz>
where
    Tz::Offset: Copy,
{
    type Item = Vec<DateTime<Tz>>;

    fn next(&mut self) -> Option<Self::Item> {
        let cursor = self.cursor.take()?;
        if cursor >= self.end {
            return None;
        }
        let points = bucket_points(&cursor, &self.end, self.unit, self.size);
        self.cursor = advance_units(&cursor, self.unit, self.size);
        Some(points)
    }
}

impl<Tz: TimeZone> FusedIterator for Chunks<Tz> where Tz::Offset: Copy {}

/// Sliding unit-boundary windows: the bucket rule of [`Chunks`] with the
/// cursor advancing `step` units instead of `size`, so windows overlap when
/// `step < size`. Produced by [`Interval::windowed`].
#[derive(Debug, Clone)]
pub struct Windows<Tz: TimeZone> {
    cursor: Option<DateTime<Tz>>,
    end: DateTime<Tz>,
    unit: CalendarUnit,
    size: usize,
    step: usize,
}

impl<Tz: TimeZone> Iterator for Windows<Tz>
where
    Tz::Offset: Copy,
{
    type Item = Vec<DateTime<Tz>>;

    fn next(&mut self) -> Option<Self::Item> {
        let cursor = self.cursor.take()?;
        if cursor >= self.end {
            return None;
        }
        let points = bucket_points(&cursor, &self.end, self.unit, self.size);
        self.cursor = advance_units(&cursor, self.unit, self.step);
        Some(points)
    }
}

impl<Tz: TimeZone> FusedIterator for Windows<Tz> where Tz::Offset: Copy {}

/// Consecutive `(boundary, successor)` pairs of unit boundaries. Produced by
/// [`Interval::zip_with_next`].
#[derive(Debug, Clone)]
pub struct ZipWithNext<Tz: TimeZone> {
    cursor: Option<DateTime<Tz>>,
    end: DateTime<Tz>,
    unit: CalendarUnit,
}

impl<Tz: TimeZone> Iterator for ZipWithNext<Tz>
where
    Tz::Offset: Copy,
{
    type Item = (DateTime<Tz>, DateTime<Tz>);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.cursor.take()?;
        let next = advance_units(&current, self.unit, 1)?;
        if next >= self.end {
            return None;
        }
        self.cursor = Some(next);
        Some((current, next))
    }
}

impl<Tz: TimeZone> FusedIterator for ZipWithNext<Tz> where Tz::Offset: Copy {}

// ── Interval surface ────────────────────────────────────────────────────────

impl<Tz: TimeZone> Interval<Tz>
where
    Tz::Offset: Copy,
{
    /// Partitions the interval into consecutive buckets of `size` unit
    /// boundaries, starting at the unit-aligned start; only the final bucket
    /// may fall short.
    ///
    /// # Errors
    ///
    /// [`SpanError::InvalidArgument`] when `size` is zero.
    pub fn chunk(&self, size: usize, unit: CalendarUnit) -> Result<Chunks<Tz>> {
        if size == 0 {
            return Err(SpanError::InvalidArgument(
                "chunk size must be positive".to_string(),
            ));
        }
        Ok(Chunks {
            cursor: unit_start(&self.start(), unit),
            end: self.end(),
            unit,
            size,
        })
    }

    /// Slides windows of `size` unit boundaries across the interval,
    /// advancing `step` units per window; `step < size` produces overlap.
    ///
    /// # Errors
    ///
    /// [`SpanError::InvalidArgument`] when `size` or `step` is zero.
    pub fn windowed(&self, size: usize, step: usize, unit: CalendarUnit) -> Result<Windows<Tz>> {
        if size == 0 || step == 0 {
            return Err(SpanError::InvalidArgument(
                "window size and step must be positive".to_string(),
            ));
        }
        Ok(Windows {
            cursor: unit_start(&self.start(), unit),
            end: self.end(),
            unit,
            size,
            step,
        })
    }

    /// Pairs each unit boundary with its successor, stopping once the
    /// successor reaches or passes the interval's end.
    pub fn zip_with_next(&self, unit: CalendarUnit) -> ZipWithNext<Tz> {
        ZipWithNext {
            cursor: unit_start(&self.start(), unit),
            end: self.end(),
            unit,
        }
    }

    pub fn chunk_years(&self, size: usize) -> Result<Chunks<Tz>> {
        self.chunk(size, CalendarUnit::Year)
    }

    pub fn chunk_months(&self, size: usize) -> Result<Chunks<Tz>> {
        self.chunk(size, CalendarUnit::Month)
    }

    pub fn chunk_weeks(&self, size: usize) -> Result<Chunks<Tz>> {
        self.chunk(size, CalendarUnit::Week)
    }

    pub fn chunk_days(&self, size: usize) -> Result<Chunks<Tz>> {
        self.chunk(size, CalendarUnit::Day)
    }

    pub fn chunk_hours(&self, size: usize) -> Result<Chunks<Tz>> {
        self.chunk(size, CalendarUnit::Hour)
    }

    pub fn chunk_minutes(&self, size: usize) -> Result<Chunks<Tz>> {
        self.chunk(size, CalendarUnit::Minute)
    }

    pub fn chunk_seconds(&self, size: usize) -> Result<Chunks<Tz>> {
        self.chunk(size, CalendarUnit::Second)
    }

    pub fn chunk_millis(&self, size: usize) -> Result<Chunks<Tz>> {
        self.chunk(size, CalendarUnit::Millisecond)
    }

    pub fn windowed_years(&self, size: usize, step: usize) -> Result<Windows<Tz>> {
        self.windowed(size, step, CalendarUnit::Year)
    }

    pub fn windowed_months(&self, size: usize, step: usize) -> Result<Windows<Tz>> {
        self.windowed(size, step, CalendarUnit::Month)
    }

    pub fn windowed_weeks(&self, size: usize, step: usize) -> Result<Windows<Tz>> {
        self.windowed(size, step, CalendarUnit::Week)
    }

    pub fn windowed_days(&self, size: usize, step: usize) -> Result<Windows<Tz>> {
        self.windowed(size, step, CalendarUnit::Day)
    }

    pub fn windowed_hours(&self, size: usize, step: usize) -> Result<Windows<Tz>> {
        self.windowed(size, step, CalendarUnit::Hour)
    }

    pub fn windowed_minutes(&self, size: usize, step: usize) -> Result<Windows<Tz>> {
        self.windowed(size, step, CalendarUnit::Minute)
    }

    pub fn windowed_seconds(&self, size: usize, step: usize) -> Result<Windows<Tz>> {
        self.windowed(size, step, CalendarUnit::Second)
    }

    pub fn windowed_millis(&self, size: usize, step: usize) -> Result<Windows<Tz>> {
        self.windowed(size, step, CalendarUnit::Millisecond)
    }

    pub fn zip_with_next_years(&self) -> ZipWithNext<Tz> {
        self.zip_with_next(CalendarUnit::Year)
    }

    pub fn zip_with_next_months(&self) -> ZipWithNext<Tz> {
        self.zip_with_next(CalendarUnit::Month)
    }

    pub fn zip_with_next_weeks(&self) -> ZipWithNext<Tz> {
        self.zip_with_next(CalendarUnit::Week)
    }

    pub fn zip_with_next_days(&self) -> ZipWithNext<Tz> {
        self.zip_with_next(CalendarUnit::Day)
    }

    pub fn zip_with_next_hours(&self) -> ZipWithNext<Tz> {
        self.zip_with_next(CalendarUnit::Hour)
    }

    pub fn zip_with_next_minutes(&self) -> ZipWithNext<Tz> {
        self.zip_with_next(CalendarUnit::Minute)
    }

    pub fn zip_with_next_seconds(&self) -> ZipWithNext<Tz> {
        self.zip_with_next(CalendarUnit::Second)
    }

    pub fn zip_with_next_millis(&self) -> ZipWithNext<Tz> {
        self.zip_with_next(CalendarUnit::Millisecond)
    }

    // ── Fixed-step enumerators (calendar-unaligned) ─────────────────────

    /// Points from the raw (unaligned) start every `step` milliseconds,
    /// while strictly before the end.
    ///
    /// # Errors
    ///
    /// [`SpanError::InvalidArgument`] when `step` is not positive. The same
    /// contract applies to all the fixed-step enumerators below.
    pub fn millis(&self, step: i32) -> Result<ProgressionIter<DateTime<Tz>>> {
        self.stepped(step, Duration::milliseconds(i64::from(step)))
    }

    pub fn seconds(&self, step: i32) -> Result<ProgressionIter<DateTime<Tz>>> {
        self.stepped(step, Duration::seconds(i64::from(step)))
    }

    pub fn minutes(&self, step: i32) -> Result<ProgressionIter<DateTime<Tz>>> {
        self.stepped(step, Duration::minutes(i64::from(step)))
    }

    pub fn hours(&self, step: i32) -> Result<ProgressionIter<DateTime<Tz>>> {
        self.stepped(step, Duration::hours(i64::from(step)))
    }

    pub fn days(&self, step: i32) -> Result<ProgressionIter<DateTime<Tz>>> {
        self.stepped(step, Duration::days(i64::from(step)))
    }

    pub fn weeks(&self, step: i32) -> Result<ProgressionIter<DateTime<Tz>>> {
        self.stepped(step, Duration::weeks(i64::from(step)))
    }

    fn stepped(&self, raw: i32, step: Duration) -> Result<ProgressionIter<DateTime<Tz>>> {
        if raw <= 0 {
            return Err(SpanError::InvalidArgument(
                "enumerator step must be positive".to_string(),
            ));
        }
        // The span is half-open, so the progression boundary sits one
        // millisecond inside the end.
        let boundary = self.end() - Duration::milliseconds(1);
        Ok(Progression::from_closed_range(self.start(), boundary, step)?.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::DurationUnits;
    use chrono::{Datelike, TimeZone, Timelike, Utc};
    use chrono_tz::Tz as TzId;

    fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_chunk_days_partial_tail() {
        // Five days chunked by four: sizes [4, 1].
        let interval = Interval::new(utc(2026, 3, 16), utc(2026, 3, 21));
        let chunks: Vec<_> = interval.chunk_days(4).unwrap().collect();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].len(), 4);
        assert_eq!(chunks[1].len(), 1);
        assert_eq!(chunks[0][0], utc(2026, 3, 16));
        assert_eq!(chunks[1][0], utc(2026, 3, 20));
        // Every produced point lies within the original interval.
        for p in chunks.iter().flatten() {
            assert!(*p >= interval.start() && *p < interval.end());
        }
    }

    #[test]
    fn test_chunk_months_aligns_to_bucket_start() {
        // The cursor starts at the first of the month containing `start`,
        // not at `start` itself.
        let start = Utc.with_ymd_and_hms(2026, 3, 16, 12, 0, 0).unwrap();
        let interval = Interval::new(start, utc(2026, 6, 1));
        let chunks: Vec<_> = interval.chunk_months(2).unwrap().collect();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], vec![utc(2026, 3, 1), utc(2026, 4, 1)]);
        assert_eq!(chunks[1], vec![utc(2026, 5, 1)]);
    }

    #[test]
    fn test_chunk_rejects_zero_size() {
        let interval = Interval::new(utc(2026, 3, 16), utc(2026, 3, 21));
        let err = interval.chunk_days(0).unwrap_err();
        assert!(matches!(err, SpanError::InvalidArgument(_)));
    }

    #[test]
    fn test_windowed_overlapping_years() {
        // size 3, step 2 from a year boundary: consecutive windows share
        // size - step = 1 element; the final window is partial.
        let interval = Interval::new(utc(2000, 1, 1), utc(2005, 1, 1));
        let windows: Vec<_> = interval.windowed_years(3, 2).unwrap().collect();
        assert_eq!(windows.len(), 3);
        assert_eq!(windows[0].len(), 3);
        assert_eq!(windows[1].len(), 3);
        assert_eq!(windows[0][2], windows[1][0]);
        assert_eq!(windows[1][2], windows[2][0]);
        assert_eq!(windows[2], vec![utc(2004, 1, 1)]);
    }

    #[test]
    fn test_windowed_rejects_zero_size_and_step() {
        let interval = Interval::new(utc(2026, 3, 16), utc(2026, 3, 21));
        assert!(matches!(
            interval.windowed_days(0, 1).unwrap_err(),
            SpanError::InvalidArgument(_)
        ));
        assert!(matches!(
            interval.windowed_days(3, 0).unwrap_err(),
            SpanError::InvalidArgument(_)
        ));
    }

    #[test]
    fn test_zip_with_next_days() {
        let interval = Interval::new(utc(2026, 3, 16), utc(2026, 3, 21));
        let pairs: Vec<_> = interval.zip_with_next_days().collect();
        assert_eq!(pairs.len(), 4);
        assert_eq!(pairs[0], (utc(2026, 3, 16), utc(2026, 3, 17)));
        assert_eq!(pairs[3], (utc(2026, 3, 19), utc(2026, 3, 20)));
        // Each pair's successor is the next pair's current.
        for w in pairs.windows(2) {
            assert_eq!(w[0].1, w[1].0);
        }
    }

    #[test]
    fn test_day_chunking_preserves_wall_clock_across_dst() {
        // US spring forward: March 8, 2026. Day boundaries stay at local
        // midnight even though that day is 23 hours long.
        let eastern: TzId = "America/New_York".parse().unwrap();
        let start = eastern.with_ymd_and_hms(2026, 3, 7, 0, 0, 0).unwrap();
        let end = eastern.with_ymd_and_hms(2026, 3, 10, 0, 0, 0).unwrap();
        let chunks: Vec<_> = Interval::new(start, end).chunk_days(10).unwrap().collect();
        let days = &chunks[0];
        assert_eq!(days.len(), 3);
        assert!(days.iter().all(|d| d.hour() == 0));
        assert_eq!(days[2].signed_duration_since(days[1]), 23.hours());
    }

    #[test]
    fn test_sequences_are_restartable() {
        let interval = Interval::new(utc(2026, 1, 1), utc(2026, 5, 1));
        let first: Vec<_> = interval.chunk_months(3).unwrap().collect();
        let second: Vec<_> = interval.chunk_months(3).unwrap().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_fixed_step_enumerators() {
        let start = utc(2026, 3, 16);
        let interval = Interval::new(start, start + 1.days());
        // The §8 example shape: one day in 5-hour hops.
        let hours: Vec<u32> = interval.hours(5).unwrap().map(|dt| dt.hour()).collect();
        assert_eq!(hours, vec![0, 5, 10, 15, 20]);

        let days: Vec<_> = Interval::new(start, start + 10.days())
            .days(3)
            .unwrap()
            .collect();
        assert_eq!(days.len(), 4);
        assert_eq!(days[3], start + 9.days());
    }

    #[test]
    fn test_enumerators_are_half_open() {
        let start = utc(2026, 3, 16);
        let interval = Interval::new(start, start + 2.days());
        // The end itself is never produced.
        let points: Vec<_> = interval.days(1).unwrap().collect();
        assert_eq!(points, vec![start, start + 1.days()]);
    }

    #[test]
    fn test_enumerators_reject_non_positive_step() {
        let interval = Interval::new(utc(2026, 3, 16), utc(2026, 3, 21));
        for result in [interval.days(0), interval.hours(-1), interval.weeks(0)] {
            assert!(matches!(result.unwrap_err(), SpanError::InvalidArgument(_)));
        }
    }

    #[test]
    fn test_unit_parsing() {
        assert_eq!("day".parse::<CalendarUnit>().unwrap(), CalendarUnit::Day);
        assert_eq!("Months".parse::<CalendarUnit>().unwrap(), CalendarUnit::Month);
        assert_eq!(
            "milliseconds".parse::<CalendarUnit>().unwrap(),
            CalendarUnit::Millisecond
        );
        for bad in ["decade", "nanosecond", "quarter", ""] {
            let err = bad.parse::<CalendarUnit>().unwrap_err();
            assert!(matches!(err, SpanError::UnsupportedUnit(_)), "accepted: {bad}");
        }
    }

    #[test]
    fn test_unit_display_round_trips() {
        let unit = CalendarUnit::Week;
        assert_eq!(unit.to_string().parse::<CalendarUnit>().unwrap(), unit);
    }

    #[test]
    fn test_month_end_clamping_in_windows() {
        // Aligned month walking never clamps (cursor is always the 1st), but
        // the advance itself must tolerate short months.
        let interval = Interval::new(utc(2026, 1, 15), utc(2026, 4, 15));
        let chunks: Vec<_> = interval.chunk_months(1).unwrap().collect();
        let firsts: Vec<u32> = chunks.iter().map(|c| c[0].day()).collect();
        assert_eq!(firsts, vec![1, 1, 1, 1]);
        assert_eq!(chunks.len(), 4);
    }
}
