//! Half-open spans between two zoned datetimes.
//!
//! An [`Interval`] is the pair `[start, end)` with the invariant
//! `start ≤ end`, both endpoints expressed in the start's zone. Constructors
//! that receive inverted bounds swap them silently — a deliberate contrast
//! with [`crate::range::TemporalRange`], where inverted bounds are a
//! legitimate empty value.
//!
//! Containment of a single instant is half-open (`start ≤ p < end`), while
//! the endpoint comparisons behind [`Interval::overlaps`], [`Interval::gap`],
//! and [`Interval::abuts`] are closed-closed: two intervals that touch at a
//! boundary overlap degenerately, have no gap, and abut.

use std::cmp::{max, min};
use std::fmt;

use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, TimeZone, Utc};

use crate::error::{Result, SpanError};
use crate::period::Period;
use crate::sequence::CalendarUnit;

/// The separator between the two endpoints of a serialized interval.
pub const SEPARATOR: char = '~';

/// An interval over UTC instants.
pub type UtcInterval = Interval<Utc>;

/// An interval over IANA-zoned datetimes.
pub type ZonedInterval = Interval<chrono_tz::Tz>;

/// A half-open span `[start, end)` of zoned datetimes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval<Tz: TimeZone = Utc> {
    start: DateTime<Tz>,
    end: DateTime<Tz>,
}

impl<Tz: TimeZone> Copy for Interval<Tz> where Tz::Offset: Copy {}

impl<Tz: TimeZone> Interval<Tz>
where
    Tz::Offset: Copy,
{
    /// Builds `[start, end)`, silently swapping inverted bounds. The end is
    /// re-expressed in the start's zone.
    pub fn new(start: DateTime<Tz>, end: DateTime<Tz>) -> Self {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        let end = end.with_timezone(&start.timezone());
        Self { start, end }
    }

    /// The span of `duration` anchored at its start. A negative duration
    /// anchors at the other end via the usual swap.
    pub fn from_start_and_duration(start: DateTime<Tz>, duration: Duration) -> Self {
        let end = start + duration;
        Self::new(start, end)
    }

    /// The span of `duration` anchored at its end.
    pub fn from_duration_and_end(duration: Duration, end: DateTime<Tz>) -> Self {
        let start = end - duration;
        Self::new(start, end)
    }

    /// Resolves two local datetimes in `zone` and builds the interval.
    ///
    /// # Errors
    ///
    /// [`SpanError::InvalidArgument`] when either local datetime is ambiguous
    /// or nonexistent in the zone (a DST transition).
    pub fn of_local(start: NaiveDateTime, end: NaiveDateTime, zone: Tz) -> Result<Self> {
        let resolve = |naive: NaiveDateTime| {
            zone.from_local_datetime(&naive).single().ok_or_else(|| {
                SpanError::InvalidArgument(format!(
                    "ambiguous or nonexistent local time: {naive}"
                ))
            })
        };
        Ok(Self::new(resolve(start)?, resolve(end)?))
    }

    pub fn start(&self) -> DateTime<Tz> {
        self.start
    }

    pub fn end(&self) -> DateTime<Tz> {
        self.end
    }

    /// The zone both endpoints are expressed in.
    pub fn zone(&self) -> Tz {
        self.start.timezone()
    }

    /// A copy with the start replaced; inverted results swap as in [`new`](Self::new).
    pub fn with_start(&self, start: DateTime<Tz>) -> Self {
        Self::new(start, self.end)
    }

    /// A copy with the end replaced; inverted results swap as in [`new`](Self::new).
    pub fn with_end(&self, end: DateTime<Tz>) -> Self {
        Self::new(self.start, end)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    // ── Predicates ──────────────────────────────────────────────────────

    /// Closed-closed intersection test: the two spans share at least one
    /// endpoint-comparable instant, boundary touches included.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// The shared span `[max(starts), min(ends)]`, or `None` when the
    /// intervals do not overlap. Degenerate (empty) when they merely touch.
    pub fn overlap(&self, other: &Self) -> Option<Self> {
        if !self.overlaps(other) {
            return None;
        }
        Some(Self::new(
            max(self.start, other.start),
            min(self.end, other.end),
        ))
    }

    /// The span strictly between two non-overlapping intervals, or `None`
    /// when they overlap. Exactly one of `overlap` and `gap` is present
    /// unless the intervals touch, where `overlaps` wins and the gap is gone.
    pub fn gap(&self, other: &Self) -> Option<Self> {
        if self.overlaps(other) {
            return None;
        }
        if self.end < other.start {
            Some(Self::new(self.end, other.start))
        } else {
            Some(Self::new(other.end, self.start))
        }
    }

    /// Exact boundary touch: this end is the other's start, or vice versa.
    /// Two intervals sharing a start with different ends do **not** abut.
    pub fn abuts(&self, other: &Self) -> bool {
        self.end == other.start || self.start == other.end
    }

    /// Half-open membership: `start ≤ instant < end`.
    pub fn contains(&self, instant: &DateTime<Tz>) -> bool {
        self.start <= *instant && *instant < self.end
    }

    /// Both of the other's endpoints pass the half-open membership test. An
    /// interval consequently never contains one that shares its end.
    pub fn contains_interval(&self, other: &Self) -> bool {
        self.contains(&other.start) && self.contains(&other.end)
    }

    /// Entirely before the other: this end does not pass the other's start.
    pub fn is_before(&self, other: &Self) -> bool {
        self.end <= other.start
    }

    /// Entirely after the other: this start is not passed by the other's end.
    pub fn is_after(&self, other: &Self) -> bool {
        self.start >= other.end
    }

    // ── Conversions ─────────────────────────────────────────────────────

    /// The fixed elapsed length `end - start`.
    pub fn to_duration(&self) -> Duration {
        self.end.signed_duration_since(self.start)
    }

    /// The calendar length between the endpoint dates, as whole years,
    /// months, and leftover days.
    pub fn to_period(&self) -> Period {
        Period::between(self.start.date_naive(), self.end.date_naive())
    }

    /// The calendar length denominated in a single unit. Weeks are whole
    /// days divided by seven, truncating.
    ///
    /// # Errors
    ///
    /// [`SpanError::UnsupportedUnit`] for units finer than a day, which have
    /// no period denomination.
    pub fn to_period_in(&self, unit: CalendarUnit) -> Result<Period> {
        let total_days = (self.end.date_naive() - self.start.date_naive()).num_days();
        match unit {
            CalendarUnit::Day => Ok(Period::of_days(total_days as i32)),
            CalendarUnit::Week => Ok(Period::of_weeks((total_days / 7) as i32)),
            CalendarUnit::Month => {
                let p = self.to_period();
                Ok(Period::of_months(p.years * 12 + p.months))
            }
            CalendarUnit::Year => Ok(Period::of_years(self.to_period().years)),
            other => Err(SpanError::UnsupportedUnit(format!(
                "{other} has no period denomination"
            ))),
        }
    }
}

impl Interval<FixedOffset> {
    /// Parses `"<rfc3339>~<rfc3339>"`, requiring both endpoints to carry the
    /// same UTC offset.
    ///
    /// # Errors
    ///
    /// [`SpanError::MalformedIntervalText`] when the separator is missing,
    /// either side is not a valid RFC 3339 datetime, or the offsets differ.
    pub fn parse(text: &str) -> Result<Self> {
        let (start, end) = parse_endpoints(text)?;
        if start.offset() != end.offset() {
            return Err(SpanError::MalformedIntervalText(format!(
                "endpoint offsets differ: {} vs {}",
                start.offset(),
                end.offset()
            )));
        }
        Ok(Self::new(start, end))
    }

    /// Parses `"<rfc3339>~<rfc3339>"`, allowing the endpoints to carry
    /// different offsets; the end is re-expressed in the start's offset.
    ///
    /// # Errors
    ///
    /// [`SpanError::MalformedIntervalText`] when the separator is missing or
    /// either side is not a valid RFC 3339 datetime.
    pub fn parse_with_offset(text: &str) -> Result<Self> {
        let (start, end) = parse_endpoints(text)?;
        Ok(Self::new(start, end))
    }
}

fn parse_endpoints(text: &str) -> Result<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
    let (left, right) = text.split_once(SEPARATOR).ok_or_else(|| {
        SpanError::MalformedIntervalText(format!("missing '{SEPARATOR}' separator in '{text}'"))
    })?;
    let parse = |side: &str| {
        DateTime::parse_from_rfc3339(side.trim())
            .map_err(|e| SpanError::MalformedIntervalText(format!("'{side}': {e}")))
    };
    Ok((parse(left)?, parse(right)?))
}

impl<Tz: TimeZone> fmt::Display for Interval<Tz>
where
    Tz::Offset: Copy + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{SEPARATOR}{}",
            self.start.to_rfc3339(),
            self.end.to_rfc3339()
        )
    }
}

// ── Mutable variant ─────────────────────────────────────────────────────────

/// The in-place counterpart of [`Interval`].
///
/// Setters keep `start ≤ end` by swapping, never clamping: writing a start
/// beyond the current end makes the old end the new start, and the written
/// value the end (symmetrically for [`set_end`](Self::set_end)).
///
/// A plain single-threaded reference type: concurrent mutation is the
/// caller's responsibility, there is no internal synchronization. Sequences
/// built from a snapshot (via [`to_interval`](Self::to_interval)) capture
/// `start`/`end` by value and do not observe later mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutableInterval<Tz: TimeZone = Utc> {
    start: DateTime<Tz>,
    end: DateTime<Tz>,
}

impl<Tz: TimeZone> MutableInterval<Tz>
where
    Tz::Offset: Copy,
{
    pub fn new(start: DateTime<Tz>, end: DateTime<Tz>) -> Self {
        let frozen = Interval::new(start, end);
        Self {
            start: frozen.start,
            end: frozen.end,
        }
    }

    pub fn start(&self) -> DateTime<Tz> {
        self.start
    }

    pub fn end(&self) -> DateTime<Tz> {
        self.end
    }

    pub fn set_start(&mut self, value: DateTime<Tz>) {
        if value > self.end {
            self.start = std::mem::replace(&mut self.end, value);
        } else {
            self.start = value;
        }
    }

    pub fn set_end(&mut self, value: DateTime<Tz>) {
        if value < self.start {
            self.end = std::mem::replace(&mut self.start, value);
        } else {
            self.end = value;
        }
    }

    /// A value snapshot of the current state.
    pub fn to_interval(&self) -> Interval<Tz> {
        Interval::new(self.start, self.end)
    }
}

impl<Tz: TimeZone> From<Interval<Tz>> for MutableInterval<Tz>
where
    Tz::Offset: Copy,
{
    fn from(interval: Interval<Tz>) -> Self {
        Self {
            start: interval.start,
            end: interval.end,
        }
    }
}

impl<Tz: TimeZone> From<MutableInterval<Tz>> for Interval<Tz>
where
    Tz::Offset: Copy,
{
    fn from(interval: MutableInterval<Tz>) -> Self {
        interval.to_interval()
    }
}
