//! Duration and period construction helpers on plain integers.
//!
//! These are the step-building entry points for progressions, ranges, and
//! intervals: `5.hours()` is a fixed [`Duration`] of exactly five hours,
//! while `5.month_period()` is a calendar-sensitive [`Period`] whose effect
//! depends on the point it is applied to.
//!
//! Scalar arithmetic on the resulting durations goes through chrono's
//! checked operations (`checked_mul`, `checked_div`); overflow yields `None`
//! rather than a silently truncated span.

use chrono::Duration;

use crate::period::Period;

// ── Fixed durations ─────────────────────────────────────────────────────────

/// Constructs fixed-length [`Duration`]s from an integer count of units.
///
/// # Examples
///
/// ```
/// use span_engine::DurationUnits;
///
/// assert_eq!(90.minutes(), 1.hours() + 30.minutes());
/// assert_eq!(2.weeks(), 14.days());
/// ```
pub trait DurationUnits {
    fn nanoseconds(self) -> Duration;
    fn microseconds(self) -> Duration;
    fn milliseconds(self) -> Duration;
    fn seconds(self) -> Duration;
    /// Seconds plus a nanosecond adjustment, e.g. `3.seconds_with_nanos(500)`.
    fn seconds_with_nanos(self, nano_adjustment: i64) -> Duration;
    fn minutes(self) -> Duration;
    fn hours(self) -> Duration;
    fn days(self) -> Duration;
    fn weeks(self) -> Duration;
}

impl DurationUnits for i64 {
    fn nanoseconds(self) -> Duration {
        Duration::nanoseconds(self)
    }

    fn microseconds(self) -> Duration {
        Duration::microseconds(self)
    }

    fn milliseconds(self) -> Duration {
        Duration::milliseconds(self)
    }

    fn seconds(self) -> Duration {
        Duration::seconds(self)
    }

    fn seconds_with_nanos(self, nano_adjustment: i64) -> Duration {
        Duration::seconds(self) + Duration::nanoseconds(nano_adjustment)
    }

    fn minutes(self) -> Duration {
        Duration::minutes(self)
    }

    fn hours(self) -> Duration {
        Duration::hours(self)
    }

    fn days(self) -> Duration {
        Duration::days(self)
    }

    fn weeks(self) -> Duration {
        Duration::weeks(self)
    }
}

impl DurationUnits for i32 {
    fn nanoseconds(self) -> Duration {
        i64::from(self).nanoseconds()
    }

    fn microseconds(self) -> Duration {
        i64::from(self).microseconds()
    }

    fn milliseconds(self) -> Duration {
        i64::from(self).milliseconds()
    }

    fn seconds(self) -> Duration {
        i64::from(self).seconds()
    }

    fn seconds_with_nanos(self, nano_adjustment: i64) -> Duration {
        i64::from(self).seconds_with_nanos(nano_adjustment)
    }

    fn minutes(self) -> Duration {
        i64::from(self).minutes()
    }

    fn hours(self) -> Duration {
        i64::from(self).hours()
    }

    fn days(self) -> Duration {
        i64::from(self).days()
    }

    fn weeks(self) -> Duration {
        i64::from(self).weeks()
    }
}

// ── Calendar periods ────────────────────────────────────────────────────────

/// Constructs calendar-sensitive [`Period`]s from an integer count of units.
pub trait PeriodUnits {
    /// A period of `self` months.
    fn month_period(self) -> Period;
    /// A period of `self` quarters (three months each).
    fn quarter_period(self) -> Period;
    /// A period of `self` years.
    fn year_period(self) -> Period;
}

impl PeriodUnits for i32 {
    fn month_period(self) -> Period {
        Period::of_months(self)
    }

    fn quarter_period(self) -> Period {
        Period::of_months(self * 3)
    }

    fn year_period(self) -> Period {
        Period::of_years(self)
    }
}

// ── Sign queries ────────────────────────────────────────────────────────────

/// The sign queries progression construction needs to pick an iteration
/// direction. Zero-ness is covered by [`Duration::is_zero`].
pub trait DurationSign {
    /// Strictly greater than zero.
    fn is_positive(&self) -> bool;
    /// Zero or greater.
    fn is_not_negative(&self) -> bool;
}

impl DurationSign for Duration {
    fn is_positive(&self) -> bool {
        *self > Duration::zero()
    }

    fn is_not_negative(&self) -> bool {
        *self >= Duration::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_units_compose() {
        assert_eq!(1.days(), 24.hours());
        assert_eq!(1.hours(), 60.minutes());
        assert_eq!(1.minutes(), 60.seconds());
        assert_eq!(1.seconds(), 1000.milliseconds());
        assert_eq!(1.weeks(), 7.days());
    }

    #[test]
    fn test_i64_and_i32_agree() {
        assert_eq!(5i32.hours(), 5i64.hours());
        assert_eq!((-3i32).days(), (-3i64).days());
    }

    #[test]
    fn test_seconds_with_nanos() {
        let d = 2.seconds_with_nanos(500_000_000);
        assert_eq!(d, 2500.milliseconds());
    }

    #[test]
    fn test_period_units() {
        assert_eq!(1.quarter_period(), Period::of_months(3));
        assert_eq!(2.year_period(), Period::of_years(2));
        assert_eq!(7.month_period(), Period::of_months(7));
    }

    #[test]
    fn test_sign_queries() {
        assert!(5.minutes().is_positive());
        assert!(!(-5).minutes().is_positive());
        assert!(0.minutes().is_not_negative());
        assert!(!(-1).milliseconds().is_not_negative());
        assert!(0.seconds().is_zero());
    }

    #[test]
    fn test_checked_scalar_arithmetic() {
        let d = 10.days();
        assert_eq!(d.checked_mul(3), Some(30.days()));
        assert_eq!((-2).hours().checked_mul(3), Some((-6).hours()));
        assert_eq!(Duration::MAX.checked_mul(2), None);
    }
}
