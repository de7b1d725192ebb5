//! Calendar-sensitive spans of years, months, and days.
//!
//! A [`Period`] is not a fixed number of nanoseconds: applying "+1 month" to
//! January 31 and to February 1 moves a point by different amounts of
//! absolute time. Periods therefore never compare against [`chrono::Duration`]
//! without first being anchored to a concrete point.
//!
//! Month arithmetic clamps the day-of-month the way chrono's
//! `checked_add_months` does: January 31 plus one month is February 28 (or 29
//! in a leap year).

use std::fmt;
use std::ops::Add;

use chrono::{DateTime, Duration, Months, NaiveDate, TimeZone};
use serde::Serialize;

/// A span measured in calendar units: years, months, and days.
///
/// All three fields share a sign; mixed-sign periods are never produced by
/// this crate's constructors or by [`Period::between`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Period {
    /// Whole years of the span.
    pub years: i32,
    /// Whole months in addition to the years (−11..=11 from `between`).
    pub months: i32,
    /// Whole days in addition to the years and months.
    pub days: i32,
}

impl Period {
    /// The zero-length period.
    pub const fn zero() -> Self {
        Self {
            years: 0,
            months: 0,
            days: 0,
        }
    }

    pub const fn of_years(years: i32) -> Self {
        Self {
            years,
            months: 0,
            days: 0,
        }
    }

    pub const fn of_months(months: i32) -> Self {
        Self {
            years: 0,
            months,
            days: 0,
        }
    }

    /// Weeks have no field of their own; a week period is seven day-units.
    pub const fn of_weeks(weeks: i32) -> Self {
        Self {
            years: 0,
            months: 0,
            days: weeks * 7,
        }
    }

    pub const fn of_days(days: i32) -> Self {
        Self {
            years: 0,
            months: 0,
            days,
        }
    }

    pub const fn is_zero(&self) -> bool {
        self.years == 0 && self.months == 0 && self.days == 0
    }

    /// The calendar distance from `start` to `end`: the largest whole number
    /// of months (anchored at `start`, day-of-month clamped), then leftover
    /// days. Negative when `end` is before `start`, with all fields negated.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        if start == end {
            return Self::zero();
        }
        let (earlier, later, negate) = if start <= end {
            (start, end, false)
        } else {
            (end, start, true)
        };

        // Whole months are always measured from the original anchor date, so
        // repeated clamping cannot drift the day-of-month.
        let mut months: i32 = 0;
        loop {
            match earlier.checked_add_months(Months::new(months as u32 + 1)) {
                Some(next) if next <= later => months += 1,
                _ => break,
            }
        }
        let anchored = earlier
            .checked_add_months(Months::new(months as u32))
            .unwrap_or(earlier);
        let days = (later - anchored).num_days() as i32;

        let period = Self {
            years: months / 12,
            months: months % 12,
            days,
        };
        if negate {
            -period
        } else {
            period
        }
    }

    /// Applies the period to a datetime: months first (day-of-month clamped),
    /// then days, preserving local wall-clock time. `None` when the result is
    /// out of range.
    pub fn checked_added_to<Tz: TimeZone>(&self, dt: DateTime<Tz>) -> Option<DateTime<Tz>>
    where
        Tz::Offset: Copy,
    {
        let total_months = i64::from(self.years) * 12 + i64::from(self.months);
        let shifted = if total_months >= 0 {
            dt.checked_add_months(Months::new(u32::try_from(total_months).ok()?))?
        } else {
            dt.checked_sub_months(Months::new(u32::try_from(-total_months).ok()?))?
        };
        shifted.checked_add_signed(Duration::days(i64::from(self.days)))
    }

    /// Scalar multiplication preserving sign; `None` if any field overflows.
    pub fn checked_mul(&self, scalar: i32) -> Option<Self> {
        Some(Self {
            years: self.years.checked_mul(scalar)?,
            months: self.months.checked_mul(scalar)?,
            days: self.days.checked_mul(scalar)?,
        })
    }
}

impl std::ops::Neg for Period {
    type Output = Period;

    fn neg(self) -> Period {
        Period {
            years: -self.years,
            months: -self.months,
            days: -self.days,
        }
    }
}

impl<Tz: TimeZone> Add<Period> for DateTime<Tz>
where
    Tz::Offset: Copy,
{
    type Output = DateTime<Tz>;

    /// # Panics
    ///
    /// Panics when the shifted datetime is out of chrono's representable
    /// range, matching the behavior of chrono's own `Add` operators.
    fn add(self, period: Period) -> DateTime<Tz> {
        match period.checked_added_to(self) {
            Some(dt) => dt,
            None => panic!("datetime out of range when adding {period}"),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("P0D");
        }
        f.write_str("P")?;
        if self.years != 0 {
            write!(f, "{}Y", self.years)?;
        }
        if self.months != 0 {
            write!(f, "{}M", self.months)?;
        }
        if self.days != 0 {
            write!(f, "{}D", self.days)?;
        }
        Ok(())
    }
}
