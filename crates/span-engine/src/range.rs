//! Closed, inclusive ranges of temporal points.
//!
//! A [`TemporalRange`] is a [`Progression`] whose step is pinned to the
//! smallest representable increment, one millisecond, plus a closed-closed
//! membership test. Unlike [`crate::interval::Interval`], an inverted range
//! is not swapped into shape: `first > last` is a legitimate *empty* range,
//! and the per-type `empty()` sentinels are built exactly that way.

use std::fmt;

use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, Utc};

use crate::point::TemporalPoint;
use crate::progression::{Progression, ProgressionIter};

/// A closed range `[first, last]` stepped by one millisecond.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemporalRange<T: TemporalPoint> {
    progression: Progression<T>,
}

impl<T: TemporalPoint> TemporalRange<T> {
    /// Builds the closed range `first..=last`. Inverted bounds are kept as
    /// given and make the range empty; nothing is swapped.
    pub fn new(first: T, last: T) -> Self {
        Self {
            progression: Progression::unit(first, last),
        }
    }

    pub fn first(&self) -> T {
        self.progression.first()
    }

    pub fn last(&self) -> T {
        self.progression.last()
    }

    /// `first ≤ value ≤ last`. Always false for an empty range.
    pub fn contains(&self, value: &T) -> bool {
        !self.is_empty() && self.first() <= *value && *value <= self.last()
    }

    pub fn is_empty(&self) -> bool {
        self.first() > self.last()
    }

    /// Millisecond-stepped iterator over the whole range. Restartable, like
    /// any progression iterator.
    pub fn iter(&self) -> ProgressionIter<T> {
        self.progression.iter()
    }
}

impl<T: TemporalPoint + fmt::Display> fmt::Display for TemporalRange<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.progression.fmt(f)
    }
}

impl<T: TemporalPoint> IntoIterator for &TemporalRange<T> {
    type Item = T;
    type IntoIter = ProgressionIter<T>;

    fn into_iter(self) -> ProgressionIter<T> {
        self.iter()
    }
}

// The empty sentinel is a value, not an absence marker: a specific inverted
// pair one millisecond apart, defined per concrete point type. Any empty
// range compares equal to it through the progression both-empty rule.

impl TemporalRange<DateTime<Utc>> {
    pub fn empty() -> Self {
        let epoch = DateTime::UNIX_EPOCH;
        Self::new(epoch + Duration::milliseconds(1), epoch)
    }
}

impl TemporalRange<DateTime<FixedOffset>> {
    pub fn empty() -> Self {
        let epoch = DateTime::UNIX_EPOCH.fixed_offset();
        Self::new(epoch + Duration::milliseconds(1), epoch)
    }
}

impl TemporalRange<NaiveDateTime> {
    pub fn empty() -> Self {
        let epoch = DateTime::UNIX_EPOCH.naive_utc();
        Self::new(epoch + Duration::milliseconds(1), epoch)
    }
}
