//! Stepped progressions of temporal points.
//!
//! A [`Progression`] is an arithmetic sequence over any [`TemporalPoint`]:
//! a first element, a signed non-zero step, and a derived last element. The
//! last element is computed once, at construction, in O(1) by modular
//! arithmetic on the points' epoch-millisecond measure — never by stepping —
//! so a progression over years of milliseconds costs the same as one over
//! five elements.
//!
//! Iteration is forward-only and terminates by value equality with the
//! precomputed last element, not by a counter. Because `first`, `last`, and
//! `step` are immutable, [`Progression::iter`] may be called any number of
//! times and always replays the same sequence.

use std::fmt;
use std::iter::FusedIterator;

use chrono::Duration;

use crate::error::{Result, SpanError};
use crate::point::TemporalPoint;

/// Floored modulus: the remainder is always in `0..b`. Requires `b > 0`.
fn floor_mod(a: i64, b: i64) -> i64 {
    let r = a % b;
    if r < 0 {
        r + b
    } else {
        r
    }
}

/// `(a - b) mod c`, computed without intermediate overflow. Requires `c > 0`.
fn diff_mod(a: i64, b: i64, c: i64) -> i64 {
    floor_mod(floor_mod(a, c) - floor_mod(b, c), c)
}

/// An arithmetic sequence of temporal points.
///
/// Invariants:
/// - `step` is non-zero (checked at construction);
/// - `last` is `first + k·step` for some integer `k ≥ 0`, and never lies
///   beyond the construction boundary in the direction of travel. A step
///   that overshoots the whole span in one hop yields `last == first` — a
///   deliberate single-element progression.
#[derive(Debug, Clone, Copy)]
pub struct Progression<T: TemporalPoint> {
    first: T,
    last: T,
    step: Duration,
}

impl<T: TemporalPoint> Progression<T> {
    /// Builds the progression covering `first..=boundary` in increments of
    /// `step`.
    ///
    /// # Errors
    ///
    /// [`SpanError::InvalidArgument`] when the step's whole-millisecond part
    /// is zero — points are millisecond-resolution, so such a step cannot
    /// advance the sequence.
    pub fn from_closed_range(first: T, boundary: T, step: Duration) -> Result<Self> {
        let step_ms = step.num_milliseconds();
        if step_ms == 0 {
            return Err(SpanError::InvalidArgument(
                "progression step must be non-zero".to_string(),
            ));
        }

        let first_ms = first.epoch_millis();
        let boundary_ms = boundary.epoch_millis();
        let last_ms = if step_ms > 0 {
            boundary_ms - diff_mod(boundary_ms, first_ms, step_ms)
        } else {
            boundary_ms + diff_mod(first_ms, boundary_ms, -step_ms)
        };
        // The delta is a whole multiple of the step, so `last` stays exactly
        // reachable even when `first` carries sub-millisecond precision.
        let last = first
            .checked_add(Duration::milliseconds(last_ms - first_ms))
            .unwrap_or(first);

        Ok(Self { first, last, step })
    }

    /// Unit-stepped (1 ms) progression; the boundary is always reachable, so
    /// it becomes `last` directly. Backs [`crate::range::TemporalRange`].
    pub(crate) fn unit(first: T, last: T) -> Self {
        Self {
            first,
            last,
            step: Duration::milliseconds(1),
        }
    }

    pub fn first(&self) -> T {
        self.first
    }

    /// The derived final element. Meaningless when [`is_empty`](Self::is_empty).
    pub fn last(&self) -> T {
        self.last
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    pub fn is_empty(&self) -> bool {
        if self.step > Duration::zero() {
            self.first > self.last
        } else {
            self.first < self.last
        }
    }

    /// A fresh iterator over the sequence. Progressions are immutable, so
    /// every call replays the identical sequence.
    pub fn iter(&self) -> ProgressionIter<T> {
        ProgressionIter {
            next: if self.is_empty() {
                None
            } else {
                Some(self.first)
            },
            last: self.last,
            step: self.step,
        }
    }
}

/// Two progressions are equal when both are empty, or when `first`, `last`,
/// and `step` all coincide.
impl<T: TemporalPoint> PartialEq for Progression<T> {
    fn eq(&self, other: &Self) -> bool {
        (self.is_empty() && other.is_empty())
            || (self.first == other.first && self.last == other.last && self.step == other.step)
    }
}

impl<T: TemporalPoint> Eq for Progression<T> {}

impl<T: TemporalPoint + fmt::Display> fmt::Display for Progression<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.step > Duration::zero() {
            write!(f, "{}..{}", self.first, self.last)
        } else {
            write!(f, "{} downTo {} step {}", self.first, self.last, self.step.abs())
        }
    }
}

impl<T: TemporalPoint> IntoIterator for &Progression<T> {
    type Item = T;
    type IntoIter = ProgressionIter<T>;

    fn into_iter(self) -> ProgressionIter<T> {
        self.iter()
    }
}

impl<T: TemporalPoint> IntoIterator for Progression<T> {
    type Item = T;
    type IntoIter = ProgressionIter<T>;

    fn into_iter(self) -> ProgressionIter<T> {
        self.iter()
    }
}

/// Forward-only iterator over a [`Progression`].
#[derive(Debug, Clone)]
pub struct ProgressionIter<T: TemporalPoint> {
    next: Option<T>,
    last: T,
    step: Duration,
}

impl<T: TemporalPoint> Iterator for ProgressionIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let current = self.next?;
        self.next = if current == self.last {
            None
        } else {
            current.checked_add(self.step)
        };
        Some(current)
    }
}

impl<T: TemporalPoint> FusedIterator for ProgressionIter<T> {}
