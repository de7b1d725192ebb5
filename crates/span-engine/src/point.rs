//! The temporal-point capability contract.
//!
//! A [`TemporalPoint`] is any value that is totally ordered and can be moved
//! by a signed [`chrono::Duration`]. Progressions and ranges are generic over
//! this trait, so the same stepping arithmetic serves UTC instants, zoned and
//! fixed-offset datetimes, and naive (zone-less) datetimes alike.
//!
//! Calendar dates (`NaiveDate` and friends) are deliberately **not**
//! implementors: a pure date has no time-of-day, so advancing one by a
//! sub-day duration has no unambiguous meaning. Point types must carry at
//! least millisecond resolution to participate in ranges and progressions.

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone};

/// A totally ordered instant-like value that supports duration arithmetic.
///
/// The trait exposes the point's linear distance from the Unix epoch in
/// milliseconds; progression arithmetic operates on that measure, never on
/// calendar fields. Ordering must be consistent with addition: for any point
/// `p` and positive duration `d`, `p.checked_add(d)` (when representable)
/// compares greater than `p`.
pub trait TemporalPoint: Copy + Ord + std::fmt::Debug {
    /// Milliseconds from the Unix epoch (1970-01-01T00:00:00Z), negative for
    /// earlier points. Sub-millisecond precision is truncated.
    fn epoch_millis(&self) -> i64;

    /// The point moved by `step`, or `None` if the result is out of range
    /// for the underlying representation.
    fn checked_add(&self, step: Duration) -> Option<Self>;
}

impl<Tz: TimeZone> TemporalPoint for DateTime<Tz>
where
    Tz::Offset: Copy,
{
    fn epoch_millis(&self) -> i64 {
        self.timestamp_millis()
    }

    fn checked_add(&self, step: Duration) -> Option<Self> {
        self.checked_add_signed(step)
    }
}

impl TemporalPoint for NaiveDateTime {
    fn epoch_millis(&self) -> i64 {
        self.and_utc().timestamp_millis()
    }

    fn checked_add(&self, step: Duration) -> Option<Self> {
        self.checked_add_signed(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use chrono_tz::Tz;

    #[test]
    fn test_epoch_millis_utc() {
        let dt = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 1).unwrap();
        assert_eq!(dt.epoch_millis(), 1000);
    }

    #[test]
    fn test_epoch_millis_is_zone_independent() {
        let utc = Utc.with_ymd_and_hms(2026, 3, 15, 14, 0, 0).unwrap();
        let tokyo: Tz = "Asia/Tokyo".parse().unwrap();
        let local = utc.with_timezone(&tokyo);
        assert_eq!(utc.epoch_millis(), local.epoch_millis());
    }

    #[test]
    fn test_checked_add_preserves_ordering() {
        let dt = Utc.with_ymd_and_hms(2026, 3, 15, 14, 0, 0).unwrap();
        let later = dt.checked_add(Duration::hours(2)).unwrap();
        assert!(later > dt);
        assert_eq!(later.epoch_millis() - dt.epoch_millis(), 2 * 3600 * 1000);
    }

    #[test]
    fn test_naive_datetime_point() {
        let naive = Utc
            .with_ymd_and_hms(2026, 3, 15, 14, 0, 0)
            .unwrap()
            .naive_utc();
        let later = naive.checked_add(Duration::milliseconds(500)).unwrap();
        assert_eq!(later.epoch_millis() - naive.epoch_millis(), 500);
    }
}
