//! Calendar-day boundary.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};

/// Maps instants to the calendar day used for quotas and activity counts.
///
/// The offset is fixed per deployment; the service has no per-user timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBoundary {
    offset: FixedOffset,
}

impl DayBoundary {
    /// Day boundary at UTC midnight.
    pub fn utc() -> Self {
        Self {
            offset: Utc.fix(),
        }
    }

    /// Day boundary shifted by `minutes` east of UTC.
    ///
    /// Returns `None` when the offset is a day or more.
    pub fn from_offset_minutes(minutes: i32) -> Option<Self> {
        FixedOffset::east_opt(minutes.checked_mul(60)?).map(|offset| Self { offset })
    }

    /// Calendar date of an instant.
    pub fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }

    /// Today's calendar date.
    pub fn today(&self) -> NaiveDate {
        self.date_of(Utc::now())
    }
}

impl Default for DayBoundary {
    fn default() -> Self {
        Self::utc()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_offset_moves_date() {
        let instant = Utc.with_ymd_and_hms(2026, 3, 1, 23, 30, 0).unwrap();
        assert_eq!(
            DayBoundary::utc().date_of(instant),
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
        );
        let tokyo = DayBoundary::from_offset_minutes(9 * 60).unwrap();
        assert_eq!(
            tokyo.date_of(instant),
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
        );
    }

    #[test]
    fn test_rejects_out_of_range_offset() {
        assert!(DayBoundary::from_offset_minutes(24 * 60).is_none());
    }
}
