use std::fmt::{Debug, Formatter};

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

#[derive(Copy, Clone, Eq, PartialEq)]
#[must_use]
pub struct Interval {
    /// Inclusive.
    pub start: DateTime<Utc>,

    /// Exclusive.
    pub end: DateTime<Utc>,
}

impl Debug for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}..{:?}", self.start, self.end)
    }
}

impl Interval {
    pub const fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// The calendar day from midnight to the next midnight in the given time zone.
    ///
    /// Returns [`None`] when midnight does not exist in the time zone on that day.
    pub fn from_day<Tz: TimeZone>(day: NaiveDate, time_zone: &Tz) -> Option<Self> {
        let midnight = |day: NaiveDate| {
            day.and_time(NaiveTime::MIN)
                .and_local_timezone(time_zone.clone())
                .earliest()
                .map(|midnight| midnight.with_timezone(&Utc))
        };
        Some(Self::new(midnight(day)?, midnight(day.succ_opt()?)?))
    }

    #[must_use]
    pub fn contains(self, other: DateTime<Utc>) -> bool {
        (self.start <= other) && (other < self.end)
    }
}
