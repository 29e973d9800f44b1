use chrono::{NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use thiserror::Error;

/// The configured timezone name is not a known IANA zone
#[derive(Debug, Error, PartialEq)]
#[error("unknown timezone '{0}': expected an IANA name like Asia/Tokyo")]
pub struct UnknownTimezone(pub String);

/// Source of "today" for every date calculation in the engine.
///
/// A calendar date is only meaningful relative to a civil timezone, so the
/// zone is configured once here and everything else takes a plain
/// `NaiveDate`. The host's local timezone is never consulted.
#[derive(Debug, Clone)]
pub struct CalendarClock {
    tz: Tz,
    fixed: Option<NaiveDate>,
}

impl CalendarClock {
    /// Create a clock anchored to an IANA timezone (e.g. "Asia/Tokyo")
    pub fn new(tz: &str) -> Result<Self, UnknownTimezone> {
        let tz: Tz = tz.parse().map_err(|_| UnknownTimezone(tz.to_string()))?;
        Ok(Self { tz, fixed: None })
    }

    /// Create a clock that always reports the given date
    pub fn fixed(date: NaiveDate) -> Self {
        Self {
            tz: chrono_tz::UTC,
            fixed: Some(date),
        }
    }

    /// Current civil date in the configured zone, time-of-day stripped
    pub fn today(&self) -> NaiveDate {
        match self.fixed {
            Some(date) => date,
            None => self
                .tz
                .from_utc_datetime(&Utc::now().naive_utc())
                .date_naive(),
        }
    }
}
