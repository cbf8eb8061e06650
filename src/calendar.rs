use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::reminder::DayIdentifier;

pub const DEFAULT_DAY_FORMAT: &str = "%Y-%m-%d";

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Converts between day identifiers and calendar dates.
#[derive(Debug, Clone)]
pub struct DayFormat {
    format: String,
}

impl DayFormat {
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
        }
    }

    pub fn parse(&self, day: &DayIdentifier) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(day.as_str(), &self.format).ok()
    }

    pub fn format<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> DayIdentifier
    where
        Tz::Offset: std::fmt::Display,
    {
        DayIdentifier::new(instant.format(&self.format).to_string())
    }

    pub fn format_date(&self, date: NaiveDate) -> DayIdentifier {
        DayIdentifier::new(date.format(&self.format).to_string())
    }
}

impl Default for DayFormat {
    fn default() -> Self {
        Self::new(DEFAULT_DAY_FORMAT)
    }
}
