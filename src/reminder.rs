use std::fmt;

use chrono::DateTime;
use chrono_tz::Tz;

/// Opaque key naming a calendar day. Its format belongs to [`crate::calendar::DayFormat`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DayIdentifier(String);

impl DayIdentifier {
    pub fn new(inner: impl Into<String>) -> Self {
        Self(inner.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DayIdentifier {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for DayIdentifier {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for DayIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub day: DayIdentifier,
    pub fire_at: DateTime<Tz>,
    pub body: Option<String>,
}
