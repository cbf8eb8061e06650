use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

use crate::{
    calendar::{Clock, DayFormat},
    reminder::{DayIdentifier, Reminder},
    storage::{AddResult, ReminderStore},
};

/// Why a submission did not schedule anything. Both are recoverable by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("This reminder time has already passed. Please pick a later time.")]
    PastTime,
    #[error("Your current plan does not allow more reminders.")]
    EntitlementRequired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Scheduled,
    Rejected(Rejection),
}

const DEFAULT_REMINDER_TIME: NaiveTime = match NaiveTime::from_hms_opt(9, 0, 0) {
    Some(time) => time,
    None => NaiveTime::MIN,
};

/// Turns a day identifier and a picked time of day into a reminder timestamp and
/// decides whether it may be stored.
pub struct ReminderTimeResolver {
    store: Arc<dyn ReminderStore>,
    clock: Arc<dyn Clock>,
    day_format: DayFormat,
    timezone: Tz,
    default_time: NaiveTime,
}

impl ReminderTimeResolver {
    pub fn new(
        store: Arc<dyn ReminderStore>,
        clock: Arc<dyn Clock>,
        day_format: DayFormat,
        timezone: Tz,
    ) -> Self {
        Self {
            store,
            clock,
            day_format,
            timezone,
            default_time: DEFAULT_REMINDER_TIME,
        }
    }

    pub fn with_default_time(mut self, default_time: NaiveTime) -> Self {
        self.default_time = default_time;
        self
    }

    pub fn store(&self) -> &dyn ReminderStore {
        self.store.as_ref()
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn now(&self) -> DateTime<Tz> {
        self.clock.now().with_timezone(&self.timezone)
    }

    /// Wall-clock time in the configured zone. `None` inside a DST gap; the earlier
    /// instant inside a DST fold.
    pub fn localize(&self, wall: NaiveDateTime) -> Option<DateTime<Tz>> {
        self.timezone.from_local_datetime(&wall).earliest()
    }

    /// Starting value for the time picker of `day`.
    pub fn initial_selection(
        &self,
        day: &DayIdentifier,
        existing: Option<&Reminder>,
    ) -> DateTime<Tz> {
        if let Some(reminder) = existing {
            return reminder.fire_at.with_timezone(&self.timezone);
        }

        self.day_format
            .parse(day)
            .and_then(|date| self.localize(date.and_time(self.default_time)))
            .unwrap_or_else(|| self.now())
    }

    /// Date of `day` with the hour and minute of `time_of_day`. Never fails: when the
    /// day does not parse or the wall time does not exist, `time_of_day` is returned as is.
    pub fn combine(&self, day: &DayIdentifier, time_of_day: DateTime<Tz>) -> DateTime<Tz> {
        let Some(date) = self.day_format.parse(day) else {
            log::debug!("Day identifier {} did not parse, using raw selection", day);
            return time_of_day;
        };

        let local = time_of_day.with_timezone(&self.timezone);
        let Some(wall_time) = NaiveTime::from_hms_opt(local.hour(), local.minute(), 0) else {
            return time_of_day;
        };

        self.localize(date.and_time(wall_time)).unwrap_or_else(|| {
            log::debug!(
                "{} {} does not exist in {}, using raw selection",
                date,
                wall_time,
                self.timezone
            );
            time_of_day
        })
    }

    /// Evaluated against the clock on every call.
    pub fn is_in_past(&self, timestamp: &DateTime<Tz>) -> bool {
        timestamp.with_timezone(&Utc) <= self.clock.now()
    }

    pub fn submit(
        &self,
        day: &DayIdentifier,
        combined: DateTime<Tz>,
        body: Option<String>,
    ) -> SubmitOutcome {
        if self.is_in_past(&combined) {
            log::info!("Rejected reminder for {}: {} is in the past", day, combined);
            return SubmitOutcome::Rejected(Rejection::PastTime);
        }

        match self.store.add(day, combined, body) {
            AddResult::Added => SubmitOutcome::Scheduled,
            AddResult::EntitlementRequired => {
                SubmitOutcome::Rejected(Rejection::EntitlementRequired)
            }
        }
    }

    pub fn clear(&self, day: &DayIdentifier) {
        self.store.remove(day);
    }
}
