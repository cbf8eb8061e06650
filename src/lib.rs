pub mod appsettings;
pub mod calendar;
pub mod notifications;
pub mod progress;
pub mod reminder;
pub mod resolver;
pub mod sheet;
pub mod storage;

#[cfg(test)]
mod test_utils;

pub use calendar::{Clock, DayFormat, SystemClock};
pub use reminder::{DayIdentifier, Reminder};
pub use resolver::{Rejection, ReminderTimeResolver, SubmitOutcome};
pub use sheet::{ReminderSheet, SheetAction};
