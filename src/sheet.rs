use chrono::{DateTime, NaiveTime};
use chrono_tz::Tz;

use crate::{
    reminder::DayIdentifier,
    resolver::{Rejection, ReminderTimeResolver, SubmitOutcome},
};

/// What the presenting screen should do after a sheet action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetAction {
    Dismiss,
    PresentPaywall,
    ShowPastTimeAlert,
}

impl From<SubmitOutcome> for SheetAction {
    fn from(outcome: SubmitOutcome) -> Self {
        match outcome {
            SubmitOutcome::Scheduled => Self::Dismiss,
            SubmitOutcome::Rejected(Rejection::EntitlementRequired) => Self::PresentPaywall,
            SubmitOutcome::Rejected(Rejection::PastTime) => Self::ShowPastTimeAlert,
        }
    }
}

/// Editing state of the reminder sheet for one day.
pub struct ReminderSheet<'r> {
    resolver: &'r ReminderTimeResolver,
    day: DayIdentifier,
    selection: DateTime<Tz>,
    body: Option<String>,
    has_existing_reminder: bool,
}

impl<'r> ReminderSheet<'r> {
    pub fn open(resolver: &'r ReminderTimeResolver, day: DayIdentifier) -> Self {
        let existing = resolver.store().lookup(&day);
        let selection = resolver.initial_selection(&day, existing.as_ref());
        resolver.store().request_permission();

        log::debug!(
            "Opened reminder sheet for {} (existing = {}, selection = {})",
            day,
            existing.is_some(),
            selection
        );

        Self {
            resolver,
            day,
            selection,
            has_existing_reminder: existing.is_some(),
            body: existing.and_then(|reminder| reminder.body),
        }
    }

    pub fn day(&self) -> &DayIdentifier {
        &self.day
    }

    pub fn selection(&self) -> DateTime<Tz> {
        self.selection
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn has_existing_reminder(&self) -> bool {
        self.has_existing_reminder
    }

    pub fn set_selection(&mut self, selection: DateTime<Tz>) {
        self.selection = selection;
    }

    /// Moves the picker to `time` on the date it currently shows. A wall time that does
    /// not exist in the configured zone leaves the selection untouched.
    pub fn pick_time(&mut self, time: NaiveTime) {
        let date = self.selection.with_timezone(&self.resolver.timezone()).date_naive();
        match self.resolver.localize(date.and_time(time)) {
            Some(selection) => self.selection = selection,
            None => log::debug!("Ignoring nonexistent wall time {} {}", date, time),
        }
    }

    pub fn set_body(&mut self, body: Option<String>) {
        self.body = body.filter(|text| !text.trim().is_empty());
    }

    pub fn combined(&self) -> DateTime<Tz> {
        self.resolver.combine(&self.day, self.selection)
    }

    /// Selection and body stay as they are after a rejection so the user can correct them.
    pub fn schedule(&mut self) -> SheetAction {
        let outcome = self
            .resolver
            .submit(&self.day, self.combined(), self.body.clone());

        if outcome == SubmitOutcome::Scheduled {
            self.has_existing_reminder = true;
        }

        SheetAction::from(outcome)
    }

    pub fn clear(&mut self) -> SheetAction {
        self.resolver.clear(&self.day);
        self.has_existing_reminder = false;
        SheetAction::Dismiss
    }
}
