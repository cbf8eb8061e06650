use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

use chrono::DateTime;
use chrono_tz::Tz;

use crate::{
    notifications::{NotificationScheduler, PermissionGate},
    reminder::{DayIdentifier, Reminder},
};

use super::EntitlementPolicy;

#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddResult {
    Added,
    /// The store declined the record; the caller should offer an upgrade.
    EntitlementRequired,
}

/// Reminders keyed by day. Writes are last-writer-wins.
pub trait ReminderStore: Send + Sync {
    fn lookup(&self, day: &DayIdentifier) -> Option<Reminder>;
    fn add(&self, day: &DayIdentifier, fire_at: DateTime<Tz>, body: Option<String>) -> AddResult;
    fn remove(&self, day: &DayIdentifier);
    fn request_permission(&self);
}

pub struct InMemoryReminderStore {
    records: RwLock<HashMap<DayIdentifier, Reminder>>,
    policy: EntitlementPolicy,
    permissions: Arc<dyn PermissionGate>,
    notifications: Option<Arc<NotificationScheduler>>,
}

impl InMemoryReminderStore {
    pub fn new(policy: EntitlementPolicy, permissions: Arc<dyn PermissionGate>) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            policy,
            permissions,
            notifications: None,
        }
    }

    pub fn with_notifications(mut self, notifications: Arc<NotificationScheduler>) -> Self {
        self.notifications = Some(notifications);
        self
    }

    pub fn len(&self) -> usize {
        self.records.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ReminderStore for InMemoryReminderStore {
    fn lookup(&self, day: &DayIdentifier) -> Option<Reminder> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        records.get(day).cloned()
    }

    fn add(&self, day: &DayIdentifier, fire_at: DateTime<Tz>, body: Option<String>) -> AddResult {
        let reminder = Reminder {
            day: day.clone(),
            fire_at,
            body,
        };

        // Notifications are updated under the records lock so they never diverge.
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        let replacing = records.contains_key(day);
        if !self.policy.allows(records.len(), replacing) {
            log::info!(
                "Declined reminder for {}: {:?} allows no more records",
                day,
                self.policy
            );
            return AddResult::EntitlementRequired;
        }

        log::info!("Stored reminder for {} at {}", day, reminder.fire_at);
        records.insert(day.clone(), reminder.clone());
        if let Some(notifications) = &self.notifications {
            notifications.schedule(reminder);
        }

        AddResult::Added
    }

    fn remove(&self, day: &DayIdentifier) {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        if records.remove(day).is_some() {
            log::info!("Removed reminder for {}", day);
        }

        if let Some(notifications) = &self.notifications {
            notifications.cancel(day);
        }
    }

    fn request_permission(&self) {
        self.permissions.request_permission();
    }
}
