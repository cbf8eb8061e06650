use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};

use crate::{
    calendar::Clock,
    notifications::{ConfiguredPermissionGate, ReminderDeliveryChannel},
    reminder::Reminder,
    storage::{EntitlementPolicy, InMemoryReminderStore},
};

pub struct FixedClock(Mutex<DateTime<Utc>>);

impl FixedClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance(&self, delta: TimeDelta) {
        *self.0.lock().unwrap() += delta;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

#[derive(Default)]
pub struct RecordingDeliveryChannel(Mutex<Vec<Reminder>>);

impl RecordingDeliveryChannel {
    pub fn delivered(&self) -> Vec<Reminder> {
        self.0.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReminderDeliveryChannel for RecordingDeliveryChannel {
    async fn deliver(&self, reminder: &Reminder) -> anyhow::Result<()> {
        self.0.lock().unwrap().push(reminder.clone());
        Ok(())
    }
}

pub fn store(policy: EntitlementPolicy) -> Arc<InMemoryReminderStore> {
    Arc::new(InMemoryReminderStore::new(
        policy,
        Arc::new(ConfiguredPermissionGate::new(true)),
    ))
}
