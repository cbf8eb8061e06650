use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tokio::{runtime::Handle, task::JoinHandle};
use tokio_util::sync::CancellationToken;

use crate::{
    calendar::Clock,
    reminder::{DayIdentifier, Reminder},
};

use super::{PermissionGate, ReminderDeliveryChannel};

struct ScheduledTask {
    fire_at: DateTime<Tz>,
    task_handle: JoinHandle<()>,
    cancellation_token: CancellationToken,
}

impl ScheduledTask {
    fn cancel(self) {
        self.cancellation_token.cancel();
    }

    fn is_finished(&self) -> bool {
        self.task_handle.is_finished()
    }
}

/// Keeps at most one pending local notification per day.
pub struct NotificationScheduler {
    runtime: Handle,
    tasks: Mutex<HashMap<DayIdentifier, ScheduledTask>>,
    delivery_channel: Arc<dyn ReminderDeliveryChannel>,
    permissions: Arc<dyn PermissionGate>,
    clock: Arc<dyn Clock>,
}

impl NotificationScheduler {
    pub fn new(
        runtime: Handle,
        delivery_channel: Arc<dyn ReminderDeliveryChannel>,
        permissions: Arc<dyn PermissionGate>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            runtime,
            tasks: Mutex::new(HashMap::new()),
            delivery_channel,
            permissions,
            clock,
        }
    }

    /// Replaces any pending notification for the reminder's day. Returns `false` when the
    /// reminder's time has already passed and nothing was scheduled.
    pub fn schedule(&self, reminder: Reminder) -> bool {
        let mut tasks = self.lock_tasks();
        Self::clean_finished_tasks(&mut tasks);

        if let Some(previous) = tasks.remove(&reminder.day) {
            log::debug!("Replacing pending notification for {}", reminder.day);
            previous.cancel();
        }

        let delta = reminder.fire_at.with_timezone(&Utc) - self.clock.now();
        let delay = match delta.to_std() {
            Ok(delay) if !delay.is_zero() => delay,
            _ => {
                log::warn!(
                    "Not scheduling notification for {}: {} is not in the future",
                    reminder.day,
                    reminder.fire_at
                );
                return false;
            }
        };

        let cancellation_token = CancellationToken::new();
        let task_cancellation_token = cancellation_token.child_token();
        let delivery_channel = Arc::clone(&self.delivery_channel);
        let permissions = Arc::clone(&self.permissions);
        let day = reminder.day.clone();
        let fire_at = reminder.fire_at;

        log::info!("Scheduling notification for {} in {:?}", day, delay);
        let task_handle = self.runtime.spawn(async move {
            deliver_after_delay(
                task_cancellation_token,
                reminder,
                delay,
                delivery_channel.as_ref(),
                permissions.as_ref(),
            )
            .await
        });

        tasks.insert(
            day,
            ScheduledTask {
                fire_at,
                task_handle,
                cancellation_token,
            },
        );
        true
    }

    /// Returns whether a pending notification was cancelled.
    pub fn cancel(&self, day: &DayIdentifier) -> bool {
        match self.lock_tasks().remove(day) {
            Some(task) => {
                log::info!("Cancelling notification for {}", day);
                task.cancel();
                true
            }
            None => false,
        }
    }

    /// Fire time of the pending notification for `day`.
    pub fn scheduled_at(&self, day: &DayIdentifier) -> Option<DateTime<Tz>> {
        let mut tasks = self.lock_tasks();
        Self::clean_finished_tasks(&mut tasks);
        tasks.get(day).map(|task| task.fire_at)
    }

    pub fn pending_count(&self) -> usize {
        let mut tasks = self.lock_tasks();
        Self::clean_finished_tasks(&mut tasks);
        tasks.len()
    }

    fn clean_finished_tasks(tasks: &mut HashMap<DayIdentifier, ScheduledTask>) {
        let before = tasks.len();
        tasks.retain(|_, task| !task.is_finished());
        let after = tasks.len();

        if before != after {
            log::debug!("Cleaned up {} finished notification tasks", before - after);
        }
    }

    fn lock_tasks(&self) -> MutexGuard<'_, HashMap<DayIdentifier, ScheduledTask>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for NotificationScheduler {
    fn drop(&mut self) {
        for (_, task) in self.lock_tasks().drain() {
            task.cancel();
        }
    }
}

async fn deliver_after_delay(
    cancellation_token: CancellationToken,
    reminder: Reminder,
    delay: Duration,
    delivery_channel: &dyn ReminderDeliveryChannel,
    permissions: &dyn PermissionGate,
) {
    tokio::select! {
        _ = cancellation_token.cancelled() => {
            log::debug!("Notification for {} was cancelled", reminder.day);
        },
        _ = tokio::time::sleep(delay) => {
            if !permissions.is_authorized() {
                log::warn!(
                    "Dropping notification for {}: permission is {:?}",
                    reminder.day,
                    permissions.status()
                );
                return;
            }

            if let Err(error) = delivery_channel.deliver(&reminder).await {
                log::error!("Failed to deliver notification for {}: {error:#}", reminder.day);
            }
        }
    }
}
