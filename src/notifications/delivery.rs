use async_trait::async_trait;

use crate::reminder::Reminder;

#[async_trait]
pub trait ReminderDeliveryChannel: Send + Sync {
    async fn deliver(&self, reminder: &Reminder) -> anyhow::Result<()>;
}

/// Writes fired reminders to the log.
pub struct LogDeliveryChannel;

#[async_trait]
impl ReminderDeliveryChannel for LogDeliveryChannel {
    async fn deliver(&self, reminder: &Reminder) -> anyhow::Result<()> {
        log::info!(
            "Reminder for {} fired at {}: {}",
            reminder.day,
            reminder.fire_at,
            reminder.body.as_deref().unwrap_or("Time to write in your journal.")
        );
        Ok(())
    }
}
