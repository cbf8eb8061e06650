mod delivery;
mod permission;
mod scheduler;

pub use delivery::{LogDeliveryChannel, ReminderDeliveryChannel};
pub use permission::{ConfiguredPermissionGate, PermissionGate, PermissionStatus};
pub use scheduler::NotificationScheduler;
