mod entitlement;
mod reminder_store;

pub use entitlement::EntitlementPolicy;
pub use reminder_store::{AddResult, InMemoryReminderStore, ReminderStore};
