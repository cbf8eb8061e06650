use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use chrono::NaiveTime;
use daynote::{
    Clock, DayIdentifier, Rejection, ReminderSheet, ReminderTimeResolver, SheetAction, SystemClock,
    appsettings::AppSettings,
    notifications::{ConfiguredPermissionGate, LogDeliveryChannel, NotificationScheduler},
    storage::{EntitlementPolicy, InMemoryReminderStore},
};
use tokio::runtime::Handle;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    pretty_env_logger::init();

    let settings = AppSettings::load().context("Could not load appsettings")?;
    let timezone = settings.reminders.timezone()?;
    let day_format = settings.reminders.day_format();
    log::debug!(
        "Animated backdrop is {}",
        if settings.experimental.animated_backdrop { "on" } else { "off" }
    );

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let permissions = Arc::new(ConfiguredPermissionGate::new(
        settings.notifications.grant_permission,
    ));
    let notifications = Arc::new(NotificationScheduler::new(
        Handle::current(),
        Arc::new(LogDeliveryChannel),
        permissions.clone(),
        clock.clone(),
    ));
    let store = Arc::new(
        InMemoryReminderStore::new(
            EntitlementPolicy::from_settings(&settings.entitlement),
            permissions,
        )
        .with_notifications(notifications.clone()),
    );
    let resolver = ReminderTimeResolver::new(store, clock, day_format.clone(), timezone)
        .with_default_time(settings.reminders.default_time()?);

    let mut args = env::args().skip(1);
    let day = args
        .next()
        .map(DayIdentifier::from)
        .unwrap_or_else(|| day_format.format(&resolver.now()));
    let time = args
        .next()
        .map(|time| NaiveTime::parse_from_str(&time, "%H:%M"))
        .transpose()
        .context("Reminder time must look like 13:00")?;
    let body = args.collect::<Vec<_>>().join(" ");

    let mut sheet = ReminderSheet::open(&resolver, day);
    if let Some(time) = time {
        sheet.pick_time(time);
    }
    sheet.set_body(Some(body));

    match sheet.schedule() {
        SheetAction::Dismiss => {
            log::info!("Reminder for {} set to {}", sheet.day(), sheet.combined());
        }
        SheetAction::ShowPastTimeAlert => {
            log::warn!("{}", Rejection::PastTime);
            return Ok(());
        }
        SheetAction::PresentPaywall => {
            log::warn!("{} Upgrade to schedule more.", Rejection::EntitlementRequired);
            return Ok(());
        }
    }

    while notifications.pending_count() > 0 {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                log::info!("Interrupted, pending reminders are dropped");
                break;
            }
            _ = tokio::time::sleep(Duration::from_secs(1)) => {}
        }
    }

    Ok(())
}
