use chrono::NaiveTime;
use chrono_tz::Tz;
use config::{
    Config, ConfigBuilder, ConfigError, Environment, File, FileFormat, builder::DefaultState,
};
use serde::Deserialize;

use crate::calendar::DayFormat;

#[derive(Deserialize, Debug, Clone)]
pub struct ReminderSettings {
    pub timezone: String,
    pub default_hour: u32,
    pub default_minute: u32,
    pub day_format: String,
}

impl ReminderSettings {
    pub fn timezone(&self) -> anyhow::Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| anyhow::anyhow!("Unknown timezone \"{}\": {}", self.timezone, e))
    }

    pub fn default_time(&self) -> anyhow::Result<NaiveTime> {
        NaiveTime::from_hms_opt(self.default_hour, self.default_minute, 0).ok_or_else(|| {
            anyhow::anyhow!(
                "Invalid default reminder time {:02}:{:02}",
                self.default_hour,
                self.default_minute
            )
        })
    }

    pub fn day_format(&self) -> DayFormat {
        DayFormat::new(self.day_format.clone())
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct EntitlementSettings {
    pub premium: bool,
    pub free_reminder_limit: usize,
}

#[derive(Deserialize, Debug, Clone)]
pub struct NotificationSettings {
    pub grant_permission: bool,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ExperimentalSettings {
    pub animated_backdrop: bool,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    pub reminders: ReminderSettings,
    pub entitlement: EntitlementSettings,
    pub notifications: NotificationSettings,
    pub experimental: ExperimentalSettings,
}

impl AppSettings {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(Self::environment())
    }

    /// `APP_REMINDERS__TIMEZONE` sets `reminders.timezone`.
    fn environment() -> Environment {
        Environment::with_prefix("APP")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn load_with(environment: Environment) -> Result<Self, ConfigError> {
        Self::with_defaults()?
            .add_source(File::with_name("appsettings").required(true))
            .add_source(File::with_name("appsettings.local").required(false))
            .add_source(environment)
            .build()?
            .try_deserialize()
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Self::with_defaults()?
            .add_source(File::from_str(contents, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    fn with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("reminders.timezone", "UTC")?
            .set_default("reminders.default_hour", 9)?
            .set_default("reminders.default_minute", 0)?
            .set_default("reminders.day_format", crate::calendar::DEFAULT_DAY_FORMAT)?
            .set_default("entitlement.premium", false)?
            .set_default("entitlement.free_reminder_limit", 3)?
            .set_default("notifications.grant_permission", true)?
            .set_default("experimental.animated_backdrop", false)
    }
}
