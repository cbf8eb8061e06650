use crate::appsettings::EntitlementSettings;

/// Decides whether a new reminder fits the user's subscription tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntitlementPolicy {
    Unlimited,
    FreeTier { limit: usize },
}

impl EntitlementPolicy {
    pub fn from_settings(settings: &EntitlementSettings) -> Self {
        if settings.premium {
            Self::Unlimited
        } else {
            Self::FreeTier {
                limit: settings.free_reminder_limit,
            }
        }
    }

    /// `stored` is the number of records already held. Replacing the record of a
    /// day that has one never grows the count, so it is always allowed.
    pub fn allows(&self, stored: usize, replacing: bool) -> bool {
        match self {
            Self::Unlimited => true,
            Self::FreeTier { limit } => replacing || stored < *limit,
        }
    }
}
