use std::sync::atomic::{AtomicU8, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    NotDetermined,
    Authorized,
    Denied,
}

impl PermissionStatus {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Authorized,
            2 => Self::Denied,
            _ => Self::NotDetermined,
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            Self::NotDetermined => 0,
            Self::Authorized => 1,
            Self::Denied => 2,
        }
    }
}

/// Notification authorization.
pub trait PermissionGate: Send + Sync {
    /// Fire-and-forget; callers never wait for the answer.
    fn request_permission(&self);
    fn status(&self) -> PermissionStatus;

    fn is_authorized(&self) -> bool {
        self.status() == PermissionStatus::Authorized
    }
}

/// Answers the first request with a preconfigured decision. Later requests are no-ops,
/// the same way a platform only prompts the user once.
pub struct ConfiguredPermissionGate {
    grant: bool,
    status: AtomicU8,
}

impl ConfiguredPermissionGate {
    pub fn new(grant: bool) -> Self {
        Self {
            grant,
            status: AtomicU8::new(PermissionStatus::NotDetermined.as_u8()),
        }
    }
}

impl PermissionGate for ConfiguredPermissionGate {
    fn request_permission(&self) {
        let answer = if self.grant {
            PermissionStatus::Authorized
        } else {
            PermissionStatus::Denied
        };

        let decided = self.status.compare_exchange(
            PermissionStatus::NotDetermined.as_u8(),
            answer.as_u8(),
            Ordering::AcqRel,
            Ordering::Acquire,
        );

        match decided {
            Ok(_) => log::info!("Notification permission resolved to {:?}", answer),
            Err(current) => log::debug!(
                "Notification permission already determined: {:?}",
                PermissionStatus::from_u8(current)
            ),
        }
    }

    fn status(&self) -> PermissionStatus {
        PermissionStatus::from_u8(self.status.load(Ordering::Acquire))
    }
}
