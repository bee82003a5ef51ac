//! The time-of-read rule shared by every kind of share.

use chrono::{DateTime, Utc};

use super::level::PermissionLevel;

/// A share row that grants some permission level until an optional expiry.
///
/// Expiry is evaluated at read time only; an expired share keeps
/// `is_active = true` in storage.
pub trait ShareGrant {
    /// Level type this share grants.
    type Level: PermissionLevel;

    /// Whether the share has been left enabled by its owner.
    fn is_active(&self) -> bool;

    /// Optional expiry timestamp.
    fn expires_at(&self) -> Option<DateTime<Utc>>;

    /// Granted level.
    fn level(&self) -> Self::Level;

    /// Whether the expiry has passed at `now`.
    fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_some_and(|exp| now >= exp)
    }

    /// Whether the share is active and unexpired at `now`.
    fn is_effective_at(&self, now: DateTime<Utc>) -> bool {
        self.is_active() && !self.is_expired_at(now)
    }

    /// Whether the share permits an action needing `required` at `now`.
    fn grants(&self, required: Self::Level, now: DateTime<Utc>) -> bool {
        self.is_effective_at(now) && self.level().has_at_least(&required)
    }
}
