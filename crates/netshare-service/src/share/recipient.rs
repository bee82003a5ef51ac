//! Checks common to every kind of share and invitation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use netshare_core::error::AppError;
use netshare_core::result::AppResult;
use netshare_database::repositories::UserRepository;

use crate::context::RequestContext;

/// Input for granting a share of either kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewShare<L> {
    /// Recipient.
    pub shared_with_id: Uuid,
    /// Level to grant.
    pub permission_level: L,
    /// Optional expiry; must be in the future.
    pub expires_at: Option<DateTime<Utc>>,
}

/// The recipient must exist and must not be the caller.
pub(crate) async fn require_recipient(
    users: &UserRepository,
    ctx: &RequestContext,
    field: &str,
    recipient_id: Uuid,
) -> AppResult<()> {
    if ctx.is(recipient_id) {
        return Err(AppError::field(field, "You cannot share with yourself"));
    }
    if users.find_by_id(recipient_id).await?.is_none() {
        return Err(AppError::field(field, "User does not exist"));
    }
    Ok(())
}

/// A supplied expiry must lie after `now`.
pub(crate) fn require_future(
    field: &str,
    expires_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> AppResult<()> {
    match expires_at {
        Some(at) if at <= now => Err(AppError::field(field, "Expiry must be in the future")),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn test_future_expiry() {
        let now = Utc::now();
        assert!(require_future("expires_at", None, now).is_ok());
        assert!(require_future("expires_at", Some(now + Duration::minutes(1)), now).is_ok());
        assert!(require_future("expires_at", Some(now), now).is_err());
        assert!(require_future("expires_at", Some(now - Duration::days(1)), now).is_err());
    }
}
