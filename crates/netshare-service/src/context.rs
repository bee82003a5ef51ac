//! Request context carrying the authenticated user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Context for the current authenticated request.
///
/// Built by the API extractor from verified token claims and passed into
/// service methods so that every operation knows *who* is acting and
/// *when*. Expiry checks use `request_time` so one request sees one clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The username as stored.
    pub username: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context stamped with the current time.
    pub fn new(user_id: Uuid, username: String) -> Self {
        Self {
            user_id,
            username,
            request_time: Utc::now(),
        }
    }

    /// Whether `user_id` is the caller.
    pub fn is(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}
