//! Token issuing, used by the CLI and tests.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use netshare_core::config::AuthConfig;
use netshare_core::error::AppError;

use super::claims::Claims;

/// Creates signed HS256 bearer tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    issuer: String,
    ttl_minutes: i64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("issuer", &self.issuer)
            .field("ttl_minutes", &self.ttl_minutes)
            .finish()
    }
}

/// A freshly minted token.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct IssuedToken {
    /// Encoded JWT.
    pub token: String,
    /// Expiration instant.
    pub expires_at: DateTime<Utc>,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: config.issuer.clone(),
            ttl_minutes: i64::try_from(config.token_ttl_minutes).unwrap_or(i64::MAX / 60_000),
        }
    }

    /// Issue a token for `user_id` using the configured lifetime.
    pub fn issue(&self, user_id: Uuid, username: &str) -> Result<IssuedToken, AppError> {
        self.issue_with_ttl(user_id, username, Duration::minutes(self.ttl_minutes))
    }

    /// Issue a token with an explicit lifetime (negative lifetimes yield expired tokens).
    pub fn issue_with_ttl(
        &self,
        user_id: Uuid,
        username: &str,
        ttl: Duration,
    ) -> Result<IssuedToken, AppError> {
        let now = Utc::now();
        let expires_at = now + ttl;
        let claims = Claims {
            sub: user_id,
            username: Some(username.to_string()),
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))?;

        Ok(IssuedToken { token, expires_at })
    }
}
