//! Bearer token verification.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use netshare_core::config::AuthConfig;
use netshare_core::error::AppError;

use super::claims::Claims;

/// Validates HS256 bearer tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5;
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Verify signature, expiry and issuer, returning the claims.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::authentication("Token has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidToken => {
                    AppError::authentication("Invalid token format")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::authentication("Invalid token signature")
                }
                jsonwebtoken::errors::ErrorKind::InvalidIssuer => {
                    AppError::authentication("Invalid token issuer")
                }
                _ => AppError::authentication(format!("Token validation failed: {e}")),
            })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use uuid::Uuid;

    use netshare_core::error::ErrorKind;

    use super::*;
    use crate::jwt::encoder::JwtEncoder;

    fn config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".into(),
            token_ttl_minutes: 5,
            issuer: "netshare".into(),
        }
    }

    #[test]
    fn test_roundtrip_subject() {
        let cfg = config();
        let user = Uuid::new_v4();
        let issued = JwtEncoder::new(&cfg).issue(user, "alice").expect("issue");
        let claims = JwtDecoder::new(&cfg).decode(&issued.token).expect("decode");
        assert_eq!(claims.user_id(), user);
        assert_eq!(claims.username.as_deref(), Some("alice"));
    }

    #[test]
    fn test_expired_token_rejected() {
        let cfg = config();
        let issued = JwtEncoder::new(&cfg)
            .issue_with_ttl(Uuid::new_v4(), "bob", Duration::minutes(-10))
            .expect("issue");
        let err = JwtDecoder::new(&cfg).decode(&issued.token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
        assert_eq!(err.message, "Token has expired");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issued = JwtEncoder::new(&config())
            .issue(Uuid::new_v4(), "carol")
            .expect("issue");
        let other = AuthConfig {
            jwt_secret: "different".into(),
            ..config()
        };
        let err = JwtDecoder::new(&other).decode(&issued.token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[test]
    fn test_wrong_issuer_rejected() {
        let issued = JwtEncoder::new(&AuthConfig {
            issuer: "elsewhere".into(),
            ..config()
        })
        .issue(Uuid::new_v4(), "dave")
        .expect("issue");
        let err = JwtDecoder::new(&config()).decode(&issued.token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[test]
    fn test_garbage_rejected() {
        let err = JwtDecoder::new(&config()).decode("not-a-jwt").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }
}
