//! Access token verification.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use petadopt_core::config::AuthConfig;
use petadopt_core::error::AppError;

use super::claims::Claims;

/// Verifies signature and expiry of access tokens.
///
/// Session liveness is checked separately by the session manager.
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

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decode and verify an access token.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::authentication("Token has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::authentication("Invalid token signature")
                }
                _ => AppError::authentication("Invalid token"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::JwtEncoder;
    use chrono::{Duration, Utc};
    use petadopt_core::error::ErrorKind;
    use petadopt_core::types::{SessionId, UserId};

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_round_trip_claims() {
        let cfg = config("unit-test-secret-0123456789");
        let user_id = UserId::new();
        let session_id = SessionId::new();
        let issued = JwtEncoder::new(&cfg)
            .issue(user_id, session_id, "alice", Utc::now() + Duration::days(2))
            .unwrap();

        let claims = JwtDecoder::new(&cfg).decode(&issued.token).unwrap();
        assert_eq!(claims.user_id(), user_id);
        assert_eq!(claims.session_id(), session_id);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.exp, issued.expires_at.timestamp());
    }

    #[test]
    fn test_expiry_capped_by_session() {
        let cfg = config("unit-test-secret-0123456789");
        let not_after = Utc::now() + Duration::minutes(10);
        let issued = JwtEncoder::new(&cfg)
            .issue(UserId::new(), SessionId::new(), "alice", not_after)
            .unwrap();
        assert_eq!(issued.expires_at, not_after);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issued = JwtEncoder::new(&config("unit-test-secret-0123456789"))
            .issue(UserId::new(), SessionId::new(), "alice", Utc::now() + Duration::days(1))
            .unwrap();
        let err = JwtDecoder::new(&config("another-secret-9876543210"))
            .decode(&issued.token)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[test]
    fn test_garbage_rejected() {
        let err = JwtDecoder::new(&config("unit-test-secret-0123456789"))
            .decode("not.a.token")
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }
}
