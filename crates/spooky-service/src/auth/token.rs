use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use spooky_core::config::AuthConfig;

use crate::error::{ServiceError, ServiceResult};

/// Claims carried by a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Id of the user the token was issued to.
    pub sub: uuid::Uuid,
    pub username: String,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

/// Issues and verifies HS256 bearer tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    #[must_use]
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs: i64::try_from(ttl_secs).unwrap_or(i64::MAX),
        }
    }

    #[must_use]
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.jwt_secret, config.token_ttl_secs)
    }

    /// ## Summary
    /// Issues a token for `user_id`, valid for the configured lifetime.
    ///
    /// ## Errors
    /// Returns an error if the token cannot be signed.
    pub fn issue(&self, user_id: uuid::Uuid, username: &str) -> ServiceResult<String> {
        self.issue_at(user_id, username, chrono::Utc::now().timestamp())
    }

    /// ## Summary
    /// Issues a token as if the current time were `now` (seconds since the epoch).
    ///
    /// ## Errors
    /// Returns an error if the token cannot be signed.
    pub fn issue_at(&self, user_id: uuid::Uuid, username: &str, now: i64) -> ServiceResult<String> {
        let claims = Claims {
            sub: user_id,
            username: username.to_string(),
            iat: now,
            exp: now.saturating_add(self.ttl_secs),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| ServiceError::InvalidConfiguration(format!("Failed to sign token: {e}")))
    }

    /// ## Summary
    /// Verifies the signature and expiry of `token` and returns its claims.
    ///
    /// ## Errors
    /// Returns [`ServiceError::InvalidToken`] if the token is malformed, signed
    /// with another secret, or expired.
    pub fn verify(&self, token: &str) -> ServiceResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| ServiceError::InvalidToken(e.to_string()))
    }
}
