//! Session token handling
//!
//! The token *is* the session: a signed, self-contained claim set with a
//! fixed lifetime, held by the browser. Nothing is stored server-side, so
//! logout only clears the browser's copy.

use crate::config::JwtConfig;
use crate::domain::Identity;
use crate::error::{AppError, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims embedded in a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// The asserted identity, including any opaque fields from login
    #[serde(flatten)]
    pub identity: Identity,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// Signs and verifies session tokens with the process-wide secret
#[derive(Clone)]
pub struct JwtManager {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtManager {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Create a Validation with a strict leeway (5 seconds) instead of the
    /// default 60 seconds, so sessions expire promptly while still
    /// tolerating minor clock skew.
    fn strict_validation(&self) -> Validation {
        let mut v = Validation::new(Algorithm::HS256);
        v.leeway = 5;
        v
    }

    /// Issue a session token for the asserted identity.
    ///
    /// The identity is trusted as-is; expiry is fixed at the configured
    /// session TTL from now. Signing failure is a process misconfiguration
    /// and surfaces as an internal error.
    pub fn sign_session(&self, identity: &Identity) -> Result<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.config.session_ttl_secs);

        let claims = SessionClaims {
            identity: identity.clone(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("token signing failed: {e}")))
    }

    /// Verify a session token and recover its claims.
    ///
    /// Any failure (malformed token, bad signature, expired) collapses into
    /// one `InvalidCredential` rejection.
    pub fn verify_session(&self, token: &str) -> Result<SessionClaims> {
        decode::<SessionClaims>(token, &self.decoding_key, &self.strict_validation())
            .map(|data| data.claims)
            .map_err(|e| AppError::InvalidCredential(e.to_string()))
    }
}
