//! JWT token verification
//!
//! Tokens are HMAC-signed (HS256/HS384/HS512) with a shared secret. Keys are
//! derived once and shared behind `Arc`.

use chrono::{Duration, Utc};
use gym_groups_shared::AuthError;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    #[serde(default)]
    pub sub: String,
    /// Expiration time (Unix timestamp); tokens without it never expire
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    /// Issued at (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

/// Pre-computed JWT keys
#[derive(Clone)]
pub struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }

    pub fn encoding(&self) -> &EncodingKey {
        &self.encoding
    }

    pub fn decoding(&self) -> &DecodingKey {
        &self.decoding
    }
}

/// JWT service for token operations
#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    validation: Arc<Validation>,
    token_expiry_secs: i64,
}

impl JwtService {
    /// Create a new JWT service with pre-computed keys
    ///
    /// Call this once at application startup and store in AppState.
    pub fn new(secret: &str, token_expiry_secs: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.leeway = 0;
        // `exp` is checked when present but not demanded
        validation.required_spec_claims = HashSet::new();

        Self {
            keys: JwtKeys::new(secret),
            validation: Arc::new(validation),
            token_expiry_secs,
        }
    }

    /// Issue an HS256 token for `subject`
    ///
    /// Tokens are normally issued by the identity service; this is for
    /// operators and tests.
    pub fn issue_token(&self, subject: &str) -> anyhow::Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            exp: Some((now + Duration::seconds(self.token_expiry_secs)).timestamp()),
            iat: Some(now.timestamp()),
        };

        encode(&Header::default(), &claims, self.keys.encoding())
            .map_err(|e| anyhow::anyhow!("Failed to generate token: {}", e))
    }

    /// Verify signature and expiry, returning the claims
    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        let token_data =
            decode::<Claims>(token, self.keys.decoding(), &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    _ => AuthError::InvalidToken,
                }
            })?;

        Ok(token_data.claims)
    }

    /// Verify a token and return its non-empty subject
    pub fn verify_subject(&self, token: &str) -> Result<String, AuthError> {
        let claims = self.validate_token(token)?;
        if claims.sub.is_empty() {
            return Err(AuthError::MissingSubject);
        }
        Ok(claims.sub)
    }
}
