use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::UserId;

/// Errors that can occur while issuing tokens or checking passwords
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Token error: {0}")]
    TokenError(#[from] jsonwebtoken::errors::Error),

    #[error("Token subject is missing or malformed")]
    InvalidSubject,

    #[error("Password hashing error: {0}")]
    HashError(#[from] bcrypt::BcryptError),
}

/// JWT payload. `sub` carries the user id as a string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// Issues and verifies HS256 bearer tokens
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: chrono::Duration,
}

impl TokenService {
    pub fn new(secret: &str, expire_minutes: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl: chrono::Duration::minutes(expire_minutes),
        }
    }

    /// Mint a token for `user_id` that expires after the configured TTL
    pub fn issue(&self, user_id: UserId) -> Result<String, AuthError> {
        let expires_at = chrono::Utc::now() + self.ttl;
        let claims = Claims {
            sub: user_id.to_string(),
            exp: usize::try_from(expires_at.timestamp()).unwrap_or(0),
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?)
    }

    /// Verify signature and expiry and return the user id in `sub`
    pub fn verify(&self, token: &str) -> Result<UserId, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;

        data.claims
            .sub
            .parse::<UserId>()
            .map_err(|_| AuthError::InvalidSubject)
    }
}

/// bcrypt password hashing with a configurable cost
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        Ok(bcrypt::hash(password, self.cost)?)
    }

    pub fn verify(&self, password: &str, hashed: &str) -> Result<bool, AuthError> {
        Ok(bcrypt::verify(password, hashed)?)
    }
}
