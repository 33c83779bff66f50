//! JWT service for token generation and validation
//!
//! This module provides functionality for creating and validating the signed
//! session tokens issued on login, using the HS256 algorithm with a shared
//! secret.

use anyhow::Result;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::User;

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Shared secret used to sign and verify tokens
    pub secret: String,
}

impl JwtConfig {
    /// Create a new JwtConfig from environment variables
    ///
    /// # Environment Variables
    /// - `SECRET`: shared signing secret for session tokens
    pub fn from_env() -> Result<Self> {
        let secret = std::env::var("SECRET")
            .map_err(|_| anyhow::anyhow!("SECRET environment variable not set"))?;

        Ok(JwtConfig { secret })
    }
}

/// JWT claims structure
///
/// Tokens carry no expiry claim; once issued they remain valid until the
/// signing secret changes.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub id: Uuid,
    /// Username at the time of issuance
    pub username: String,
}

/// JWT service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtService {
    /// Initialize a new JWT service
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        // Tokens have no exp claim, so expiry checking must be disabled
        let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        JwtService {
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Generate a session token for a user
    pub fn generate_token(&self, user: &User) -> Result<String> {
        let claims = Claims {
            id: user.id,
            username: user.username.clone(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Validate a token and return the claims
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(token_data.claims)
    }
}
