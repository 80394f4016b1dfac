//! JWT token validation.
//!
//! Tokens are issued by the external identity provider; this service only
//! validates signature and expiry and decodes the claims. Generation
//! exists for tests and local tooling.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::Role;

/// JWT configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Shared HS256 secret (at least 32 bytes in production).
    pub secret: String,
    /// Token lifetime in minutes, used when issuing locally.
    pub expiration_minutes: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set, using development key");
            "kakilima-development-secret-key-not-for-production".to_string()
        });
        if secret.len() < 32 {
            tracing::warn!("JWT_SECRET is shorter than 32 bytes");
        }

        Self {
            secret,
            expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1440),
        }
    }
}

/// Claims carried by marketplace tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id (subject).
    pub sub: String,
    /// Role name: `buyer` or `seller`.
    pub role: String,
    /// Expiration timestamp.
    pub exp: i64,
    /// Issued-at timestamp.
    pub iat: i64,
}

/// JWT errors.
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    ExpiredToken,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),
}

/// JWT validation service.
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn with_config(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issue a token for a user. Test and tooling use only; production
    /// tokens come from the identity provider.
    pub fn generate_token(&self, user_id: Uuid, role: Role) -> Result<String, JwtError> {
        let now = Utc::now();
        let expiration = now + Duration::minutes(self.config.expiration_minutes);

        let claims = Claims {
            sub: user_id.to_string(),
            role: role.as_str().to_string(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// Validate and decode a token.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["sub", "exp"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                _ => JwtError::InvalidToken(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }

    /// Extract the token from an `Authorization` header value.
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(secret: &str) -> JwtService {
        JwtService::with_config(JwtConfig {
            secret: secret.to_string(),
            expiration_minutes: 60,
        })
    }

    #[test]
    fn round_trip() {
        let svc = service("test-secret-with-at-least-32-bytes!!");
        let user_id = Uuid::new_v4();

        let token = svc.generate_token(user_id, Role::Buyer).unwrap();
        let claims = svc.validate_token(&token).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.role, "buyer");
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let issuer = service("test-secret-with-at-least-32-bytes!!");
        let verifier = service("another-secret-with-at-least-32-b!!");

        let token = issuer.generate_token(Uuid::new_v4(), Role::Seller).unwrap();
        let err = verifier.validate_token(&token).unwrap_err();
        assert!(matches!(err, JwtError::InvalidSignature));
    }

    #[test]
    fn expired_token_is_rejected() {
        let svc = JwtService::with_config(JwtConfig {
            secret: "test-secret-with-at-least-32-bytes!!".to_string(),
            expiration_minutes: -10,
        });

        let token = svc.generate_token(Uuid::new_v4(), Role::Buyer).unwrap();
        let err = svc.validate_token(&token).unwrap_err();
        assert!(matches!(err, JwtError::ExpiredToken));
    }

    #[test]
    fn bearer_extraction() {
        assert_eq!(JwtService::extract_from_header("Bearer abc"), Some("abc"));
        assert_eq!(JwtService::extract_from_header("Basic abc"), None);
    }
}
