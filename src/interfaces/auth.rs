//! Bearer-token authentication for the history endpoint.
//!
//! Sessions are issued by the backend-as-a-service; this service only checks
//! their access tokens: HS256 JWTs signed with the project's JWT secret.

use crate::error::{PaymentError, Result};
use axum::http::{HeaderMap, header};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Audience stamped on access tokens of signed-in users.
pub const AUDIENCE: &str = "authenticated";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub aud: String,
    pub exp: i64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Pre-compiled JWT validator with cached decoding key.
#[derive(Clone)]
pub struct SessionVerifier {
    decoding_key: Arc<DecodingKey>,
    validation: Validation,
}

impl SessionVerifier {
    pub fn new(secret: &SecretString) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[AUDIENCE]);
        validation.validate_exp = true;

        Self {
            decoding_key: Arc::new(DecodingKey::from_secret(
                secret.expose_secret().as_bytes(),
            )),
            validation,
        }
    }

    /// Validates a raw token and returns the user id it was issued to.
    pub fn verify(&self, token: &str) -> Result<String> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(error = %e, "JWT validation failed");
                PaymentError::Unauthorized
            })?;

        if claims.sub.is_empty() {
            return Err(PaymentError::Unauthorized);
        }
        Ok(claims.sub)
    }

    /// Extracts and validates the `Authorization: Bearer` header.
    pub fn verify_headers(&self, headers: &HeaderMap) -> Result<String> {
        let token = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(PaymentError::Unauthorized)?;
        self.verify(token)
    }
}
