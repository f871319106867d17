use super::config::JwtConfig;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// Registered time claims wrapped around the application's own claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtEnvelope<C> {
    #[serde(flatten)]
    pub claims: C,
    pub iat: i64, // Issued at
    pub exp: i64, // Expiration time
}

/// HS256 token signer and verifier.
#[derive(Clone)]
pub struct JwtAuth {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expires_in_secs: i64,
}

impl JwtAuth {
    pub fn new(config: &JwtConfig) -> Self {
        tracing::info!(expires_in_secs = config.expires_in_secs, "JWT auth initialized");
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            expires_in_secs: config.expires_in_secs,
        }
    }

    /// Sign `claims`, adding `iat` and `exp`.
    pub fn encode<C: Serialize>(&self, claims: C) -> eyre::Result<String> {
        let now = Utc::now();
        let envelope = JwtEnvelope {
            claims,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.expires_in_secs)).timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &envelope, &self.encoding)?;
        Ok(token)
    }

    /// Verify signature and expiry, returning the application's claims.
    pub fn decode<C: DeserializeOwned>(&self, token: &str) -> eyre::Result<C> {
        let data = decode::<JwtEnvelope<C>>(token, &self.decoding, &Validation::new(Algorithm::HS256))?;
        Ok(data.claims.claims)
    }
}
