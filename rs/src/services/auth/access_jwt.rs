use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde_json::{Map, Value};

use crate::services::auth::jwt::{Jwt, JwtDecoder, JwtError};

/// `JwtDecoder` backed by `jsonwebtoken`.
///
/// `jsonwebtoken::Validation` checks:
/// - signature (single algorithm)
/// - `exp` / `nbf` with leeway
/// - `iss` and `aud` when configured
///
/// Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct JsonWebTokenDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JsonWebTokenDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("JsonWebTokenDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JsonWebTokenDecoder {
    pub fn new(decoding_key: DecodingKey, algorithm: Algorithm) -> Self {
        let mut validation = Validation::new(algorithm);
        // Audience is only enforced once `with_audience` is called.
        validation.validate_aud = false;
        validation.validate_nbf = true;

        Self {
            decoding_key,
            validation,
        }
    }

    /// Ed25519 public key (PEM, SPKI).
    pub fn from_ed_pem(public_key_pem: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        let key = DecodingKey::from_ed_pem(public_key_pem.as_bytes())?;
        Ok(Self::new(key, Algorithm::EdDSA))
    }

    /// RSA public key (PEM), RS256.
    pub fn from_rsa_pem(public_key_pem: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        let key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())?;
        Ok(Self::new(key, Algorithm::RS256))
    }

    /// Shared secret, HS256.
    pub fn from_secret(secret: &[u8]) -> Self {
        Self::new(DecodingKey::from_secret(secret), Algorithm::HS256)
    }

    pub fn with_issuer(mut self, issuer: &str) -> Self {
        self.validation.set_issuer(&[issuer]);
        self
    }

    pub fn with_audience(mut self, audience: &str) -> Self {
        self.validation.set_audience(&[audience]);
        self.validation.validate_aud = true;
        self
    }

    pub fn with_leeway(mut self, leeway_seconds: u64) -> Self {
        self.validation.leeway = leeway_seconds;
        self
    }

    fn decode_sync(&self, token: &str) -> Result<Jwt, JwtError> {
        let data = jsonwebtoken::decode::<Map<String, Value>>(
            token,
            &self.decoding_key,
            &self.validation,
        )?;

        let headers = match serde_json::to_value(&data.header) {
            Ok(Value::Object(map)) => map
                .into_iter()
                .filter(|(_, v)| !v.is_null())
                .collect(),
            Ok(_) => Map::new(),
            Err(e) => return Err(JwtError::invalid(format!("unreadable jwt header: {}", e))),
        };

        Ok(Jwt::new(token, headers, data.claims))
    }
}

#[async_trait]
impl JwtDecoder for JsonWebTokenDecoder {
    async fn decode(&self, token: &str) -> Result<Jwt, JwtError> {
        self.decode_sync(token)
    }
}
