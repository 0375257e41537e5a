//! Shared fixtures for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use resource_server::services::auth::{Jwt, JwtDecoder, JwtError};
use serde_json::{Map, Value, json};

/// Decodes every token to the same claim set.
pub struct StaticDecoder {
    claims: Map<String, Value>,
}

impl StaticDecoder {
    pub fn new(claims: Value) -> Self {
        let Value::Object(claims) = claims else {
            panic!("claims fixture must be an object");
        };
        Self { claims }
    }
}

#[async_trait]
impl JwtDecoder for StaticDecoder {
    async fn decode(&self, token: &str) -> Result<Jwt, JwtError> {
        let headers = match json!({"alg": "none"}) {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Ok(Jwt::new(token, headers, self.claims.clone()))
    }
}

/// Accepts only `valid-token`; everything else fails with `message`.
pub struct SingleTokenDecoder {
    pub claims: Value,
    pub message: &'static str,
}

#[async_trait]
impl JwtDecoder for SingleTokenDecoder {
    async fn decode(&self, token: &str) -> Result<Jwt, JwtError> {
        if token != "valid-token" {
            return Err(JwtError::invalid(self.message));
        }
        StaticDecoder::new(self.claims.clone()).decode(token).await
    }
}
