/*
 * Responsibility
 * - 環境変数や設定の読み込み (PORT, Auth 設定, HTTP 制限など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()))
    }

    fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub auth_issuer: String,
    pub auth_audience: String,
    pub auth_realm: Option<String>,
    pub access_token_leeway_seconds: u64,

    pub access_jwt_public_key_pem: String,

    pub http_timeout_seconds: u64,
    pub http_body_limit_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = match std::env::var("PORT") {
            Ok(v) => v.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            Err(_) => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let auth_issuer = required("AUTH_ISSUER")?;
        let auth_audience = required("AUTH_AUDIENCE")?;

        let auth_realm = parse_realm(std::env::var("AUTH_REALM").ok())?;

        let access_token_leeway_seconds = parse_or("ACCESS_TOKEN_LEEWAY_SECONDS", 60)?;

        let access_jwt_public_key_pem = required("ACCESS_JWT_PUBLIC_KEY_PEM")?.replace("\\n", "\n");

        let http_timeout_seconds = parse_or("HTTP_TIMEOUT_SECONDS", 30)?;
        let http_body_limit_bytes = parse_or("HTTP_BODY_LIMIT_BYTES", 1024 * 1024)?;

        Ok(Self {
            addr,
            app_env,
            auth_issuer,
            auth_audience,
            auth_realm,
            access_token_leeway_seconds,
            access_jwt_public_key_pem,
            http_timeout_seconds,
            http_body_limit_bytes,
        })
    }
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(key))
}

// realm is rendered inside a quoted-string; same charset as error_description
fn parse_realm(value: Option<String>) -> Result<Option<String>, ConfigError> {
    let Some(realm) = value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
    else {
        return Ok(None);
    };

    let valid = realm
        .bytes()
        .all(|b| matches!(b, 0x20..=0x21 | 0x23..=0x5B | 0x5D..=0x7E));
    if !valid {
        return Err(ConfigError::Invalid("AUTH_REALM"));
    }

    Ok(Some(realm))
}

// Unset falls back to `default`; set-but-unparsable is an error.
fn parse_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(key) {
        Ok(v) => v.trim().parse().map_err(|_| ConfigError::Invalid(key)),
        Err(_) => Ok(default),
    }
}
