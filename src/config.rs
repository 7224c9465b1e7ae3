use std::env;
use std::net::SocketAddr;
use zeroize::Zeroizing;

/// Signing key used when `JWT_SECRET_KEY` is unset. Insecure; refused in production.
pub const DEV_FALLBACK_SECRET: &str = "fallback_secret_key_for_development";

#[derive(Clone)]
pub struct Config {
    // Admin credential
    pub admin_username: String,
    pub admin_password: Zeroizing<String>,

    // Session signing
    pub jwt_secret: Zeroizing<String>,
    pub using_fallback_secret: bool,

    // Deployment
    pub production: bool,

    // Redis
    pub redis_url: String,

    // Server
    pub bind_addr: SocketAddr,

    // Limits
    pub max_upload_bytes: usize,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("admin_username", &self.admin_username)
            .field("admin_password", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("using_fallback_secret", &self.using_fallback_secret)
            .field("production", &self.production)
            .field("redis_url", &"[REDACTED]")
            .field("bind_addr", &self.bind_addr)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),

    #[error("Failed to parse {0}: {1}")]
    ParseError(String, String),
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env is fine; production sets vars directly
        let _ = dotenvy::dotenv();

        let admin_username = required_non_empty("ADMIN_USERNAME")?;
        let admin_password = Zeroizing::new(required_non_empty("ADMIN_PASSWORD")?);

        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let production = match app_env.as_str() {
            "production" => true,
            "development" | "test" => false,
            other => {
                return Err(ConfigError::InvalidValue(
                    "APP_ENV".to_string(),
                    format!("expected production, development or test, got {}", other),
                ))
            }
        };

        let (jwt_secret, using_fallback_secret) = match env::var("JWT_SECRET_KEY") {
            Ok(secret) if !secret.is_empty() => (Zeroizing::new(secret), false),
            _ => (Zeroizing::new(DEV_FALLBACK_SECRET.to_string()), true),
        };

        if using_fallback_secret && production {
            return Err(ConfigError::MissingVar("JWT_SECRET_KEY".to_string()));
        }

        // Redis is required so a misconfigured deployment fails fast
        let redis_url =
            env::var("REDIS_URL").map_err(|_| ConfigError::MissingVar("REDIS_URL".to_string()))?;

        let bind_addr_str = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_addr = bind_addr_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::ParseError("BIND_ADDR".to_string(), e.to_string()))?;

        let max_upload_bytes = parse_env_or_default("MAX_UPLOAD_BYTES", 5_242_880)?;

        Ok(Config {
            admin_username,
            admin_password,
            jwt_secret,
            using_fallback_secret,
            production,
            redis_url,
            bind_addr,
            max_upload_bytes,
        })
    }
}

fn required_non_empty(key: &str) -> Result<String, ConfigError> {
    let value = env::var(key).map_err(|_| ConfigError::MissingVar(key.to_string()))?;
    if value.is_empty() {
        return Err(ConfigError::InvalidValue(
            key.to_string(),
            "cannot be empty".to_string(),
        ));
    }
    Ok(value)
}

/// Helper function to parse environment variable with a default value
fn parse_env_or_default<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(val) => val
            .parse::<T>()
            .map_err(|e| ConfigError::ParseError(key.to_string(), format!("{}: {}", e, val))),
        Err(_) => Ok(default),
    }
}
