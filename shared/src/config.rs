use std::str::FromStr;

use anyhow::{Context, Result};

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub auth: AuthConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let database = DatabaseConfig {
            host: required("DATABASE_HOST")?,
            port: required("DATABASE_PORT")?
                .parse()
                .context("DATABASE_PORT must be a port number")?,
            username: required("DATABASE_USERNAME")?,
            password: required("DATABASE_PASSWORD")?,
            database: required("DATABASE_NAME")?,
        };
        let redis = RedisConfig {
            host: required("REDIS_HOST")?,
            port: required("REDIS_PORT")?
                .parse()
                .context("REDIS_PORT must be a port number")?,
        };
        let auth = AuthConfig {
            ttl: optional("AUTH_TOKEN_TTL", 86_400)?,
        };
        let server = ServerConfig {
            port: optional("SERVER_PORT", 8080)?,
        };
        Ok(Self {
            database,
            redis,
            auth,
            server,
        })
    }
}

pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

pub struct RedisConfig {
    pub host: String,
    pub port: u16,
}

pub struct AuthConfig {
    /// アクセストークンの有効期間（秒）
    pub ttl: u64,
}

pub struct ServerConfig {
    pub port: u16,
}

fn required(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("environment variable {key} is not set"))
}

fn optional<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(v) => v
            .parse()
            .with_context(|| format!("environment variable {key} has an invalid value")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_falls_back_to_default() {
        let ttl: u64 = optional("EVENT_REGISTRATION_TEST_UNSET_TTL", 42).unwrap();
        assert_eq!(ttl, 42);
    }

    #[test]
    fn required_reports_missing_key() {
        let err = required("EVENT_REGISTRATION_TEST_UNSET_HOST").unwrap_err();
        assert!(err.to_string().contains("EVENT_REGISTRATION_TEST_UNSET_HOST"));
    }
}
