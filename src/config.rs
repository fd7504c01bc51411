use std::env;

use chrono_tz::Tz;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub local_timezone: Tz,
    pub static_dir: Option<String>,
    pub max_login_attempts: u32,
    pub upcoming_window_minutes: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            database_url: lookup("DATABASE_URL").ok_or(ConfigError::MissingDatabaseUrl)?,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "127.0.0.1:8080".to_string()),
            local_timezone: match lookup("LOCAL_TIMEZONE") {
                Some(name) => name.parse().map_err(|_| ConfigError::InvalidTimezone(name))?,
                None => chrono_tz::America::New_York,
            },
            static_dir: lookup("STATIC_DIR").filter(|dir| !dir.is_empty()),
            max_login_attempts: match lookup("MAX_LOGIN_ATTEMPTS") {
                Some(value) => value
                    .parse()
                    .map_err(|_| ConfigError::InvalidNumber("MAX_LOGIN_ATTEMPTS", value))?,
                None => 4,
            },
            upcoming_window_minutes: match lookup("UPCOMING_WINDOW_MINUTES") {
                Some(value) => value
                    .parse()
                    .map_err(|_| ConfigError::InvalidNumber("UPCOMING_WINDOW_MINUTES", value))?,
                None => 15,
            },
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("DATABASE_URL not found")]
    MissingDatabaseUrl,

    #[error("Unknown timezone '{0}'")]
    InvalidTimezone(String),

    #[error("{0} must be a number, got '{1}'")]
    InvalidNumber(&'static str, String),
}
