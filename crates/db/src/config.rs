use std::str::FromStr;

/// Which adapter backs the job repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" | "in-memory" => Ok(Self::Memory),
            other => Err(ConfigError::Invalid {
                var: "JOB_STORE",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}")]
    Invalid { var: &'static str, value: String },
}

/// Storage configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub backend: StoreBackend,
    /// Required when `backend` is [`StoreBackend::Postgres`].
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl DbConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default    |
    /// |---------------------------|------------|
    /// | `JOB_STORE`               | `postgres` |
    /// | `DATABASE_URL`            | (none)     |
    /// | `DB_MAX_CONNECTIONS`      | `20`       |
    /// | `DB_ACQUIRE_TIMEOUT_SECS` | `5`        |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`DbConfig::from_env`] but reads values through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let backend = match lookup("JOB_STORE") {
            Some(value) => value.parse()?,
            None => StoreBackend::Postgres,
        };

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        let max_connections = parse_or("DB_MAX_CONNECTIONS", lookup("DB_MAX_CONNECTIONS"), 20)?;
        let acquire_timeout_secs =
            parse_or("DB_ACQUIRE_TIMEOUT_SECS", lookup("DB_ACQUIRE_TIMEOUT_SECS"), 5)?;

        Ok(Self {
            backend,
            database_url,
            max_connections,
            acquire_timeout_secs,
        })
    }
}

fn parse_or<T: FromStr>(var: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { var, value: raw }),
    }
}
