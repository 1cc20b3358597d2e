//! Configuration management for the gym groups backend
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: GG__)
//! 4. Deployment variables: PORT, DATABASE_URL or DB_*, JWT_SECRET, RUST_ENV
//!
//! The loaded [`AppConfig`] is passed down explicitly; nothing reads the
//! environment after startup.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: String,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
    pub shutdown_grace_secs: u64,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
}

/// JWT configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub token_expiry_secs: i64,
}

/// Log output format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, overridden by `RUST_LOG`
    pub filter: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "gym_groups_backend=debug,tower_http=debug,sqlx=warn".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8081,
                request_timeout_secs: 15,
                shutdown_grace_secs: 15,
            },
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 10,
                min_connections: 1,
                acquire_timeout_secs: 10,
                idle_timeout_secs: 600, // 10 minutes
            },
            jwt: JwtConfig {
                // No default secret: JWT_SECRET must be provided
                secret: String::new(),
                token_expiry_secs: 3600, // 1 hour
            },
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and the process environment
    pub fn load() -> Result<Self> {
        Self::load_from(|key| env::var(key).ok())
    }

    /// Load configuration with the deployment variables taken from `lookup`
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with GG__ prefix
    /// 4. PORT, DATABASE_URL (or DB_*), JWT_SECRET, RUST_ENV from `lookup`
    pub fn load_from<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let environment = get("RUST_ENV").unwrap_or_else(|| "development".to_string());
        let config_file = format!("config/{}.toml", environment);

        let port = get("PORT")
            .map(|p| p.parse::<u16>().with_context(|| format!("invalid PORT value {:?}", p)))
            .transpose()?
            .map(i64::from);

        let database_url = match get("DATABASE_URL") {
            Some(url) => Some(url),
            None => database_url_from_parts(&get),
        };

        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Load from environment-specific config file
            .add_source(config::File::with_name(&config_file).required(false))
            // e.g., GG__SERVER__PORT=9000 sets server.port
            .add_source(config::Environment::with_prefix("GG").separator("__"))
            .set_override("environment", environment)?
            .set_override_option("server.port", port)?
            .set_override_option("database.url", database_url)?
            .set_override_option("jwt.secret", get("JWT_SECRET"))?
            .build()?;

        let config: AppConfig = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the server cannot start with
    pub fn validate(&self) -> Result<()> {
        if self.database.url.is_empty() {
            bail!("DATABASE_URL or all DB_* parameters are required");
        }
        if self.jwt.secret.is_empty() {
            bail!("JWT_SECRET is required");
        }
        Ok(())
    }

    /// Check if running in production mode
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Compose a connection string from DB_HOST, DB_PORT, DB_USER, DB_PASSWORD
/// and DB_NAME
///
/// Host, port, user and name are all required; the password may be empty.
pub fn database_url_from_parts<F>(get: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    let host = get("DB_HOST")?;
    let port = get("DB_PORT")?;
    let user = get("DB_USER")?;
    let name = get("DB_NAME")?;
    let password = get("DB_PASSWORD").unwrap_or_default();

    Some(format!(
        "postgres://{}:{}@{}:{}/{}?sslmode=disable",
        user, password, host, port, name
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.shutdown_grace_secs, 15);
        assert_eq!(config.database.max_connections, 10);
        assert!(config.jwt.secret.is_empty());
        assert!(!config.is_production());
    }

    #[test]
    fn test_load_with_database_url() {
        let config = AppConfig::load_from(lookup(&[
            ("DATABASE_URL", "postgres://u:p@db:5432/groups"),
            ("JWT_SECRET", "secret"),
            ("PORT", "9090"),
        ]))
        .unwrap();

        assert_eq!(config.database.url, "postgres://u:p@db:5432/groups");
        assert_eq!(config.jwt.secret, "secret");
        assert_eq!(config.server.port, 9090);
    }

    #[test]
    fn test_port_defaults_to_8081() {
        let config = AppConfig::load_from(lookup(&[
            ("DATABASE_URL", "postgres://u:p@db:5432/groups"),
            ("JWT_SECRET", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.server.port, 8081);
    }

    #[test]
    fn test_load_composes_database_url_from_parts() {
        let config = AppConfig::load_from(lookup(&[
            ("DB_HOST", "db"),
            ("DB_PORT", "5432"),
            ("DB_USER", "gym"),
            ("DB_PASSWORD", "pw"),
            ("DB_NAME", "groups"),
            ("JWT_SECRET", "secret"),
        ]))
        .unwrap();

        assert_eq!(
            config.database.url,
            "postgres://gym:pw@db:5432/groups?sslmode=disable"
        );
    }

    #[test]
    fn test_database_url_takes_precedence_over_parts() {
        let config = AppConfig::load_from(lookup(&[
            ("DATABASE_URL", "postgres://direct/db"),
            ("DB_HOST", "db"),
            ("DB_PORT", "5432"),
            ("DB_USER", "gym"),
            ("DB_NAME", "groups"),
            ("JWT_SECRET", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.database.url, "postgres://direct/db");
    }

    #[test]
    fn test_incomplete_db_parts_are_rejected() {
        let result = AppConfig::load_from(lookup(&[
            ("DB_HOST", "db"),
            ("DB_USER", "gym"),
            ("JWT_SECRET", "secret"),
        ]));

        let err = result.unwrap_err().to_string();
        assert!(err.contains("DATABASE_URL"), "unexpected error: {}", err);
    }

    #[test]
    fn test_missing_jwt_secret_is_rejected() {
        let result = AppConfig::load_from(lookup(&[("DATABASE_URL", "postgres://direct/db")]));

        let err = result.unwrap_err().to_string();
        assert!(err.contains("JWT_SECRET"), "unexpected error: {}", err);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let result = AppConfig::load_from(lookup(&[
            ("DATABASE_URL", "postgres://direct/db"),
            ("JWT_SECRET", "secret"),
            ("PORT", "http"),
        ]));

        assert!(result.is_err());
    }

    #[test]
    fn test_password_is_optional_in_parts() {
        let url = database_url_from_parts(lookup(&[
            ("DB_HOST", "localhost"),
            ("DB_PORT", "5432"),
            ("DB_USER", "gym"),
            ("DB_NAME", "groups"),
        ]));

        assert_eq!(
            url.as_deref(),
            Some("postgres://gym:@localhost:5432/groups?sslmode=disable")
        );
    }

    #[test]
    fn test_is_production() {
        let mut config = AppConfig::default();
        assert!(!config.is_production());
        config.environment = "production".to_string();
        assert!(config.is_production());
    }
}
