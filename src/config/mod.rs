use serde::Deserialize;
use std::env;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_SECRET_KEY: &str = "dev_secret_key_change_me";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a valid {expected}, got {value:?}")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

// Top-level configuration, a container for every settings group
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
}

// Application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(()),
        }
    }
}

// Database settings
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub pool_size: u32,
    /// Full connection string taking precedence over the individual parts.
    pub url_override: Option<String>,
    /// Emit a `fyyur::modifications` event for every committed record.
    pub track_modifications: bool,
}

impl DatabaseConfig {
    /// Connection string with the password percent-encoded, so that
    /// characters like `@`, `/` or `:` survive embedding in the URL.
    pub fn url(&self) -> String {
        if let Some(url) = &self.url_override {
            return url.clone();
        }
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user,
            urlencoding::encode(&self.password),
            self.host,
            self.port,
            self.name
        )
    }
}

// Session and form protection settings
#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    pub secret_key: String,
    pub csrf_enabled: bool,
    pub csrf_time_limit_secs: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            app: AppConfig {
                host: var("HOST", "0.0.0.0"),
                port: parse(&lookup, "PORT", 8000, "port number")?,
                environment: var("ENVIRONMENT", "development"),
                rust_log: var("RUST_LOG", "fyyur=debug,tower_http=debug"),
                log_format: parse(&lookup, "LOG_FORMAT", LogFormat::Pretty, "log format (pretty|json)")?,
            },
            database: DatabaseConfig {
                user: var("DB_USER", "postgres"),
                password: var("DB_PASS", ""),
                host: var("DB_HOST", "127.0.0.1"),
                port: parse(&lookup, "DB_PORT", 5432, "port number")?,
                name: var("DB_NAME", "fyyur"),
                pool_size: parse(&lookup, "DB_POOL_SIZE", 20, "number")?,
                url_override: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
                track_modifications: parse(&lookup, "TRACK_MODIFICATIONS", false, "boolean")?,
            },
            security: SecurityConfig {
                secret_key: var("SECRET_KEY", DEFAULT_SECRET_KEY),
                csrf_enabled: parse(&lookup, "CSRF_ENABLED", true, "boolean")?,
                csrf_time_limit_secs: parse(&lookup, "CSRF_TIME_LIMIT_SECS", 3600, "number of seconds")?,
            },
        })
    }

    pub fn is_development(&self) -> bool {
        self.app.environment.eq_ignore_ascii_case("development")
    }
}

fn parse<T, F>(lookup: &F, var: &'static str, default: T, expected: &'static str) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            var,
            expected,
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.app.port, 8000);
        assert_eq!(config.app.log_format, LogFormat::Pretty);
        assert!(config.is_development());
        assert_eq!(config.database.url(), "postgres://postgres:@127.0.0.1:5432/fyyur");
        assert!(!config.database.track_modifications);
        assert_eq!(config.security.secret_key, DEFAULT_SECRET_KEY);
        assert!(config.security.csrf_enabled);
    }

    #[test]
    fn password_is_percent_encoded() {
        let config = config_from(&[
            ("DB_USER", "fyyur"),
            ("DB_PASS", "p@ss w/rd:1"),
            ("DB_HOST", "db"),
            ("DB_PORT", "6543"),
            ("DB_NAME", "listings"),
        ])
        .unwrap();

        assert_eq!(
            config.database.url(),
            "postgres://fyyur:p%40ss%20w%2Frd%3A1@db:6543/listings"
        );
    }

    #[test]
    fn database_url_overrides_parts() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://other@elsewhere/db"),
            ("DB_HOST", "ignored"),
        ])
        .unwrap();

        assert_eq!(config.database.url(), "postgres://other@elsewhere/db");
    }

    #[test]
    fn malformed_values_name_the_variable() {
        let err = config_from(&[("DB_PORT", "fifty")]).unwrap_err();
        assert!(err.to_string().starts_with("DB_PORT must be a valid port number"));

        let err = config_from(&[("TRACK_MODIFICATIONS", "sometimes")]).unwrap_err();
        assert!(err.to_string().contains("TRACK_MODIFICATIONS"));
    }

    #[test]
    fn json_log_format() {
        let config = config_from(&[("LOG_FORMAT", "JSON"), ("ENVIRONMENT", "production")]).unwrap();
        assert_eq!(config.app.log_format, LogFormat::Json);
        assert!(!config.is_development());
    }
}
