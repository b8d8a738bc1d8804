use std::str::FromStr;

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_JWT_EXPIRES_IN_DAYS: i64 = 90;
const DEFAULT_BCRYPT_COST: u32 = 12;
const DEFAULT_EMAIL_PORT: u16 = 2525;
const DEFAULT_EMAIL_FROM: &str = "Tourboard <hello@tourboard.io>";
const DEFAULT_RATE_LIMIT_MAX: u32 = 100;
const DEFAULT_RATE_LIMIT_WINDOW_SECS: u64 = 3600;
const DEFAULT_BODY_LIMIT_BYTES: usize = 10 * 1024;

/// Deployment environment, selected with `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "development" => Ok(Self::Development),
            "production" => Ok(Self::Production),
            _ => Err(()),
        }
    }
}

pub struct EmailConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from: String,
}

pub struct Config {
    pub database_url: String,
    pub app_url: String,
    pub port: u16,
    pub environment: Environment,

    pub jwt_secret: String,
    pub jwt_expires_in_days: i64,
    pub bcrypt_cost: u32,

    pub email: EmailConfig,

    pub rate_limit_max: u32,
    pub rate_limit_window_secs: u64,
    pub body_limit_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and parsable
    /// - `Err(ConfigError::MissingEnvVar)` - A required variable is unset
    /// - `Err(ConfigError::InvalidEnvVar)` - A variable does not parse
    /// - `Err(ConfigError::InvalidRateLimit)` - Rate limit of zero requests or zero seconds
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let env = EnvSource { lookup };

        let rate_limit_max = env.parse_or("RATE_LIMIT_MAX", DEFAULT_RATE_LIMIT_MAX)?;
        let rate_limit_window_secs =
            env.parse_or("RATE_LIMIT_WINDOW_SECS", DEFAULT_RATE_LIMIT_WINDOW_SECS)?;
        if rate_limit_max == 0 || rate_limit_window_secs == 0 {
            return Err(ConfigError::InvalidRateLimit(format!(
                "{} requests per {} seconds",
                rate_limit_max, rate_limit_window_secs
            ))
            .into());
        }

        Ok(Self {
            database_url: env.required("DATABASE_URL")?,
            app_url: env.required("APP_URL")?,
            port: env.parse_or("PORT", DEFAULT_PORT)?,
            environment: env.parse_or("APP_ENV", Environment::Production)?,
            jwt_secret: env.required("JWT_SECRET")?,
            jwt_expires_in_days: env.parse_or("JWT_EXPIRES_IN_DAYS", DEFAULT_JWT_EXPIRES_IN_DAYS)?,
            bcrypt_cost: env.parse_or("BCRYPT_COST", DEFAULT_BCRYPT_COST)?,
            email: EmailConfig {
                host: env.required("EMAIL_HOST")?,
                port: env.parse_or("EMAIL_PORT", DEFAULT_EMAIL_PORT)?,
                username: env.optional("EMAIL_USERNAME"),
                password: env.optional("EMAIL_PASSWORD"),
                from: env
                    .optional("EMAIL_FROM")
                    .unwrap_or_else(|| DEFAULT_EMAIL_FROM.to_string()),
            },
            rate_limit_max,
            rate_limit_window_secs,
            body_limit_bytes: env.parse_or("BODY_LIMIT_BYTES", DEFAULT_BODY_LIMIT_BYTES)?,
        })
    }
}

struct EnvSource<F> {
    lookup: F,
}

impl<F: Fn(&str) -> Option<String>> EnvSource<F> {
    /// Value of a variable, treating empty strings as unset.
    fn optional(&self, name: &str) -> Option<String> {
        (self.lookup)(name).filter(|value| !value.trim().is_empty())
    }

    fn required(&self, name: &str) -> Result<String, ConfigError> {
        self.optional(name)
            .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
    }

    fn parse_or<T: FromStr>(&self, name: &str, default: T) -> Result<T, ConfigError> {
        match self.optional(name) {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidEnvVar {
                name: name.to_string(),
                value,
            }),
            None => Ok(default),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    const REQUIRED: &[(&str, &str)] = &[
        ("DATABASE_URL", "sqlite::memory:"),
        ("APP_URL", "http://localhost:3000"),
        ("JWT_SECRET", "secret"),
        ("EMAIL_HOST", "smtp.mailtrap.io"),
    ];

    #[test]
    fn applies_defaults() {
        let config = Config::from_lookup(lookup(REQUIRED)).unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.jwt_expires_in_days, 90);
        assert_eq!(config.bcrypt_cost, 12);
        assert_eq!(config.email.port, 2525);
        assert_eq!(config.rate_limit_max, 100);
        assert_eq!(config.rate_limit_window_secs, 3600);
        assert_eq!(config.body_limit_bytes, 10240);
    }

    #[test]
    fn reports_missing_variable() {
        let result = Config::from_lookup(lookup(&REQUIRED[1..]));

        assert!(matches!(
            result,
            Err(AppError::ConfigErr(ConfigError::MissingEnvVar(name))) if name == "DATABASE_URL"
        ));
    }

    #[test]
    fn reports_unparsable_variable() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("PORT", "eighty"));

        let result = Config::from_lookup(lookup(&vars));

        assert!(matches!(
            result,
            Err(AppError::ConfigErr(ConfigError::InvalidEnvVar { name, .. })) if name == "PORT"
        ));
    }

    #[test]
    fn parses_development_environment() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("APP_ENV", "development"));

        let config = Config::from_lookup(lookup(&vars)).unwrap();

        assert_eq!(config.environment, Environment::Development);
    }
}
