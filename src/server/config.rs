//! Runtime configuration loaded from environment variables.

use chrono::Duration;

use crate::server::{error::config::ConfigError, scheduler::config::reconcile};

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Database connection URL (`DATABASE_URL`)
    pub database_url: String,
    /// Cron expression for the no-show reconciliation sweep (`RECONCILE_CRON`)
    pub reconcile_cron: String,
    /// Time after pickup before an uncollected reservation counts as a no-show (`NO_SHOW_GRACE_MINUTES`)
    pub no_show_grace: Duration,
}

impl Config {
    /// Loads configuration from the process environment.
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and valid
    /// - `Err(ConfigError)` - A required variable is missing or a value failed to parse
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary key lookup.
    ///
    /// # Arguments
    /// - `lookup` - Returns the value for an environment variable name, if set
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and valid
    /// - `Err(ConfigError)` - A required variable is missing or a value failed to parse
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?;

        let reconcile_cron = lookup("RECONCILE_CRON")
            .unwrap_or_else(|| reconcile::CRON_EXPRESSION.to_string());

        let no_show_grace = match lookup("NO_SHOW_GRACE_MINUTES") {
            None => reconcile::NO_SHOW_GRACE_PERIOD,
            Some(value) => parse_grace_minutes(&value)?,
        };

        Ok(Self {
            database_url,
            reconcile_cron,
            no_show_grace,
        })
    }
}

/// Upper bound for `NO_SHOW_GRACE_MINUTES`, one week.
const MAX_GRACE_MINUTES: i64 = 7 * 24 * 60;

fn parse_grace_minutes(value: &str) -> Result<Duration, ConfigError> {
    let minutes: i64 = value
        .trim()
        .parse()
        .map_err(|e| ConfigError::InvalidEnvValue {
            var: "NO_SHOW_GRACE_MINUTES".to_string(),
            reason: format!("{}", e),
        })?;

    if minutes < 0 {
        return Err(ConfigError::InvalidEnvValue {
            var: "NO_SHOW_GRACE_MINUTES".to_string(),
            reason: "must not be negative".to_string(),
        });
    }

    if minutes > MAX_GRACE_MINUTES {
        return Err(ConfigError::InvalidEnvValue {
            var: "NO_SHOW_GRACE_MINUTES".to_string(),
            reason: format!("must not exceed {} minutes", MAX_GRACE_MINUTES),
        });
    }

    Duration::try_minutes(minutes).ok_or_else(|| ConfigError::InvalidEnvValue {
        var: "NO_SHOW_GRACE_MINUTES".to_string(),
        reason: "out of range".to_string(),
    })
}
