//! # Configuration
//!
//! Runtime settings loaded from the environment (and `.env` if present).
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use crate::core::strings::Locale;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Whether the user lets the app show local notifications.
///
/// Mirrors the system-settings switch: the app can only read it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Allow,
    Deny,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    /// sqlite file holding reminders
    pub database_path: PathBuf,
    /// JSON file holding pending notification requests
    pub notifications_path: PathBuf,
    /// Notification permission as set by the user
    pub notification_permission: Permission,
    /// Display language
    pub locale: Locale,
    /// Log destination (the terminal is taken by the UI)
    pub log_file: PathBuf,
    /// How often the delivery loop looks for due notifications
    pub delivery_poll_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_path: PathBuf::from("hydrominder.db"),
            notifications_path: PathBuf::from("notifications.json"),
            notification_permission: Permission::Allow,
            locale: Locale::default(),
            log_file: PathBuf::from("hydrominder.log"),
            delivery_poll_interval: Duration::from_secs(15),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let notification_permission = match lookup("HYDROMINDER_NOTIFICATIONS") {
            None => defaults.notification_permission,
            Some(v) => match v.trim().to_lowercase().as_str() {
                "allow" | "granted" | "on" | "true" => Permission::Allow,
                "deny" | "denied" | "off" | "false" => Permission::Deny,
                other => {
                    return Err(ConfigError::Invalid {
                        key: "HYDROMINDER_NOTIFICATIONS",
                        reason: format!("expected allow or deny, got '{}'", other),
                    })
                }
            },
        };

        let locale = match lookup("HYDROMINDER_LOCALE") {
            None => defaults.locale,
            Some(v) => v.parse::<Locale>().map_err(|reason| ConfigError::Invalid {
                key: "HYDROMINDER_LOCALE",
                reason,
            })?,
        };

        let delivery_poll_interval = match lookup("HYDROMINDER_DELIVERY_POLL_SECS") {
            None => defaults.delivery_poll_interval,
            Some(v) => match v.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "HYDROMINDER_DELIVERY_POLL_SECS",
                        reason: format!("expected a positive number of seconds, got '{}'", v),
                    })
                }
            },
        };

        Ok(Config {
            database_path: lookup("HYDROMINDER_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),
            notifications_path: lookup("HYDROMINDER_NOTIFICATIONS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.notifications_path),
            notification_permission,
            locale,
            log_file: lookup("HYDROMINDER_LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_file),
            delivery_poll_interval,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config.database_path, PathBuf::from("hydrominder.db"));
        assert_eq!(config.notification_permission, Permission::Allow);
        assert_eq!(config.locale, Locale::Ko);
        assert_eq!(config.delivery_poll_interval, Duration::from_secs(15));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("HYDROMINDER_DB_PATH", "/tmp/water.db"),
            ("HYDROMINDER_NOTIFICATIONS", "deny"),
            ("HYDROMINDER_LOCALE", "en"),
            ("HYDROMINDER_DELIVERY_POLL_SECS", "2"),
        ]))
        .unwrap();

        assert_eq!(config.database_path, PathBuf::from("/tmp/water.db"));
        assert_eq!(config.notification_permission, Permission::Deny);
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.delivery_poll_interval, Duration::from_secs(2));
    }

    #[test]
    fn test_invalid_permission_rejected() {
        let err = Config::from_lookup(lookup_from(&[("HYDROMINDER_NOTIFICATIONS", "maybe")]))
            .unwrap_err();
        assert!(err.to_string().contains("HYDROMINDER_NOTIFICATIONS"));
    }

    #[test]
    fn test_zero_poll_interval_rejected() {
        assert!(
            Config::from_lookup(lookup_from(&[("HYDROMINDER_DELIVERY_POLL_SECS", "0")])).is_err()
        );
    }
}
