//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Environment variables: `UPDATECTL_*` prefix
//! 3. Global command-line flags
//!
//! There are no configuration files.

use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

use crate::cli::args::GlobalArgs;

/// Default update server.
pub const DEFAULT_SERVER: &str = "http://localhost:8000";

/// Path of the update API below the server URL.
pub const API_PATH: &str = "/_ah/api/update/v1/";

pub const ENV_PREFIX: &str = "UPDATECTL";

/// Settings that may come from the environment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Update server to connect to
    pub server: String,
    /// API username
    pub user: String,
    /// API key
    pub key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            user: String::new(),
            key: String::new(),
        }
    }
}

impl Settings {
    /// Load defaults overridden by `UPDATECTL_SERVER`, `UPDATECTL_USER`, `UPDATECTL_KEY`.
    ///
    /// An empty `UPDATECTL_SERVER` keeps the default server.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_source(Environment::with_prefix(ENV_PREFIX))
    }

    /// Load from an explicit environment source (tests inject a fixed map).
    pub fn from_source(env: Environment) -> Result<Self, ConfigError> {
        let defaults = Settings::default();
        let config = Config::builder()
            .set_default("server", defaults.server.clone())?
            .set_default("user", defaults.user)?
            .set_default("key", defaults.key)?
            .add_source(env)
            .build()?;

        let mut settings: Self = config.try_deserialize()?;
        if settings.server.is_empty() {
            settings.server = defaults.server;
        }
        Ok(settings)
    }
}

/// Effective process-wide configuration, built once at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct GlobalConfig {
    pub server: String,
    pub user: String,
    pub key: String,
    pub debug: bool,
    pub version: bool,
    pub help: bool,
}

impl GlobalConfig {
    /// Overlay parsed global flags onto environment settings.
    pub fn new(settings: Settings, args: &GlobalArgs) -> Self {
        Self {
            server: args.server.clone().unwrap_or(settings.server),
            user: args.user.clone().unwrap_or(settings.user),
            key: args.key.clone().unwrap_or(settings.key),
            debug: args.debug,
            version: args.version,
            help: args.help,
        }
    }

    /// Base path of the update API on the configured server.
    pub fn base_path(&self) -> String {
        format!("{}{}", self.server, API_PATH)
    }
}

impl std::fmt::Debug for GlobalConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobalConfig")
            .field("server", &self.server)
            .field("user", &self.user)
            .field("key", &"<redacted>")
            .field("debug", &self.debug)
            .field("version", &self.version)
            .field("help", &self.help)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    #[test]
    fn given_empty_environment_when_loading_then_uses_defaults() {
        let settings = Settings::from_source(env(&[])).expect("load defaults");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.server, "http://localhost:8000");
    }

    #[test]
    fn given_environment_when_loading_then_overrides_defaults() {
        let settings = Settings::from_source(env(&[
            ("UPDATECTL_SERVER", "https://updates.example.com"),
            ("UPDATECTL_USER", "admin"),
            ("UPDATECTL_KEY", "s3cr3t"),
        ]))
        .unwrap();
        assert_eq!(settings.server, "https://updates.example.com");
        assert_eq!(settings.user, "admin");
        assert_eq!(settings.key, "s3cr3t");
    }

    #[test]
    fn given_empty_server_env_when_loading_then_keeps_default_server() {
        let settings = Settings::from_source(env(&[("UPDATECTL_SERVER", "")])).unwrap();
        assert_eq!(settings.server, DEFAULT_SERVER);
    }

    #[test]
    fn given_flags_when_building_global_config_then_flags_win() {
        let settings = Settings {
            server: "http://env:8000".into(),
            user: "env-user".into(),
            key: "env-key".into(),
        };
        let args = GlobalArgs::try_parse_from(["updatectl", "--user", "flag-user", "--debug"]).unwrap();
        let config = GlobalConfig::new(settings, &args);
        assert_eq!(config.server, "http://env:8000");
        assert_eq!(config.user, "flag-user");
        assert_eq!(config.key, "env-key");
        assert!(config.debug);
        assert_eq!(config.base_path(), "http://env:8000/_ah/api/update/v1/");
    }

    #[test]
    fn given_config_when_debug_printed_then_key_redacted() {
        let args = GlobalArgs::try_parse_from(["updatectl", "--key", "topsecret"]).unwrap();
        let config = GlobalConfig::new(Settings::default(), &args);
        assert!(!format!("{:?}", config).contains("topsecret"));
    }
}
