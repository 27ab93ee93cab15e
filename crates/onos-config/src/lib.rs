//! Configuration for onosctl.
//!
//! TOML file + `ONOS_`-prefixed environment variables, credential
//! resolution (env + keyring + plaintext), and translation into the
//! `onos_core` connection types.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use onos_core::{ConnectionSettings, Credentials, FetchPolicy, TransportConfig};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config struct ──────────────────────────────────────────────

/// Top-level TOML configuration.
///
/// Every field has a default, so a missing file or an empty one is a
/// fully working setup against a factory-default controller.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Controller host (IP or name, no scheme).
    #[serde(default = "default_host")]
    pub host: String,

    /// Controller REST port.
    #[serde(default = "default_port")]
    pub port: String,

    /// Basic auth username.
    #[serde(default = "default_username")]
    pub username: String,

    /// Basic auth password (plaintext -- prefer keyring or env).
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Topology poll cadence in seconds (`topology --watch`).
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Serve canned demo data when the controller is unreachable
    /// instead of failing.
    #[serde(default)]
    pub demo_fallback: bool,
}

impl Default for Config {
    fn default() -> Self {
        let settings = ConnectionSettings::default();
        Self {
            host: settings.host,
            port: settings.port,
            username: default_username(),
            password: None,
            password_env: None,
            timeout_secs: default_timeout(),
            poll_interval_secs: default_poll_interval(),
            demo_fallback: false,
        }
    }
}

fn default_host() -> String {
    ConnectionSettings::default().host
}
fn default_port() -> String {
    ConnectionSettings::default().port
}
fn default_username() -> String {
    "onos".into()
}
fn default_timeout() -> u64 {
    10
}
fn default_poll_interval() -> u64 {
    10
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path.
///
/// `ONOSCTL_CONFIG` overrides everything; otherwise XDG / platform
/// conventions via `ProjectDirs`.
pub fn config_path() -> PathBuf {
    if let Ok(explicit) = std::env::var("ONOSCTL_CONFIG") {
        return PathBuf::from(explicit);
    }

    ProjectDirs::from("com", "onosctl", "onosctl").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("onosctl");
    p
}

// ── Config loading / saving ─────────────────────────────────────────

/// Load the config from file + environment.
///
/// Precedence, lowest to highest: built-in defaults, the TOML file,
/// `ONOS_`-prefixed environment variables (`ONOS_HOST`, `ONOS_PORT`, ...).
pub fn load_config() -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(config_path()))
        .merge(Env::prefixed("ONOS_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, falling back to defaults on any failure.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// Serialize config to TOML and write it to the canonical path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the password from the credential chain.
///
/// Order: the variable named by `password_env`, then `ONOS_PASSWORD`,
/// then the system keyring, then plaintext config, then the ONOS
/// factory default.
pub fn resolve_password(cfg: &Config) -> SecretString {
    if let Some(ref env_name) = cfg.password_env {
        if let Ok(val) = std::env::var(env_name) {
            return SecretString::from(val);
        }
    }

    if let Ok(val) = std::env::var("ONOS_PASSWORD") {
        return SecretString::from(val);
    }

    if let Ok(entry) = keyring::Entry::new("onosctl", &format!("{}/password", cfg.username)) {
        if let Ok(secret) = entry.get_password() {
            return SecretString::from(secret);
        }
    }

    if let Some(ref pw) = cfg.password {
        return SecretString::from(pw.clone());
    }

    Credentials::default().password
}

// ── Translation to core types ───────────────────────────────────────

impl Config {
    pub fn connection_settings(&self) -> ConnectionSettings {
        ConnectionSettings::new(self.host.clone(), self.port.clone())
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.username.clone(),
            password: resolve_password(self),
        }
    }

    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    pub fn fetch_policy(&self) -> FetchPolicy {
        if self.demo_fallback {
            FetchPolicy::DemoFallback
        } else {
            FetchPolicy::Strict
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn defaults_target_a_factory_controller() {
        let cfg = Config::default();
        assert_eq!(cfg.connection_settings().base_url(), "http://192.168.94.129:8181/onos/v1");
        assert_eq!(cfg.username, "onos");
        assert_eq!(cfg.timeout_secs, 10);
        assert!(matches!(cfg.fetch_policy(), FetchPolicy::Strict));
    }

    #[test]
    fn file_and_env_layer_over_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "onosctl.toml",
                r#"
                    host = "10.0.0.2"
                    port = "8282"
                    demo_fallback = true
                "#,
            )?;
            jail.set_env("ONOSCTL_CONFIG", "onosctl.toml");
            jail.set_env("ONOS_PORT", "9191");

            let cfg = load_config().map_err(|e| e.to_string())?;
            assert_eq!(cfg.host, "10.0.0.2");
            // Environment wins over the file.
            assert_eq!(cfg.port, "9191");
            assert!(cfg.demo_fallback);
            Ok(())
        });
    }

    #[test]
    fn save_round_trips_through_load() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("ONOSCTL_CONFIG", jail.directory().join("cfg.toml").display());

            let cfg = Config {
                host: "172.16.0.9".into(),
                poll_interval_secs: 3,
                ..Config::default()
            };
            save_config(&cfg).map_err(|e| e.to_string())?;

            let loaded = load_config().map_err(|e| e.to_string())?;
            assert_eq!(loaded.host, "172.16.0.9");
            assert_eq!(loaded.poll_interval_secs, 3);
            Ok(())
        });
    }

    #[test]
    fn password_chain_prefers_named_env_var() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("MY_ONOS_PW", "from-named-env");
            jail.set_env("ONOS_PASSWORD", "from-generic-env");

            let cfg = Config {
                password: Some("from-file".into()),
                password_env: Some("MY_ONOS_PW".into()),
                ..Config::default()
            };
            assert_eq!(resolve_password(&cfg).expose_secret(), "from-named-env");
            Ok(())
        });
    }
}
