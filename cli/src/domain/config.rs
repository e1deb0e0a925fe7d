//! Domain types and validators for onevm configuration.
//!
//! Pure functions only. No I/O or async.

use std::time::Duration;

use anyhow::Result;
use onevm_common::EnvOverrides;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &["endpoint", "username", "password", "timeout_secs"];

pub const DEFAULT_ENDPOINT: &str = "http://localhost:2633/RPC2";
pub const DEFAULT_USERNAME: &str = "oneadmin";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable that relocates the config file.
pub const CONFIG_PATH_VAR: &str = "ONEVM_CONFIG";

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.onevm/config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OnevmConfig {
    /// XML-RPC endpoint of the OpenNebula daemon.
    pub endpoint: String,
    /// Account the calls are made as.
    pub username: String,
    /// Password or login token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Per-call HTTP timeout.
    pub timeout_secs: u64,
}

impl Default for OnevmConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            username: DEFAULT_USERNAME.to_string(),
            password: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl OnevmConfig {
    /// Session string sent as the first argument of every call.
    #[must_use]
    pub fn auth_key(&self) -> String {
        format!(
            "{}:{}",
            self.username,
            self.password.as_deref().unwrap_or_default()
        )
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Overlay environment-provided values.
    pub fn apply_env(&mut self, env: EnvOverrides) {
        if let Some(endpoint) = env.endpoint {
            self.endpoint = endpoint;
        }
        if let Some(username) = env.username {
            self.username = username;
        }
        if let Some(password) = env.password {
            self.password = Some(password);
        }
        if let Some(timeout) = env.timeout_secs {
            self.timeout_secs = timeout;
        }
    }

    /// Set one key after validating it.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value is invalid.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_config_key(key)?;
        validate_config_value(key, value)?;
        match key {
            "endpoint" => self.endpoint = value.to_string(),
            "username" => self.username = value.to_string(),
            "password" => self.password = Some(value.to_string()),
            "timeout_secs" => self.timeout_secs = parse_timeout(key, value)?,
            _ => anyhow::bail!("Unknown setting: {key}"),
        }
        Ok(())
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    match key {
        "endpoint" if !(value.starts_with("http://") || value.starts_with("https://")) => {
            Err(invalid(key, value, "Endpoint must be an http:// or https:// URL"))
        }
        "username" if value.is_empty() => Err(invalid(key, value, "Username cannot be empty")),
        "timeout_secs" => parse_timeout(key, value).map(|_| ()),
        _ => Ok(()),
    }
}

fn parse_timeout(key: &str, value: &str) -> Result<u64> {
    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(invalid(key, value, "Timeout must be a positive number of seconds")),
    }
}

fn invalid(key: &str, value: &str, hint: &str) -> anyhow::Error {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        hint: hint.to_string(),
    }
    .into()
}

// ── Unit tests ───────────────────────────────────────────────────────────────
