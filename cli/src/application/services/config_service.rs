//! Application service: configuration use-cases.

use anyhow::{Context, Result};
use onevm_common::EnvOverrides;

use crate::application::ports::ConfigStore;
use crate::domain::config::OnevmConfig;

/// Load the stored configuration.
pub fn load_config(store: &impl ConfigStore) -> Result<OnevmConfig> {
    store.load()
}

/// Save configuration.
pub fn save_config(store: &impl ConfigStore, config: &OnevmConfig) -> Result<()> {
    store.save(config)
}

/// Stored configuration with `env` layered on top.
pub fn effective_config(store: &impl ConfigStore, env: EnvOverrides) -> Result<OnevmConfig> {
    let mut config = store.load()?;
    config.apply_env(env);
    Ok(config)
}

/// Validate and store one setting, returning the updated configuration.
pub fn set_value(store: &impl ConfigStore, key: &str, value: &str) -> Result<OnevmConfig> {
    let mut config = store.load()?;
    config.set(key, value)?;
    store
        .save(&config)
        .with_context(|| format!("cannot store {key}"))?;
    Ok(config)
}
