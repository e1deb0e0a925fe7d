//! Infrastructure implementation of the `ConfigStore` port.

use anyhow::{Context, Result};
use onevm_common::EnvOverrides;
use std::path::PathBuf;

use crate::application::ports::ConfigStore;
use crate::domain::config::{CONFIG_PATH_VAR, OnevmConfig};

/// Production implementation of `ConfigStore` that uses a YAML file on disk.
pub struct YamlConfigStore;

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<OnevmConfig> {
        let path = self.path()?;
        if !path.exists() {
            return Ok(OnevmConfig::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
    }

    fn save(&self, config: &OnevmConfig) -> Result<()> {
        let path = self.path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("cannot create {}", parent.display()))?;
        }
        let content = serde_yaml::to_string(config).context("cannot serialize config")?;
        std::fs::write(&path, content)
            .with_context(|| format!("cannot write {}", path.display()))?;

        // The file may hold a password.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600))
                .with_context(|| format!("cannot set permissions on {}", path.display()))?;
        }
        tracing::debug!(path = %path.display(), "config saved");
        Ok(())
    }

    fn path(&self) -> Result<PathBuf> {
        if let Ok(val) = std::env::var(CONFIG_PATH_VAR) {
            return Ok(PathBuf::from(val));
        }
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(home.join(".onevm").join("config.yaml"))
    }
}

/// Read `ONEVM_*` overrides from the process environment.
///
/// # Errors
///
/// Returns an error if a variable is present but malformed, e.g. a
/// non-numeric `ONEVM_TIMEOUT_SECS`.
pub fn env_overrides() -> Result<EnvOverrides> {
    envy::prefixed(EnvOverrides::PREFIX)
        .from_env::<EnvOverrides>()
        .context("invalid ONEVM_* environment variable")
}
