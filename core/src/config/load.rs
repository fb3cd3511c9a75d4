use std::path::{Path, PathBuf};

use super::types::AppConfig;
use crate::error::ConfigError;

pub const ENV_AUTO_HIDE_MS: &str = "UNLOADER_AUTO_HIDE_MS";
pub const ENV_PROVIDER: &str = "UNLOADER_PROVIDER";
pub const ENV_LOG_LEVEL: &str = "UNLOADER_LOG_LEVEL";

/// Get the default data directory: ~/.unloader
pub fn get_unloader_data_dir() -> Result<PathBuf, ConfigError> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| ConfigError::NoHomeDir)?;
    Ok(PathBuf::from(home).join(".unloader"))
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();
    let s = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    toml::from_str::<AppConfig>(&s).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

pub fn load_default() -> Result<AppConfig, ConfigError> {
    // Priority 1: ~/.unloader/config.toml
    let data_dir = get_unloader_data_dir()?;
    let home_config = data_dir.join("config.toml");

    // Priority 2: ./unloader.toml
    let local_config = Path::new("unloader.toml");

    let mut cfg = if home_config.exists() {
        load_from_path(&home_config)?
    } else if local_config.exists() {
        load_from_path(local_config)?
    } else {
        AppConfig::default()
    };

    if cfg
        .logging
        .directory
        .as_deref()
        .map(|s| s.trim().is_empty())
        .unwrap_or(true)
    {
        cfg.logging.directory = Some(data_dir.join("logs").to_string_lossy().to_string());
    }

    // Environment variable overrides (Priority 0: highest)
    apply_overrides(&mut cfg, |key| std::env::var(key).ok())?;
    Ok(cfg)
}

/// Applies `UNLOADER_*` overrides read through `lookup`. Blank values are ignored.
pub fn apply_overrides<F>(cfg: &mut AppConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = get(ENV_AUTO_HIDE_MS) {
        cfg.manager.auto_hide_delay_ms =
            v.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_AUTO_HIDE_MS,
                value: v.clone(),
            })?;
    }
    if let Some(v) = get(ENV_PROVIDER) {
        cfg.provider.kind = v.parse()?;
    }
    if let Some(v) = get(ENV_LOG_LEVEL) {
        cfg.logging.level = v.trim().to_string();
    }
    Ok(())
}
