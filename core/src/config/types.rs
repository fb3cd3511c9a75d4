use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::provider::{
    ActionButtonSettings, ErrorViewSettings, LoadingViewSettings, ManagerSettings,
    SuccessViewSettings,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub manager: ManagerConfig,

    #[serde(default)]
    pub views: ViewsConfig,

    #[serde(default)]
    pub provider: ProviderConfig,
}

impl AppConfig {
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, each run logs to its own file under `directory`.
    #[serde(default)]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "unloader_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Log file directory. Defaults to `~/.unloader/logs`.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: false,
            level: default_logging_level(),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerConfig {
    #[serde(default = "default_auto_hide_delay_ms")]
    pub auto_hide_delay_ms: u64,
}

fn default_auto_hide_delay_ms() -> u64 {
    2_000
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            auto_hide_delay_ms: default_auto_hide_delay_ms(),
        }
    }
}

impl ManagerConfig {
    pub fn settings(&self) -> ManagerSettings {
        ManagerSettings::new(Duration::from_millis(self.auto_hide_delay_ms))
    }
}

/// Texts used by the built-in views. `None` hides the corresponding line; in
/// a config file that is written as an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewsConfig {
    #[serde(default = "default_loading_text", with = "hideable_text")]
    pub loading_text: Option<String>,

    #[serde(default = "default_error_text", with = "hideable_text")]
    pub error_text: Option<String>,

    #[serde(default = "default_close_button")]
    pub close_button: String,

    #[serde(default = "default_retry_button")]
    pub retry_button: String,

    #[serde(default = "default_success_text", with = "hideable_text")]
    pub success_text: Option<String>,
}

/// `None` <-> `""`, so a hidden text survives a TOML round trip.
mod hideable_text {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(value.as_deref().unwrap_or(""))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        Ok((!text.trim().is_empty()).then_some(text))
    }
}

fn default_loading_text() -> Option<String> {
    LoadingViewSettings::default().text
}

fn default_error_text() -> Option<String> {
    ErrorViewSettings::default().error_text
}

fn default_close_button() -> String {
    ErrorViewSettings::default().close_button.text
}

fn default_retry_button() -> String {
    ErrorViewSettings::default().retry_button.text
}

fn default_success_text() -> Option<String> {
    SuccessViewSettings::default().text
}

impl Default for ViewsConfig {
    fn default() -> Self {
        Self {
            loading_text: default_loading_text(),
            error_text: default_error_text(),
            close_button: default_close_button(),
            retry_button: default_retry_button(),
            success_text: default_success_text(),
        }
    }
}

impl ViewsConfig {
    pub fn loading_settings(&self) -> LoadingViewSettings {
        LoadingViewSettings {
            text: self.loading_text.clone(),
        }
    }

    pub fn error_settings(&self) -> ErrorViewSettings {
        ErrorViewSettings {
            error_text: self.error_text.clone(),
            close_button: ActionButtonSettings {
                text: self.close_button.clone(),
            },
            retry_button: ActionButtonSettings {
                text: self.retry_button.clone(),
            },
        }
    }

    pub fn success_settings(&self) -> SuccessViewSettings {
        SuccessViewSettings {
            text: self.success_text.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Text,
    Jsonl,
}

impl FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "jsonl" | "json" => Ok(Self::Jsonl),
            other => Err(ConfigError::InvalidValue {
                key: "provider.kind",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Jsonl => f.write_str("jsonl"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub kind: ProviderKind,

    /// Text provider only: replace non-ASCII characters with `?`.
    #[serde(default)]
    pub ascii_only: bool,
}
