//! Settings bundles exposed by every provider.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_AUTO_HIDE_DELAY: Duration = Duration::from_secs(2);

/// Behaviour of a [`LoadingManager`](crate::state::LoadingManager).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagerSettings {
    /// How long success and failure states stay visible before returning to idle.
    pub auto_hide_delay: Duration,
}

impl ManagerSettings {
    pub fn new(auto_hide_delay: Duration) -> Self {
        Self { auto_hide_delay }
    }
}

impl Default for ManagerSettings {
    fn default() -> Self {
        Self::new(DEFAULT_AUTO_HIDE_DELAY)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadingViewSettings {
    pub text: Option<String>,
}

impl Default for LoadingViewSettings {
    fn default() -> Self {
        Self {
            text: Some("Loading...".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionButtonSettings {
    pub text: String,
}

impl ActionButtonSettings {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorViewSettings {
    /// Headline shown above the error description.
    pub error_text: Option<String>,
    pub close_button: ActionButtonSettings,
    pub retry_button: ActionButtonSettings,
}

impl Default for ErrorViewSettings {
    fn default() -> Self {
        Self {
            error_text: Some("An error has occured!".to_string()),
            close_button: ActionButtonSettings::new("Close"),
            retry_button: ActionButtonSettings::new("Retry"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessViewSettings {
    /// Used when the success message itself has no text.
    pub text: Option<String>,
}

impl Default for SuccessViewSettings {
    fn default() -> Self {
        Self {
            text: Some("Success!".to_string()),
        }
    }
}

/// All four bundles, captured together when a provider is type-erased.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderSettings {
    pub manager: ManagerSettings,
    pub loading: LoadingViewSettings,
    pub error: ErrorViewSettings,
    pub success: SuccessViewSettings,
}
