//! Loadable state model.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::error::LoadError;
use crate::provider::AnyProvider;

/// Opaque success payload; only its description is ever inspected.
#[derive(Clone)]
pub struct SuccessMessage(Arc<dyn fmt::Display + Send + Sync>);

impl SuccessMessage {
    pub fn new<M>(message: M) -> Self
    where
        M: fmt::Display + Send + Sync + 'static,
    {
        Self(Arc::new(message))
    }

    pub fn description(&self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for SuccessMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Debug for SuccessMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SuccessMessage")
            .field(&self.description())
            .finish()
    }
}

/// Case of a [`LoadableState`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateKind {
    Idle,
    Loading,
    Success,
    Failure,
}

impl StateKind {
    /// Success and failure expire back to idle.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Failure)
    }
}

/// Current presentation state of one manager.
///
/// Two states are equal when their descriptions are equal: failures with the
/// same error text compare equal even if the error values differ.
#[derive(Clone, Default)]
pub enum LoadableState {
    #[default]
    Idle,
    Loading {
        provider: AnyProvider,
    },
    Success {
        message: SuccessMessage,
        provider: AnyProvider,
    },
    Failure {
        error: LoadError,
        provider: AnyProvider,
        on_retry: Option<Action>,
    },
}

impl LoadableState {
    pub fn kind(&self) -> StateKind {
        match self {
            Self::Idle => StateKind::Idle,
            Self::Loading { .. } => StateKind::Loading,
            Self::Success { .. } => StateKind::Success,
            Self::Failure { .. } => StateKind::Failure,
        }
    }

    /// Case name plus the description of the payload.
    pub fn description(&self) -> String {
        match self {
            Self::Idle => "Idle".to_string(),
            Self::Loading { .. } => "Loading".to_string(),
            Self::Success { message, .. } => format!("Success: `{}`", message.description()),
            Self::Failure { error, .. } => format!("Error: `{}`", error.description()),
        }
    }

    pub fn provider(&self) -> Option<&AnyProvider> {
        match self {
            Self::Idle => None,
            Self::Loading { provider }
            | Self::Success { provider, .. }
            | Self::Failure { provider, .. } => Some(provider),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }
}

impl PartialEq for LoadableState {
    fn eq(&self, other: &Self) -> bool {
        self.description() == other.description()
    }
}

impl Eq for LoadableState {}

impl Hash for LoadableState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.description().hash(state);
    }
}

impl fmt::Debug for LoadableState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

impl fmt::Display for LoadableState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}
