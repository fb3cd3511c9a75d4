//! Error payloads carried by the failure state.
//!
//! Errors never cross a manager boundary as control flow: they are wrapped in
//! [`LoadError`] and published as data, and the overlay only ever looks at
//! their description.

use std::sync::Arc;
use thiserror::Error;

/// Cloneable, describable error stored in `LoadableState::Failure`.
#[derive(Error, Debug, Clone)]
pub enum LoadError {
    #[error("{0}")]
    Message(String),
    #[error("{0}")]
    Source(Arc<dyn std::error::Error + Send + Sync>),
}

impl LoadError {
    pub fn new<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Source(Arc::new(err))
    }

    pub fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    /// Human-readable text shown by error views.
    pub fn description(&self) -> String {
        self.to_string()
    }

    /// Returns the wrapped error if it is of type `E`.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        match self {
            Self::Source(inner) => inner.downcast_ref::<E>(),
            Self::Message(_) => None,
        }
    }
}

impl From<AppError> for LoadError {
    fn from(err: AppError) -> Self {
        Self::new(err)
    }
}

impl From<String> for LoadError {
    fn from(message: String) -> Self {
        Self::Message(message)
    }
}

impl From<&str> for LoadError {
    fn from(message: &str) -> Self {
        Self::Message(message.to_string())
    }
}

/// Common application failures with ready-made user-facing descriptions.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Resource(#[from] ResourceError),
    #[error("{0}")]
    Network(#[from] NetworkError),
    #[error("{}", .0.as_deref().unwrap_or("An unknown error occurred."))]
    Custom(Option<String>),
    #[error("{0}")]
    General(LoadError),
}

#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("The requested resource is not available.")]
    NotAvailable,
    #[error("{0}")]
    Other(LoadError),
}

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("The network is inaccessible. Please check your internet connection.")]
    Inaccessible,
    #[error("No response was received from the server.")]
    NoResponse,
    #[error("The server returned an empty response for status code {0}.")]
    NoResponseData(u16),
    #[error("Endpoint error with status code {0}.")]
    Endpoint(u16),
    #[error("{}", .description.as_deref().unwrap_or("A custom network error occurred."))]
    Custom {
        code: Option<i32>,
        description: Option<String>,
    },
    #[error("{0}")]
    Other(LoadError),
}
