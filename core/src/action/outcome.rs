use crate::error::LoadError;

/// Result of running an [`Action`](super::Action) chain.
#[derive(Debug, Clone)]
pub struct ActionOutcome<T> {
    /// Zero-based attempt index at which the chain settled.
    pub attempt_count: u32,
    pub result: Result<T, LoadError>,
}

impl<T> ActionOutcome<T> {
    pub fn success(value: T, attempt_count: u32) -> Self {
        Self {
            attempt_count,
            result: Ok(value),
        }
    }

    pub fn failure(error: LoadError, attempt_count: u32) -> Self {
        Self {
            attempt_count,
            result: Err(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn value(&self) -> Option<&T> {
        self.result.as_ref().ok()
    }

    pub fn error(&self) -> Option<&LoadError> {
        self.result.as_ref().err()
    }

    pub fn into_result(self) -> Result<T, LoadError> {
        self.result
    }
}
