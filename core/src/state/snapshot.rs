//! Serializable view of a [`LoadableState`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::types::{LoadableState, StateKind};
use crate::provider::ViewProvider;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub kind: StateKind,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<Uuid>,
    pub captured_at: DateTime<Utc>,
}

impl StateSnapshot {
    pub fn capture(state: &LoadableState) -> Self {
        Self {
            kind: state.kind(),
            description: state.description(),
            provider_id: state.provider().map(|p| p.id()),
            captured_at: Utc::now(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl LoadableState {
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot::capture(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{DefaultProvider, ViewProvider};

    #[test]
    fn idle_snapshot_omits_provider() {
        let json = LoadableState::Idle.snapshot().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["kind"], "idle");
        assert_eq!(value["description"], "Idle");
        assert!(value.get("provider_id").is_none());
    }

    #[test]
    fn loading_snapshot_carries_provider_id() {
        let provider = DefaultProvider::new().erase();
        let id = provider.id();
        let snapshot = LoadableState::Loading { provider }.snapshot();
        assert_eq!(snapshot.kind, StateKind::Loading);
        assert_eq!(snapshot.provider_id, Some(id));
    }
}
