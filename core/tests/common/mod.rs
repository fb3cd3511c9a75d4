#![allow(dead_code)]

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use unloader_core::action::Action;
use unloader_core::error::LoadError;
use unloader_core::provider::{
    AnyView, ManagerSettings, ProgressView, SuccessView, ViewProvider,
};
use unloader_core::state::{LoadingManager, StateKind, Subscription, SuccessMessage};
use unloader_core::util::Atomic;
use uuid::Uuid;

/// Provider that counts how often each view is requested.
#[derive(Default)]
pub struct CountingProvider {
    id: Uuid,
    pub delay: Option<Duration>,
    pub loading_calls: Arc<AtomicU32>,
    pub success_calls: Arc<AtomicU32>,
}

impl CountingProvider {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            ..Self::default()
        }
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new()
        }
    }
}

impl ViewProvider for CountingProvider {
    fn id(&self) -> Uuid {
        self.id
    }

    fn loading_view(&self) -> AnyView {
        self.loading_calls.fetch_add(1, Ordering::SeqCst);
        Box::new(ProgressView::new(self.loading_settings()))
    }

    fn success_view(&self, message: &SuccessMessage) -> AnyView {
        self.success_calls.fetch_add(1, Ordering::SeqCst);
        Box::new(SuccessView::new(
            self.success_settings(),
            Some(message.clone()),
        ))
    }

    fn manager_settings(&self) -> ManagerSettings {
        self.delay.map(ManagerSettings::new).unwrap_or_default()
    }
}

/// Error with a domain and code, rendered as "<domain> (<code>)".
#[derive(Debug, Clone)]
pub struct DomainError {
    pub domain: String,
    pub code: i32,
}

impl DomainError {
    pub fn new(domain: &str, code: i32) -> Self {
        Self {
            domain: domain.to_string(),
            code,
        }
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.domain, self.code)
    }
}

impl std::error::Error for DomainError {}

pub fn manager_with_delay(ms: u64) -> LoadingManager {
    LoadingManager::new(ManagerSettings::new(Duration::from_millis(ms)))
}

/// Records the kind of every state the manager publishes.
pub fn record_kinds(manager: &LoadingManager) -> (Atomic<Vec<StateKind>>, Subscription) {
    let seen = Atomic::new(Vec::new());
    let log = seen.clone();
    let sub = manager.sink(move |state| log.mutate(|v| v.push(state.kind())));
    (seen, sub)
}

pub fn always_failing(calls: Arc<AtomicU32>) -> Action<String> {
    Action::new(move || {
        calls.fetch_add(1, Ordering::SeqCst);
        async { Err(LoadError::msg("primary failed")) }
    })
}

pub fn always_succeeding(value: &'static str) -> Action<String> {
    Action::new(move || async move { Ok(value.to_string()) })
}

/// Fails the first `failures` calls, then succeeds.
pub fn flaky(failures: u32, calls: Arc<AtomicU32>) -> Action<String> {
    Action::new(move || {
        let n = calls.fetch_add(1, Ordering::SeqCst);
        async move {
            if n < failures {
                Err(LoadError::new(DomainError::new("Flaky", n as i32)))
            } else {
                Ok(format!("ok after {n}"))
            }
        }
    })
}
