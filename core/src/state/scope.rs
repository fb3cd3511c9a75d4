//! Binds a local manager's global subscription to a view's lifecycle.

use super::global::GlobalLoadingManager;
use super::manager::LoadingManager;
use crate::provider::{AnyProvider, ViewProvider};

/// Subscribes `local` to `global` when one is present; otherwise does nothing.
pub fn subscribe_to_global(local: &LoadingManager, global: Option<&GlobalLoadingManager>) {
    match global {
        Some(global) => global.subscribe_to_loading_managers([local]),
        None => tracing::trace!(manager = %local.id(), "no global manager to subscribe to"),
    }
}

/// Counterpart of [`subscribe_to_global`].
pub fn unsubscribe_from_global(local: &LoadingManager, global: Option<&GlobalLoadingManager>) {
    if let Some(global) = global {
        global.unsubscribe_from_loading_manager(local);
    }
}

/// A UI region with its own [`LoadingManager`], optionally feeding a global one.
///
/// `appear` and `disappear` may be called any number of times; the global
/// subscription set never holds the manager more than once. Dropping the
/// scope unsubscribes it.
pub struct LocalScope {
    provider: AnyProvider,
    manager: LoadingManager,
    global: Option<GlobalLoadingManager>,
}

impl LocalScope {
    pub fn new(provider: impl ViewProvider, global: Option<GlobalLoadingManager>) -> Self {
        let provider = provider.erase();
        let manager = LoadingManager::new(provider.manager_settings());
        Self {
            provider,
            manager,
            global,
        }
    }

    pub fn manager(&self) -> &LoadingManager {
        &self.manager
    }

    pub fn provider(&self) -> &AnyProvider {
        &self.provider
    }

    pub fn global(&self) -> Option<&GlobalLoadingManager> {
        self.global.as_ref()
    }

    pub fn appear(&self) {
        subscribe_to_global(&self.manager, self.global.as_ref());
    }

    pub fn disappear(&self) {
        unsubscribe_from_global(&self.manager, self.global.as_ref());
    }
}

impl Drop for LocalScope {
    fn drop(&mut self) {
        self.disappear();
    }
}
