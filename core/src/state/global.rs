//! App-wide aggregation of local managers.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::watch;
use uuid::Uuid;

use super::manager::LoadingManager;
use super::publisher::{Published, Subscription};
use super::types::LoadableState;

/// Mirrors the state of whichever subscribed [`LoadingManager`] published
/// last. Used to drive a blocking overlay above the whole application.
///
/// Subscriptions are keyed by manager id: subscribing a manager twice replaces
/// the earlier subscription, unsubscribing an unknown manager does nothing.
#[derive(Clone)]
pub struct GlobalLoadingManager {
    inner: Arc<GlobalInner>,
}

struct GlobalInner {
    id: Uuid,
    state: Published<LoadableState>,
    subscriptions: Mutex<HashMap<Uuid, Subscription>>,
}

impl GlobalInner {
    fn subscriptions(&self) -> MutexGuard<'_, HashMap<Uuid, Subscription>> {
        match self.subscriptions.lock() {
            Ok(map) => map,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl GlobalLoadingManager {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(GlobalInner {
                id: Uuid::new_v4(),
                state: Published::new(LoadableState::Idle),
                subscriptions: Mutex::new(HashMap::new()),
            }),
        }
    }

    pub fn id(&self) -> Uuid {
        self.inner.id
    }

    pub fn state(&self) -> LoadableState {
        self.inner.state.get()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.get().is_loading()
    }

    pub fn subscribe(&self) -> watch::Receiver<LoadableState> {
        self.inner.state.subscribe()
    }

    pub fn sink<F>(&self, f: F) -> Subscription
    where
        F: Fn(&LoadableState) + Send + Sync + 'static,
    {
        self.inner.state.sink(f)
    }

    /// Forwards each manager's state into this one. The aggregated state is
    /// seeded with the manager's current state. Subscribing a manager that is
    /// already subscribed replaces its subscription and re-seeds. Entries for
    /// managers that were dropped without unsubscribing are pruned.
    pub fn subscribe_to_loading_managers<'a, I>(&self, managers: I)
    where
        I: IntoIterator<Item = &'a LoadingManager>,
    {
        self.prune_dropped();
        for manager in managers {
            let manager_id = manager.id();
            let weak = Arc::downgrade(&self.inner);
            let subscription = manager.sink(move |state| {
                if let Some(inner) = weak.upgrade() {
                    inner.state.publish(state.clone());
                }
            });

            let replaced = self.inner.subscriptions().insert(manager_id, subscription);
            match replaced {
                Some(previous) => {
                    previous.cancel();
                    tracing::trace!(global = %self.inner.id, manager = %manager_id, "replaced loading manager subscription");
                }
                None => {
                    tracing::debug!(global = %self.inner.id, manager = %manager_id, "subscribed to loading manager");
                }
            }
        }
    }

    fn prune_dropped(&self) {
        let dead: Vec<Subscription> = {
            let mut map = self.inner.subscriptions();
            let ids: Vec<Uuid> = map
                .iter()
                .filter(|(_, sub)| !sub.is_source_alive())
                .map(|(id, _)| *id)
                .collect();
            ids.into_iter().filter_map(|id| map.remove(&id)).collect()
        };
        if !dead.is_empty() {
            tracing::debug!(global = %self.inner.id, pruned = dead.len(), "dropped subscriptions of released managers");
        }
    }

    pub fn unsubscribe_from_loading_manager(&self, manager: &LoadingManager) {
        let removed = self.inner.subscriptions().remove(&manager.id());
        if let Some(subscription) = removed {
            subscription.cancel();
            tracing::debug!(global = %self.inner.id, manager = %manager.id(), "unsubscribed from loading manager");
        }
    }

    pub fn is_subscribed(&self, manager: &LoadingManager) -> bool {
        self.inner.subscriptions().contains_key(&manager.id())
    }

    pub fn subscription_count(&self) -> usize {
        self.inner.subscriptions().len()
    }
}

impl Default for GlobalLoadingManager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GlobalLoadingManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlobalLoadingManager")
            .field("id", &self.inner.id)
            .field("state", &self.state())
            .field("subscriptions", &self.subscription_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::DefaultProvider;
    use crate::state::StateKind;

    #[test]
    fn repeated_subscribe_keeps_one_subscription() {
        let global = GlobalLoadingManager::new();
        let local = LoadingManager::default();
        for _ in 0..5 {
            global.subscribe_to_loading_managers([&local]);
        }
        assert_eq!(global.subscription_count(), 1);
        assert!(global.is_subscribed(&local));

        global.unsubscribe_from_loading_manager(&local);
        assert_eq!(global.subscription_count(), 0);
    }

    #[test]
    fn unsubscribing_unknown_manager_is_noop() {
        let global = GlobalLoadingManager::new();
        global.unsubscribe_from_loading_manager(&LoadingManager::default());
        assert_eq!(global.subscription_count(), 0);
    }

    #[test]
    fn mirrors_local_state_and_loading_flag() {
        let global = GlobalLoadingManager::new();
        let local = LoadingManager::default();
        global.subscribe_to_loading_managers([&local]);

        local.show_loading(DefaultProvider::new());
        assert!(global.is_loading());

        local.hide();
        assert!(!global.is_loading());
        assert!(global.state().is_idle());
    }

    #[test]
    fn subscribing_seeds_current_state() {
        let global = GlobalLoadingManager::new();
        let local = LoadingManager::default();
        local.show_loading(DefaultProvider::new());
        global.subscribe_to_loading_managers([&local]);
        assert!(global.is_loading());
    }

    #[test]
    fn last_publisher_wins() {
        let global = GlobalLoadingManager::new();
        let first = LoadingManager::default();
        let second = LoadingManager::default();
        global.subscribe_to_loading_managers([&first, &second]);
        assert_eq!(global.subscription_count(), 2);

        first.show_loading(DefaultProvider::new());
        second.hide();
        assert_eq!(global.state().kind(), StateKind::Idle);
    }

    #[test]
    fn resubscribing_loading_manager_reclaims_global_state() {
        let global = GlobalLoadingManager::new();
        let a = LoadingManager::default();
        let b = LoadingManager::default();
        global.subscribe_to_loading_managers([&a, &b]);

        a.show_loading(DefaultProvider::new());
        b.hide();
        assert!(global.state().is_idle());

        global.subscribe_to_loading_managers([&a]);
        assert_eq!(global.state().kind(), StateKind::Loading);
        assert_eq!(global.subscription_count(), 2);
        assert_eq!(a.sink_count(), 1);
    }

    #[test]
    fn dropped_manager_is_pruned_on_next_subscribe() {
        let global = GlobalLoadingManager::new();
        let kept = LoadingManager::default();
        {
            let released = LoadingManager::default();
            global.subscribe_to_loading_managers([&released]);
            assert_eq!(global.subscription_count(), 1);
        }
        global.subscribe_to_loading_managers([&kept]);
        assert_eq!(global.subscription_count(), 1);
        assert!(global.is_subscribed(&kept));
    }

    #[test]
    fn unsubscribed_manager_no_longer_forwards() {
        let global = GlobalLoadingManager::new();
        let local = LoadingManager::default();
        global.subscribe_to_loading_managers([&local]);
        global.unsubscribe_from_loading_manager(&local);

        local.show_loading(DefaultProvider::new());
        assert!(!global.is_loading());
    }
}
