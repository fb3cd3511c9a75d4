//! Local loading manager.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::watch;
use uuid::Uuid;

use super::publisher::{Published, Subscription};
use super::timer::AutoHideTimer;
use super::transitions::{StateTransition, TimerDirective};
use super::types::{LoadableState, SuccessMessage};
use crate::action::Action;
use crate::error::LoadError;
use crate::provider::{ManagerSettings, ViewProvider};

/// Owns one [`LoadableState`] and expires terminal states back to idle.
///
/// Cloning yields another handle to the same manager. Transitions never fail;
/// each one stores the new state and then notifies sinks synchronously on the
/// calling thread.
#[derive(Clone)]
pub struct LoadingManager {
    inner: Arc<ManagerInner>,
}

struct ManagerInner {
    id: Uuid,
    settings: ManagerSettings,
    state: Published<LoadableState>,
    timer: AutoHideTimer,
    /// Serializes timer bookkeeping with the state store.
    gate: Mutex<()>,
}

impl ManagerInner {
    fn gate(&self) -> MutexGuard<'_, ()> {
        match self.gate.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn expire(&self, generation: u64) {
        {
            let _gate = self.gate();
            if !self.timer.finish(generation) {
                return;
            }
            tracing::trace!(manager = %self.id, "auto-hide fired");
            self.state.store(LoadableState::Idle);
        }
        self.state.notify();
    }
}

impl LoadingManager {
    pub fn new(settings: ManagerSettings) -> Self {
        Self::with_state(LoadableState::Idle, settings)
    }

    /// Starts from `state` without arming the auto-hide timer.
    pub fn with_state(state: LoadableState, settings: ManagerSettings) -> Self {
        Self {
            inner: Arc::new(ManagerInner {
                id: Uuid::new_v4(),
                settings,
                state: Published::new(state),
                timer: AutoHideTimer::new(),
                gate: Mutex::new(()),
            }),
        }
    }

    pub fn id(&self) -> Uuid {
        self.inner.id
    }

    pub fn settings(&self) -> ManagerSettings {
        self.inner.settings
    }

    pub fn state(&self) -> LoadableState {
        self.inner.state.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<LoadableState> {
        self.inner.state.subscribe()
    }

    /// Attaches a synchronous observer. It is called with the current state
    /// right away and after every transition until the guard is dropped.
    pub fn sink<F>(&self, f: F) -> Subscription
    where
        F: Fn(&LoadableState) + Send + Sync + 'static,
    {
        self.inner.state.sink(f)
    }

    pub fn sink_count(&self) -> usize {
        self.inner.state.sink_count()
    }

    pub fn is_auto_hide_pending(&self) -> bool {
        self.inner.timer.is_pending()
    }

    pub fn show_loading(&self, provider: impl ViewProvider) {
        self.transition(LoadableState::Loading {
            provider: provider.erase(),
        });
    }

    pub fn show_success<M>(&self, message: M, provider: impl ViewProvider)
    where
        M: fmt::Display + Send + Sync + 'static,
    {
        self.transition(LoadableState::Success {
            message: SuccessMessage::new(message),
            provider: provider.erase(),
        });
    }

    pub fn show_failure(
        &self,
        error: impl Into<LoadError>,
        provider: impl ViewProvider,
        on_retry: Option<Action>,
    ) {
        self.transition(LoadableState::Failure {
            error: error.into(),
            provider: provider.erase(),
            on_retry,
        });
    }

    pub fn hide(&self) {
        self.transition(LoadableState::Idle);
    }

    /// An action that hides this manager; handed to error views as `Close`.
    /// Holds only a weak reference.
    pub fn hide_action(&self) -> Action {
        let weak = Arc::downgrade(&self.inner);
        Action::simple(move || {
            if let Some(inner) = weak.upgrade() {
                LoadingManager { inner }.hide();
            }
        })
    }

    fn transition(&self, next: LoadableState) {
        let inner = &self.inner;
        {
            let _gate = inner.gate();
            match StateTransition::timer_directive(next.kind()) {
                TimerDirective::Cancel => inner.timer.cancel(),
                TimerDirective::Restart => {
                    let weak = Arc::downgrade(inner);
                    inner
                        .timer
                        .start(inner.settings.auto_hide_delay, move |generation| {
                            if let Some(inner) = weak.upgrade() {
                                inner.expire(generation);
                            }
                        });
                }
            }
            tracing::debug!(manager = %inner.id, state = %next.description(), "loading state changed");
            inner.state.store(next);
        }
        inner.state.notify();
    }
}

impl Default for LoadingManager {
    fn default() -> Self {
        Self::new(ManagerSettings::default())
    }
}

impl PartialEq for LoadingManager {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for LoadingManager {}

impl fmt::Debug for LoadingManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadingManager")
            .field("id", &self.inner.id)
            .field("state", &self.state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::DefaultProvider;
    use crate::state::StateKind;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn manager(delay_ms: u64) -> LoadingManager {
        LoadingManager::new(ManagerSettings {
            auto_hide_delay: Duration::from_millis(delay_ms),
        })
    }

    fn recorder(manager: &LoadingManager) -> (Arc<Mutex<Vec<StateKind>>>, Subscription) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = seen.clone();
        let sub = manager.sink(move |state| log.lock().unwrap().push(state.kind()));
        (seen, sub)
    }

    #[test]
    fn starts_idle() {
        let m = LoadingManager::default();
        assert!(m.state().is_idle());
        assert_eq!(m.settings().auto_hide_delay, Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn success_expires_exactly_once() {
        let m = manager(100);
        let (seen, _sub) = recorder(&m);

        m.show_success("saved", DefaultProvider::new());
        assert_eq!(m.state().kind(), StateKind::Success);

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(m.state().is_idle());

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(
            *seen.lock().unwrap(),
            vec![StateKind::Idle, StateKind::Success, StateKind::Idle]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn loading_cancels_pending_auto_hide() {
        let m = manager(100);
        m.show_success("done", DefaultProvider::new());
        assert!(m.is_auto_hide_pending());

        tokio::time::sleep(Duration::from_millis(50)).await;
        m.show_loading(DefaultProvider::new());
        assert!(!m.is_auto_hide_pending());

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(m.state().is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn new_terminal_state_restarts_countdown() {
        let m = manager(100);
        m.show_success("first", DefaultProvider::new());
        tokio::time::sleep(Duration::from_millis(80)).await;
        m.show_failure("boom", DefaultProvider::new(), None);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(m.state().kind(), StateKind::Failure);

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(m.state().is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn hide_lands_on_idle_from_every_state() {
        let m = manager(1_000);
        m.show_loading(DefaultProvider::new());
        m.hide();
        assert!(m.state().is_idle());
        assert!(m.state().provider().is_none());

        m.show_success(1, DefaultProvider::new());
        m.hide();
        assert!(m.state().is_idle());
        assert!(!m.is_auto_hide_pending());

        m.show_failure("x", DefaultProvider::new(), Some(Action::simple(|| {})));
        m.hide();
        assert_eq!(m.state(), LoadableState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_manager_does_not_keep_timer_alive() {
        let m = manager(100);
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let sub = m.sink(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        m.show_success("bye", DefaultProvider::new());
        drop(m);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        drop(sub);
    }

    #[tokio::test]
    async fn hide_action_hides_manager() {
        let m = manager(10_000);
        m.show_failure("bad", DefaultProvider::new(), None);
        let outcome = m.hide_action().run().await;
        assert!(outcome.is_success());
        assert!(m.state().is_idle());
    }

    #[tokio::test]
    async fn watch_receiver_sees_transition() {
        let m = LoadingManager::default();
        let mut rx = m.subscribe();
        m.show_loading(DefaultProvider::new());
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_loading());
    }
}
