//! Choosing and driving the overlay drawn for a state.

use crate::action::Action;
use crate::provider::{AnyView, Control, ViewProvider};
use crate::state::{GlobalLoadingManager, LoadableState, LoadingManager};

/// The view a state's provider draws for it, or `None` while idle.
pub fn overlay_for(state: &LoadableState, on_close: Action) -> Option<AnyView> {
    match state {
        LoadableState::Idle => None,
        LoadableState::Loading { provider } => Some(provider.loading_view()),
        LoadableState::Success { message, provider } => Some(provider.success_view(message)),
        LoadableState::Failure {
            error,
            provider,
            on_retry,
        } => Some(provider.error_view(error, on_retry.clone(), on_close)),
    }
}

#[derive(Debug, Clone)]
pub enum OverlaySource {
    Local(LoadingManager),
    Global(GlobalLoadingManager),
}

/// Presents whatever state a manager currently holds.
///
/// A local host dismisses success, failure and idle overlays on tap and
/// ignores taps while loading. A global host only mirrors other managers, so
/// it never dismisses anything itself and blocks interaction while loading.
#[derive(Debug, Clone)]
pub struct OverlayHost {
    source: OverlaySource,
}

impl OverlayHost {
    pub fn local(manager: LoadingManager) -> Self {
        Self {
            source: OverlaySource::Local(manager),
        }
    }

    pub fn global(manager: GlobalLoadingManager) -> Self {
        Self {
            source: OverlaySource::Global(manager),
        }
    }

    pub fn source(&self) -> &OverlaySource {
        &self.source
    }

    pub fn state(&self) -> LoadableState {
        match &self.source {
            OverlaySource::Local(manager) => manager.state(),
            OverlaySource::Global(global) => global.state(),
        }
    }

    fn close_action(&self) -> Action {
        match &self.source {
            OverlaySource::Local(manager) => manager.hide_action(),
            OverlaySource::Global(_) => Action::simple(|| {}),
        }
    }

    pub fn current_view(&self) -> Option<AnyView> {
        overlay_for(&self.state(), self.close_action())
    }

    pub fn render(&self) -> Option<String> {
        self.current_view().map(|view| view.render())
    }

    /// Returns true when the tap dismissed the overlay.
    pub fn tap(&self) -> bool {
        match &self.source {
            OverlaySource::Local(manager) => {
                if manager.state().is_loading() {
                    return false;
                }
                manager.hide();
                true
            }
            OverlaySource::Global(_) => false,
        }
    }

    /// Runs `control` on the current view. False if nothing offers it.
    pub fn trigger(&self, control: Control) -> bool {
        self.current_view()
            .map(|view| view.trigger(control))
            .unwrap_or(false)
    }

    pub fn blocks_interaction(&self) -> bool {
        match &self.source {
            OverlaySource::Local(manager) => !manager.state().is_idle(),
            OverlaySource::Global(global) => global.is_loading(),
        }
    }
}
