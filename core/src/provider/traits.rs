use uuid::Uuid;

use super::any::AnyProvider;
use super::settings::{
    ErrorViewSettings, LoadingViewSettings, ManagerSettings, SuccessViewSettings,
};
use super::views::{AnyView, ErrorView, ProgressView, SuccessView};
use crate::action::Action;
use crate::error::LoadError;
use crate::state::SuccessMessage;

/// Supplies the views and settings used to render each loadable state.
///
/// Only [`id`](ViewProvider::id) is required. Every view builder and settings
/// accessor has a default, so a provider overrides just the pieces it needs.
pub trait ViewProvider: Send + Sync + 'static {
    /// Stable identity, preserved through type erasure.
    fn id(&self) -> Uuid;

    fn loading_view(&self) -> AnyView {
        Box::new(ProgressView::new(self.loading_settings()))
    }

    fn error_view(&self, error: &LoadError, on_retry: Option<Action>, on_close: Action) -> AnyView {
        Box::new(ErrorView::new(
            self.error_settings(),
            error.clone(),
            on_retry,
            on_close,
        ))
    }

    fn success_view(&self, message: &SuccessMessage) -> AnyView {
        Box::new(SuccessView::new(
            self.success_settings(),
            Some(message.clone()),
        ))
    }

    fn manager_settings(&self) -> ManagerSettings {
        ManagerSettings::default()
    }

    fn loading_settings(&self) -> LoadingViewSettings {
        LoadingViewSettings::default()
    }

    fn error_settings(&self) -> ErrorViewSettings {
        ErrorViewSettings::default()
    }

    fn success_settings(&self) -> SuccessViewSettings {
        SuccessViewSettings::default()
    }

    fn erase(self) -> AnyProvider
    where
        Self: Sized,
    {
        AnyProvider::new(self)
    }
}
