use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use uuid::Uuid;

use super::settings::{
    ErrorViewSettings, LoadingViewSettings, ManagerSettings, ProviderSettings,
    SuccessViewSettings,
};
use super::traits::ViewProvider;
use super::views::AnyView;
use crate::action::Action;
use crate::error::LoadError;
use crate::state::SuccessMessage;

/// Type-erased provider stored inside [`LoadableState`](crate::state::LoadableState).
///
/// Settings are captured when the provider is erased; view construction is
/// forwarded to the original provider. Equality and hashing use the original
/// provider's id.
#[derive(Clone)]
pub struct AnyProvider {
    id: Uuid,
    inner: Arc<dyn ViewProvider>,
    settings: Arc<ProviderSettings>,
}

impl AnyProvider {
    pub fn new<P: ViewProvider>(provider: P) -> Self {
        let settings = ProviderSettings {
            manager: provider.manager_settings(),
            loading: provider.loading_settings(),
            error: provider.error_settings(),
            success: provider.success_settings(),
        };
        Self {
            id: provider.id(),
            inner: Arc::new(provider),
            settings: Arc::new(settings),
        }
    }

    pub fn settings(&self) -> &ProviderSettings {
        &self.settings
    }
}

impl ViewProvider for AnyProvider {
    fn id(&self) -> Uuid {
        self.id
    }

    fn loading_view(&self) -> AnyView {
        self.inner.loading_view()
    }

    fn error_view(&self, error: &LoadError, on_retry: Option<Action>, on_close: Action) -> AnyView {
        self.inner.error_view(error, on_retry, on_close)
    }

    fn success_view(&self, message: &SuccessMessage) -> AnyView {
        self.inner.success_view(message)
    }

    fn manager_settings(&self) -> ManagerSettings {
        self.settings.manager
    }

    fn loading_settings(&self) -> LoadingViewSettings {
        self.settings.loading.clone()
    }

    fn error_settings(&self) -> ErrorViewSettings {
        self.settings.error.clone()
    }

    fn success_settings(&self) -> SuccessViewSettings {
        self.settings.success.clone()
    }

    fn erase(self) -> AnyProvider {
        self
    }
}

impl PartialEq for AnyProvider {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for AnyProvider {}

impl Hash for AnyProvider {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for AnyProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyProvider").field("id", &self.id).finish()
    }
}
