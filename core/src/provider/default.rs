use uuid::Uuid;

use super::settings::{
    ErrorViewSettings, LoadingViewSettings, ManagerSettings, SuccessViewSettings,
};
use super::traits::ViewProvider;

/// Provider using the built-in views, with optional settings overrides.
#[derive(Debug, Clone)]
pub struct DefaultProvider {
    id: Uuid,
    manager: ManagerSettings,
    loading: LoadingViewSettings,
    error: ErrorViewSettings,
    success: SuccessViewSettings,
}

impl DefaultProvider {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            manager: ManagerSettings::default(),
            loading: LoadingViewSettings::default(),
            error: ErrorViewSettings::default(),
            success: SuccessViewSettings::default(),
        }
    }

    pub fn with_manager_settings(mut self, settings: ManagerSettings) -> Self {
        self.manager = settings;
        self
    }

    pub fn with_loading_settings(mut self, settings: LoadingViewSettings) -> Self {
        self.loading = settings;
        self
    }

    pub fn with_error_settings(mut self, settings: ErrorViewSettings) -> Self {
        self.error = settings;
        self
    }

    pub fn with_success_settings(mut self, settings: SuccessViewSettings) -> Self {
        self.success = settings;
        self
    }
}

impl Default for DefaultProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewProvider for DefaultProvider {
    fn id(&self) -> Uuid {
        self.id
    }

    fn manager_settings(&self) -> ManagerSettings {
        self.manager
    }

    fn loading_settings(&self) -> LoadingViewSettings {
        self.loading.clone()
    }

    fn error_settings(&self) -> ErrorViewSettings {
        self.error.clone()
    }

    fn success_settings(&self) -> SuccessViewSettings {
        self.success.clone()
    }
}
