use std::fmt;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::provider::{AnyProvider, DefaultProvider, ViewProvider};
use crate::state::{GlobalLoadingManager, LocalScope};

/// Builds the provider used by scopes created from an [`AppContext`].
pub trait ProviderFactory: Send + Sync {
    fn build_provider(&self, cfg: &AppConfig) -> AnyProvider;
}

/// Root of an application: configuration plus the one global manager that
/// every scope created here feeds.
#[derive(Clone)]
pub struct AppContext {
    cfg: AppConfig,
    global: GlobalLoadingManager,
    provider_factory: Option<Arc<dyn ProviderFactory>>,
}

impl AppContext {
    pub fn new(cfg: AppConfig, provider_factory: Option<Arc<dyn ProviderFactory>>) -> Self {
        Self {
            cfg,
            global: GlobalLoadingManager::new(),
            provider_factory,
        }
    }

    pub fn cfg(&self) -> &AppConfig {
        &self.cfg
    }

    pub fn global(&self) -> &GlobalLoadingManager {
        &self.global
    }

    /// Same global manager, different configuration.
    pub fn with_config(&self, cfg: AppConfig) -> Self {
        Self {
            cfg,
            global: self.global.clone(),
            provider_factory: self.provider_factory.clone(),
        }
    }

    /// Provider from the factory, or a [`DefaultProvider`] configured from
    /// `cfg.views` and `cfg.manager` when there is none.
    pub fn build_provider(&self) -> AnyProvider {
        match self.provider_factory.as_ref() {
            Some(factory) => factory.build_provider(&self.cfg),
            None => default_provider(&self.cfg).erase(),
        }
    }

    /// A new scope wired to this context's global manager. Not yet appeared.
    pub fn scope(&self) -> LocalScope {
        LocalScope::new(self.build_provider(), Some(self.global.clone()))
    }
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext")
            .field("cfg", &self.cfg)
            .field("global", &self.global)
            .field("has_provider_factory", &self.provider_factory.is_some())
            .finish()
    }
}

pub fn default_provider(cfg: &AppConfig) -> DefaultProvider {
    DefaultProvider::new()
        .with_manager_settings(cfg.manager.settings())
        .with_loading_settings(cfg.views.loading_settings())
        .with_error_settings(cfg.views.error_settings())
        .with_success_settings(cfg.views.success_settings())
}
