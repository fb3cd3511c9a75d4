use unloader_core::config::{AppConfig, ProviderKind};
use unloader_core::context::ProviderFactory;
use unloader_core::provider::{AnyProvider, ProviderSettings, ViewProvider};

use crate::providers::{JsonlViewProvider, TextViewProvider};

pub fn build_settings(cfg: &AppConfig) -> ProviderSettings {
    ProviderSettings {
        manager: cfg.manager.settings(),
        loading: cfg.views.loading_settings(),
        error: cfg.views.error_settings(),
        success: cfg.views.success_settings(),
    }
}

pub fn build_provider(cfg: &AppConfig) -> AnyProvider {
    let settings = build_settings(cfg);
    tracing::debug!(kind = %cfg.provider.kind, "building view provider");
    match cfg.provider.kind {
        ProviderKind::Text => TextViewProvider::new(settings, cfg.provider.ascii_only).erase(),
        ProviderKind::Jsonl => JsonlViewProvider::new(settings, false).erase(),
    }
}

/// [`ProviderFactory`] backed by this crate's providers.
#[derive(Debug, Default, Clone, Copy)]
pub struct PluginProviderFactory;

impl ProviderFactory for PluginProviderFactory {
    fn build_provider(&self, cfg: &AppConfig) -> AnyProvider {
        build_provider(cfg)
    }
}
