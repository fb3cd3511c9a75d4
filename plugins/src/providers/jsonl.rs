use chrono::Local;
use serde_json::{json, Value};
use unloader_core::action::Action;
use unloader_core::error::LoadError;
use unloader_core::provider::{
    AnyView, ErrorView, ErrorViewSettings, LoadingViewSettings, ManagerSettings, ProgressView,
    ProviderSettings, SuccessView, SuccessViewSettings, ViewProvider,
};
use unloader_core::state::SuccessMessage;
use uuid::Uuid;

use super::RenderedView;

/// Renders each state as a JSON object, one per line.
pub struct JsonlViewProvider {
    id: Uuid,
    pretty_print: bool,
    settings: ProviderSettings,
}

impl JsonlViewProvider {
    pub fn new(settings: ProviderSettings, pretty_print: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            pretty_print,
            settings,
        }
    }

    fn envelope(&self, event_type: &str, metadata: Value) -> Value {
        json!({
            "v": 1,
            "event_type": event_type,
            "ts": Local::now().to_rfc3339(),
            "provider_id": self.id.to_string(),
            "metadata": metadata,
        })
    }

    fn encode(&self, value: &Value) -> String {
        let encoded = if self.pretty_print {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        encoded.unwrap_or_else(|err| {
            tracing::warn!(error = %err, "failed to encode overlay event");
            "{}".into()
        })
    }
}

impl ViewProvider for JsonlViewProvider {
    fn id(&self) -> Uuid {
        self.id
    }

    fn loading_view(&self) -> AnyView {
        let value = self.envelope(
            "overlay.loading",
            json!({ "text": self.settings.loading.text }),
        );
        let inner = Box::new(ProgressView::new(self.loading_settings()));
        RenderedView::new(inner, self.encode(&value))
    }

    fn error_view(&self, error: &LoadError, on_retry: Option<Action>, on_close: Action) -> AnyView {
        let inner: AnyView = Box::new(ErrorView::new(
            self.error_settings(),
            error.clone(),
            on_retry,
            on_close,
        ));
        let value = self.envelope(
            "overlay.failure",
            json!({
                "headline": self.settings.error.error_text,
                "error": error.description(),
                "controls": inner.controls(),
            }),
        );
        RenderedView::new(inner, self.encode(&value))
    }

    fn success_view(&self, message: &SuccessMessage) -> AnyView {
        let value = self.envelope(
            "overlay.success",
            json!({ "message": message.description() }),
        );
        let inner = Box::new(SuccessView::new(
            self.success_settings(),
            Some(message.clone()),
        ));
        RenderedView::new(inner, self.encode(&value))
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
}
