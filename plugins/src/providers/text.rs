use unloader_core::action::Action;
use unloader_core::error::LoadError;
use unloader_core::provider::{
    AnyView, Control, ErrorView, ErrorViewSettings, LoadingViewSettings, ManagerSettings,
    ProgressView, ProviderSettings, SuccessView, SuccessViewSettings, ViewProvider,
};
use unloader_core::state::SuccessMessage;
use uuid::Uuid;

use super::RenderedView;

/// Renders each state as one status line.
pub struct TextViewProvider {
    id: Uuid,
    ascii_only: bool,
    settings: ProviderSettings,
}

impl TextViewProvider {
    pub fn new(settings: ProviderSettings, ascii_only: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            ascii_only,
            settings,
        }
    }

    fn clean(&self, text: &str) -> String {
        if self.ascii_only {
            text.chars()
                .map(|c| if c.is_ascii() { c } else { '?' })
                .collect()
        } else {
            text.to_string()
        }
    }

    fn format_loading(&self) -> String {
        match &self.settings.loading.text {
            Some(text) => format!("LOADING {}", self.clean(text)),
            None => "LOADING".to_string(),
        }
    }

    fn format_success(&self, message: &SuccessMessage) -> String {
        let status = if self.ascii_only { "OK" } else { "SUCCESS" };
        format!("{} {}", status, self.clean(&message.description()))
    }

    fn format_failure(&self, error: &LoadError, controls: &[Control]) -> String {
        let status = if self.ascii_only { "FAIL" } else { "FAILED" };
        let mut line = status.to_string();
        if let Some(headline) = &self.settings.error.error_text {
            line.push_str(&format!(" {}", self.clean(headline)));
        }
        line.push_str(&format!(": {}", self.clean(&error.description())));
        for control in controls {
            let label = match control {
                Control::Close => &self.settings.error.close_button.text,
                Control::Retry => &self.settings.error.retry_button.text,
            };
            line.push_str(&format!(" [{}]", self.clean(label)));
        }
        line
    }
}

impl ViewProvider for TextViewProvider {
    fn id(&self) -> Uuid {
        self.id
    }

    fn loading_view(&self) -> AnyView {
        let inner = Box::new(ProgressView::new(self.loading_settings()));
        RenderedView::new(inner, self.format_loading())
    }

    fn error_view(&self, error: &LoadError, on_retry: Option<Action>, on_close: Action) -> AnyView {
        let inner: AnyView = Box::new(ErrorView::new(
            self.error_settings(),
            error.clone(),
            on_retry,
            on_close,
        ));
        let output = self.format_failure(error, &inner.controls());
        RenderedView::new(inner, output)
    }

    fn success_view(&self, message: &SuccessMessage) -> AnyView {
        let inner = Box::new(SuccessView::new(
            self.success_settings(),
            Some(message.clone()),
        ));
        RenderedView::new(inner, self.format_success(message))
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

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use unloader_core::provider::ViewKind;

    #[test]
    fn failure_line_lists_controls() {
        let provider = TextViewProvider::new(ProviderSettings::default(), false);
        let view = provider.error_view(
            &LoadError::msg("no route"),
            Some(Action::simple(|| {})),
            Action::simple(|| {}),
        );
        assert_eq!(view.kind(), ViewKind::Error);
        assert_eq!(
            view.render(),
            "FAILED An error has occured!: no route [Close] [Retry]"
        );
        assert_eq!(view.controls(), vec![Control::Close, Control::Retry]);
    }

    #[test]
    fn ascii_only_replaces_symbols() {
        let provider = TextViewProvider::new(ProviderSettings::default(), true);
        let view = provider.success_view(&SuccessMessage::new("saved ✓"));
        assert_eq!(view.render(), "OK saved ?");
    }

    #[test]
    fn loading_line_uses_settings() {
        let mut settings = ProviderSettings::default();
        settings.loading.text = None;
        let provider = TextViewProvider::new(settings, false);
        assert_eq!(provider.loading_view().render(), "LOADING");
    }
}
