//! Default overlay views.
//!
//! Views are plain values: they render to text and expose the controls a
//! host can trigger. Toolkit-specific hosts map them onto real widgets.

use std::fmt;

use serde::Serialize;

use super::settings::{ErrorViewSettings, LoadingViewSettings, SuccessViewSettings};
use crate::action::Action;
use crate::error::LoadError;
use crate::state::SuccessMessage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    Progress,
    Error,
    Success,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    Close,
    Retry,
}

/// Something a host can draw for a non-idle state.
pub trait OverlayView: Send + Sync {
    fn kind(&self) -> ViewKind;

    fn render(&self) -> String;

    fn controls(&self) -> Vec<Control> {
        Vec::new()
    }

    /// Runs the action bound to `control`.
    ///
    /// Returns `false` when the view does not offer that control.
    fn trigger(&self, _control: Control) -> bool {
        false
    }
}

pub type AnyView = Box<dyn OverlayView>;

impl fmt::Debug for dyn OverlayView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayView")
            .field("kind", &self.kind())
            .field("controls", &self.controls())
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ProgressView {
    settings: LoadingViewSettings,
}

impl ProgressView {
    pub fn new(settings: LoadingViewSettings) -> Self {
        Self { settings }
    }
}

impl OverlayView for ProgressView {
    fn kind(&self) -> ViewKind {
        ViewKind::Progress
    }

    fn render(&self) -> String {
        match &self.settings.text {
            Some(text) => format!("[~] {text}"),
            None => "[~]".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ErrorView {
    settings: ErrorViewSettings,
    error: LoadError,
    on_retry: Option<Action>,
    on_close: Action,
}

impl ErrorView {
    pub fn new(
        settings: ErrorViewSettings,
        error: LoadError,
        on_retry: Option<Action>,
        on_close: Action,
    ) -> Self {
        Self {
            settings,
            error,
            on_retry,
            on_close,
        }
    }

    pub fn error(&self) -> &LoadError {
        &self.error
    }

    pub fn settings(&self) -> &ErrorViewSettings {
        &self.settings
    }

    pub fn can_retry(&self) -> bool {
        self.on_retry.is_some()
    }
}

impl OverlayView for ErrorView {
    fn kind(&self) -> ViewKind {
        ViewKind::Error
    }

    fn render(&self) -> String {
        let mut lines = Vec::with_capacity(3);
        if let Some(text) = &self.settings.error_text {
            lines.push(format!("[!] {text}"));
        }
        lines.push(self.error.description());

        let mut buttons = format!("[{}]", self.settings.close_button.text);
        if self.on_retry.is_some() {
            buttons.push_str(&format!(" [{}]", self.settings.retry_button.text));
        }
        lines.push(buttons);
        lines.join("\n")
    }

    fn controls(&self) -> Vec<Control> {
        let mut controls = vec![Control::Close];
        if self.on_retry.is_some() {
            controls.push(Control::Retry);
        }
        controls
    }

    fn trigger(&self, control: Control) -> bool {
        match control {
            Control::Close => {
                self.on_close.perform();
                true
            }
            Control::Retry => match &self.on_retry {
                Some(action) => {
                    action.perform();
                    true
                }
                None => false,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct SuccessView {
    settings: SuccessViewSettings,
    message: Option<SuccessMessage>,
}

impl SuccessView {
    pub fn new(settings: SuccessViewSettings, message: Option<SuccessMessage>) -> Self {
        Self { settings, message }
    }

    /// Message description, falling back to the configured text.
    pub fn text(&self) -> Option<String> {
        self.message
            .as_ref()
            .map(SuccessMessage::description)
            .or_else(|| self.settings.text.clone())
    }
}

impl OverlayView for SuccessView {
    fn kind(&self) -> ViewKind {
        ViewKind::Success
    }

    fn render(&self) -> String {
        match self.text() {
            Some(text) => format!("[v] {text}"),
            None => "[v]".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn counter_action(hits: &Arc<AtomicU32>) -> Action {
        let hits = hits.clone();
        Action::simple(move || {
            hits.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn error_view_without_retry_only_offers_close() {
        let closes = Arc::new(AtomicU32::new(0));
        let view = ErrorView::new(
            ErrorViewSettings::default(),
            LoadError::msg("timeout"),
            None,
            counter_action(&closes),
        );

        assert_eq!(view.controls(), vec![Control::Close]);
        assert!(!view.trigger(Control::Retry));
        assert!(view.trigger(Control::Close));
        assert_eq!(closes.load(Ordering::SeqCst), 1);
        assert_eq!(view.render(), "[!] An error has occured!\ntimeout\n[Close]");
    }

    #[test]
    fn error_view_with_retry_runs_retry_action() {
        let retries = Arc::new(AtomicU32::new(0));
        let view = ErrorView::new(
            ErrorViewSettings::default(),
            LoadError::msg("timeout"),
            Some(counter_action(&retries)),
            Action::simple(|| {}),
        );

        assert_eq!(view.controls(), vec![Control::Close, Control::Retry]);
        assert!(view.trigger(Control::Retry));
        assert_eq!(retries.load(Ordering::SeqCst), 1);
        assert!(view.render().ends_with("[Close] [Retry]"));
    }

    #[test]
    fn success_view_prefers_message_over_settings() {
        let with_message = SuccessView::new(
            SuccessViewSettings::default(),
            Some(SuccessMessage::new("Saved 3 files")),
        );
        assert_eq!(with_message.render(), "[v] Saved 3 files");

        let fallback = SuccessView::new(SuccessViewSettings::default(), None);
        assert_eq!(fallback.render(), "[v] Success!");

        let bare = SuccessView::new(SuccessViewSettings { text: None }, None);
        assert_eq!(bare.render(), "[v]");
    }

    #[test]
    fn progress_view_uses_settings_text() {
        assert_eq!(
            ProgressView::new(LoadingViewSettings::default()).render(),
            "[~] Loading..."
        );
        assert_eq!(ProgressView::new(LoadingViewSettings { text: None }).render(), "[~]");
    }
}
