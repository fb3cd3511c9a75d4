//! Providers that render overlays as terminal lines.
//!
//! Both wrap the core default views: controls and their actions come from the
//! core view, only the rendered text differs.

mod jsonl;
mod text;

pub use jsonl::JsonlViewProvider;
pub use text::TextViewProvider;

use unloader_core::provider::{AnyView, Control, OverlayView, ViewKind};

/// A core view with replacement output.
pub(crate) struct RenderedView {
    inner: AnyView,
    output: String,
}

impl RenderedView {
    pub(crate) fn new(inner: AnyView, output: String) -> AnyView {
        Box::new(Self { inner, output })
    }
}

impl OverlayView for RenderedView {
    fn kind(&self) -> ViewKind {
        self.inner.kind()
    }

    fn render(&self) -> String {
        self.output.clone()
    }

    fn controls(&self) -> Vec<Control> {
        self.inner.controls()
    }

    fn trigger(&self, control: Control) -> bool {
        self.inner.trigger(control)
    }
}
