//! View provider capability and its type-erased form.
//!
//! - [`ViewProvider`]: maps each state to a view plus a settings bundle
//! - [`AnyProvider`]: erased provider stored in state variants
//! - [`views`]: the built-in progress / error / success views

mod any;
mod default;
pub mod settings;
mod traits;
pub mod views;

pub use any::AnyProvider;
pub use default::DefaultProvider;
pub use settings::{
    ActionButtonSettings, ErrorViewSettings, LoadingViewSettings, ManagerSettings,
    ProviderSettings, SuccessViewSettings, DEFAULT_AUTO_HIDE_DELAY,
};
pub use traits::ViewProvider;
pub use views::{AnyView, Control, ErrorView, OverlayView, ProgressView, SuccessView, ViewKind};
