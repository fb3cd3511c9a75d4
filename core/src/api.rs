//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `unloader_core::api` instead of reaching into internal modules.

pub use crate::action::{Action, ActionFuture, ActionOutcome};
pub use crate::config::{
    load_default, load_from_path, AppConfig, LoggingConfig, ManagerConfig, ProviderConfig,
    ProviderKind, ViewsConfig,
};
pub use crate::context::{default_provider, AppContext, ProviderFactory};
pub use crate::error::{AppError, ConfigError, LoadError, NetworkError, ResourceError};
pub use crate::overlay::{overlay_for, OverlayHost, OverlaySource};
pub use crate::provider::{
    AnyProvider, AnyView, Control, DefaultProvider, ErrorView, ErrorViewSettings,
    LoadingViewSettings, ManagerSettings, OverlayView, ProgressView, ProviderSettings,
    SuccessView, SuccessViewSettings, ViewKind, ViewProvider,
};
pub use crate::state::{
    subscribe_to_global, unsubscribe_from_global, GlobalLoadingManager, LoadableState,
    LoadingManager, LocalScope, StateKind, StateSnapshot, Subscription, SuccessMessage,
};
