pub mod factory;
pub mod providers;

pub use factory::{build_provider, PluginProviderFactory};
