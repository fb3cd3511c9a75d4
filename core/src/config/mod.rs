mod load;
mod types;

pub use load::{
    apply_overrides, get_unloader_data_dir, load_default, load_from_path, ENV_AUTO_HIDE_MS,
    ENV_LOG_LEVEL, ENV_PROVIDER,
};
pub use types::{
    AppConfig, LoggingConfig, ManagerConfig, ProviderConfig, ProviderKind, ViewsConfig,
};
