#[allow(clippy::module_inception)]
pub mod error;
pub mod load;

pub use error::ConfigError;
pub use load::{AppError, LoadError, NetworkError, ResourceError};
