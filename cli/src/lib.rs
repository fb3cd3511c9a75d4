//! unloader-cli library: commands exposed for unit tests.

pub mod commands;
pub mod error;
pub mod logging;
