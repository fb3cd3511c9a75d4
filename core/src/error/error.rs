use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot determine home directory")]
    NoHomeDir,
    #[error("read config {path} failed: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("parse config {path} failed: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("serialize config failed: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}
