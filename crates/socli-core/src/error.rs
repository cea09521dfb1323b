use thiserror::Error;

/// Top-level error type for configuration and other non-graph concerns.
#[derive(Error, Debug)]
pub enum SocliError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Failed to encode configuration: {0}")]
    ConfigEncode(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
