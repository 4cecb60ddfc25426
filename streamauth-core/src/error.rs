use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Configuration validation failed with {} error(s): {}", .0.len(), .0.join("; "))]
    InvalidConfig(Vec<String>),

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;
