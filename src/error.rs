//! Error types for authjar

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Token is missing claim '{0}'")]
    MissingClaim(String),

    #[error("{0}")]
    Network(String),

    #[error("Authentication rejected: response did not contain a token")]
    AuthenticationRejected,

    #[error("Role '{0}' contains ',' and cannot be stored")]
    InvalidRole(String),

    #[error("Cookie store error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config file not found. Run 'authjar init' first.")]
    ConfigNotFound,

    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
