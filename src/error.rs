use crate::config::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResetError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Reset API error: {0}")]
    Api(#[from] ApiError),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Failures of the reset call itself. These are reported to the user and
/// never abort the process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// HTTP status code, when the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the server rejected the bearer token
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}
