use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TeamAdminError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    #[error("Team not found: {0}")]
    TeamNotFound(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("No team at row {0}")]
    UnknownRow(usize),
}

impl TeamAdminError {
    /// True for failures that never produced an HTTP status (network or parse errors).
    pub fn is_transport(&self) -> bool {
        matches!(self, TeamAdminError::Http(_) | TeamAdminError::Decode(_))
    }
}

pub type Result<T> = std::result::Result<T, TeamAdminError>;
