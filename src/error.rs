use std::time::Duration;
use thiserror::Error;

/// Result type alias used across the crate
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Errors raised while setting up a run or scraping a single page
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The WebDriver server refused or failed to create a session
    #[error("failed to start WebDriver session at {url}: {source}")]
    SessionStart {
        url: String,
        #[source]
        source: fantoccini::error::NewSessionError,
    },

    /// A WebDriver command failed
    #[error("WebDriver command failed: {0}")]
    WebDriver(#[from] fantoccini::error::CmdError),

    /// Navigation did not settle within the configured timeout
    #[error("navigation timed out after {0:?}")]
    NavigationTimeout(Duration),

    /// The base URL or a path could not be turned into a URL
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The browser returned something we could not use
    #[error("unexpected browser response: {0}")]
    Browser(String),

    /// Configuration could not be loaded
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
