//! Sequential survey of a fixed list of public marketing pages.
//!
//! Each allowed path is opened in a headless browser, its title, description,
//! headings and main text are extracted, a full-page screenshot is saved, and
//! the collected [`PageResult`]s are written to one JSON file at the end.

pub mod config;
pub mod crawlers;
pub mod error;
pub mod filter;
pub mod parsers;
pub mod pipeline;
pub mod results;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::{BrowserKind, ScrapeConfig};
pub use error::{Result, ScrapeError};
pub use pipeline::Pipeline;
pub use results::{PageResult, PathOutcome, RunOutput};
