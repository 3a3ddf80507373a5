use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// H1 and H2 texts of a page, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headings {
    pub h1: Vec<String>,
    pub h2: Vec<String>,
}

/// Data captured from one successfully fetched page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResult {
    /// Absolute URL of the page
    pub url: String,

    /// Path as configured
    pub path: String,

    /// When the page was captured
    pub scraped_at: DateTime<Local>,

    /// Document title, empty if the page has none
    pub title: String,

    pub meta_description: Option<String>,

    pub headings: Headings,

    /// Text of the main content container, at most 2000 characters
    pub main_text: Option<String>,

    /// Where the full-page screenshot was saved
    pub screenshot: PathBuf,
}

/// Terminal state of one configured path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathOutcome {
    /// Rejected by the disallow policy without any navigation
    Disallowed,
    Succeeded,
    Failed,
}

/// Everything a completed run produced
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Successful pages in configured order
    pub pages: Vec<PageResult>,

    /// One entry per configured path, in order
    pub outcomes: Vec<(String, PathOutcome)>,

    /// Location of the written JSON file
    pub output_file: PathBuf,
}

impl RunOutput {
    pub fn count(&self, outcome: PathOutcome) -> usize {
        self.outcomes.iter().filter(|(_, o)| *o == outcome).count()
    }
}
