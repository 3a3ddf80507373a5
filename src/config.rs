use crate::error::{Result, ScrapeError};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Browser the WebDriver server should drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserKind {
    /// Headless Firefox through geckodriver
    #[default]
    Firefox,
    /// Headless Chrome through chromedriver
    Chrome,
}

impl BrowserKind {
    /// Conventional local endpoint of this browser's driver
    pub fn default_driver_url(&self) -> &'static str {
        match self {
            BrowserKind::Firefox => "http://localhost:4444",
            BrowserKind::Chrome => "http://localhost:9515",
        }
    }
}

/// Immutable description of one scraping run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Origin every path is resolved against
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Identifying user agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Paths to visit, in order
    #[serde(default = "default_pages")]
    pub pages: Vec<String>,

    /// Path prefixes that must never be fetched
    #[serde(default = "default_disallowed_prefixes")]
    pub disallowed_prefixes: Vec<String>,

    /// Pause before every page slot except the first
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// Extra wait after navigation for late-loading content
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Upper bound on a single navigation
    #[serde(default = "default_navigation_timeout_ms")]
    pub navigation_timeout_ms: u64,

    /// Directory receiving screenshots and the results file
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    #[serde(default)]
    pub browser: BrowserKind,
}

/// Name of the aggregated results file inside the output directory
pub const RESULTS_FILE_NAME: &str = "scrape_results.json";

fn default_base_url() -> String {
    "https://www.bokio.se".to_string()
}

fn default_user_agent() -> String {
    "ForkiooResearch/0.1 (Educational competitive research; contact: research@forkioo.dev)"
        .to_string()
}

fn default_pages() -> Vec<String> {
    ["/", "/priser", "/funktioner", "/om-bokio", "/support"]
        .iter()
        .map(|p| p.to_string())
        .collect()
}

/// Snapshot of the site's robots.txt disallow rules
fn default_disallowed_prefixes() -> Vec<String> {
    ["/bin/", "/config/", "/umbraco/", "/views/", "/sbf-back-office/"]
        .iter()
        .map(|p| p.to_string())
        .collect()
}

fn default_request_delay_ms() -> u64 {
    3_000
}

fn default_settle_delay_ms() -> u64 {
    2_000
}

fn default_navigation_timeout_ms() -> u64 {
    30_000
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("research/output")
}

fn default_webdriver_url() -> String {
    BrowserKind::default().default_driver_url().to_string()
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            pages: default_pages(),
            disallowed_prefixes: default_disallowed_prefixes(),
            request_delay_ms: default_request_delay_ms(),
            settle_delay_ms: default_settle_delay_ms(),
            navigation_timeout_ms: default_navigation_timeout_ms(),
            output_dir: default_output_dir(),
            webdriver_url: default_webdriver_url(),
            browser: BrowserKind::default(),
        }
    }
}

impl ScrapeConfig {
    /// Load configuration from a JSON file; missing fields take the defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|e| {
            ScrapeError::Config(format!("cannot open {}: {}", path.display(), e))
        })?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ScrapeError::Config(e.to_string()))
    }

    /// Override the WebDriver endpoint with `WEBDRIVER_URL` if it is set
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                self.webdriver_url = webdriver_url;
            }
        }
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_webdriver_url(mut self, webdriver_url: impl Into<String>) -> Self {
        self.webdriver_url = webdriver_url.into();
        self
    }

    /// Switch browsers, moving the endpoint along if it was the old default
    pub fn with_browser(mut self, browser: BrowserKind) -> Self {
        if self.webdriver_url == self.browser.default_driver_url() {
            self.webdriver_url = browser.default_driver_url().to_string();
        }
        self.browser = browser;
        self
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }

    /// Full path of the JSON results file
    pub fn results_file(&self) -> PathBuf {
        self.output_dir.join(RESULTS_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_snapshot() {
        let config = ScrapeConfig::default();

        assert_eq!(config.base_url, "https://www.bokio.se");
        assert_eq!(
            config.pages,
            vec!["/", "/priser", "/funktioner", "/om-bokio", "/support"]
        );
        assert_eq!(config.disallowed_prefixes.len(), 5);
        assert!(config.user_agent.contains("contact: research@forkioo.dev"));
        assert_eq!(config.request_delay(), Duration::from_secs(3));
        assert_eq!(config.settle_delay(), Duration::from_secs(2));
        assert_eq!(config.navigation_timeout(), Duration::from_secs(30));
        assert_eq!(
            config.results_file(),
            PathBuf::from("research/output/scrape_results.json")
        );
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = ScrapeConfig::from_json(
            r#"{"pages": ["/a", "/b"], "request_delay_ms": 10, "browser": "chrome"}"#,
        )
        .unwrap();

        assert_eq!(config.pages, vec!["/a", "/b"]);
        assert_eq!(config.request_delay(), Duration::from_millis(10));
        assert_eq!(config.browser, BrowserKind::Chrome);
        assert_eq!(config.base_url, "https://www.bokio.se");
        assert_eq!(config.navigation_timeout_ms, 30_000);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let err = ScrapeConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ScrapeError::Config(_)));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("survey.json");
        std::fs::write(&path, r#"{"output_dir": "/tmp/elsewhere"}"#).unwrap();

        let config = ScrapeConfig::from_file(&path).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("/tmp/elsewhere"));

        let missing = ScrapeConfig::from_file(dir.path().join("missing.json"));
        assert!(matches!(missing, Err(ScrapeError::Config(_))));
    }

    #[test]
    fn test_with_browser_moves_default_endpoint() {
        let config = ScrapeConfig::default().with_browser(BrowserKind::Chrome);
        assert_eq!(config.webdriver_url, "http://localhost:9515");

        let custom = ScrapeConfig::default()
            .with_webdriver_url("http://grid:4444")
            .with_browser(BrowserKind::Chrome);
        assert_eq!(custom.webdriver_url, "http://grid:4444");
    }
}
