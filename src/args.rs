use clap::{Parser, ValueEnum};
use site_survey::{BrowserKind, ScrapeConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "site-survey")]
#[command(about = "Captures public marketing pages of one site into JSON and screenshots")]
#[command(version)]
pub struct Args {
    /// JSON configuration file (defaults to the built-in page list)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory for screenshots and scrape_results.json
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// WebDriver server URL (overrides WEBDRIVER_URL)
    #[arg(long)]
    pub webdriver_url: Option<String>,

    /// Browser driven by the WebDriver server
    #[arg(short, long, value_enum)]
    pub browser: Option<BrowserArg>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum BrowserArg {
    Firefox,
    Chrome,
}

impl From<BrowserArg> for BrowserKind {
    fn from(arg: BrowserArg) -> Self {
        match arg {
            BrowserArg::Firefox => BrowserKind::Firefox,
            BrowserArg::Chrome => BrowserKind::Chrome,
        }
    }
}

impl Args {
    /// Build the run configuration: file or defaults, then env, then flags
    pub fn into_config(self) -> site_survey::Result<ScrapeConfig> {
        let mut config = match &self.config {
            Some(path) => ScrapeConfig::from_file(path)?,
            None => ScrapeConfig::default(),
        };

        if let Some(browser) = self.browser {
            config = config.with_browser(browser.into());
        }
        config = config.with_env_overrides();
        if let Some(url) = self.webdriver_url {
            config = config.with_webdriver_url(url);
        }
        if let Some(dir) = self.output_dir {
            config = config.with_output_dir(dir);
        }

        Ok(config)
    }
}
