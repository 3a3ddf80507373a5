use crate::config::ScrapeConfig;
use crate::crawlers::{Session, WebDriverSession};
use crate::error::{Result, ScrapeError};
use crate::filter::DisallowPolicy;
use crate::parsers::html;
use crate::results::{Headings, PageResult, PathOutcome, RunOutput};
use crate::utils::screenshot_file_name;
use chrono::Local;
use std::path::PathBuf;
use tokio::time::{sleep, timeout};
use url::Url;

/// Sequential fetch pipeline over the configured page list
pub struct Pipeline {
    config: ScrapeConfig,
    policy: DisallowPolicy,
}

impl Pipeline {
    /// Build a pipeline, validating the base URL up front
    pub fn new(config: ScrapeConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ScrapeError::Config(format!(
                "base URL {} cannot carry paths",
                config.base_url
            )));
        }

        let policy = DisallowPolicy::new(config.disallowed_prefixes.iter().cloned());
        Ok(Self { config, policy })
    }

    pub fn config(&self) -> &ScrapeConfig {
        &self.config
    }

    /// Whether `path` may be fetched at all
    pub fn is_allowed(&self, path: &str) -> bool {
        self.policy.is_allowed(path)
    }

    /// Absolute URL of a configured path
    pub fn page_url(&self, path: &str) -> Result<Url> {
        let base = self.config.base_url.trim_end_matches('/');
        Ok(Url::parse(&format!("{}{}", base, path))?)
    }

    /// Run against a real browser through the configured WebDriver server
    pub async fn run(&self) -> Result<RunOutput> {
        self.prepare_output_dir().await?;
        let session = WebDriverSession::connect(&self.config).await?;
        self.drive(session).await
    }

    /// Run against an already opened session, closing it when done
    pub async fn run_with_session<S: Session>(&self, session: S) -> Result<RunOutput> {
        if let Err(e) = self.prepare_output_dir().await {
            if let Err(close_err) = session.close().await {
                ::log::warn!("Failed to close session: {}", close_err);
            }
            return Err(e);
        }
        self.drive(session).await
    }

    /// Fetch one page; failures are logged and yield `None`
    pub async fn fetch_page<S: Session>(&self, session: &mut S, path: &str) -> Option<PageResult> {
        self.fetch_with_outcome(session, path).await.1
    }

    async fn prepare_output_dir(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.config.output_dir).await?;
        ::log::debug!("Output directory ready: {}", self.config.output_dir.display());
        Ok(())
    }

    async fn drive<S: Session>(&self, mut session: S) -> Result<RunOutput> {
        let delay = self.config.request_delay();
        let mut pages = Vec::new();
        let mut outcomes = Vec::with_capacity(self.config.pages.len());

        ::log::info!("Starting scraping of {} pages", self.config.pages.len());

        for (i, path) in self.config.pages.iter().enumerate() {
            // Every slot after the first waits, including disallowed ones
            if i > 0 {
                ::log::info!("Waiting {:?} (rate limiting)...", delay);
                sleep(delay).await;
            }

            let (outcome, result) = self.fetch_with_outcome(&mut session, path).await;
            outcomes.push((path.clone(), outcome));
            if let Some(page) = result {
                pages.push(page);
            }
        }

        session.close().await?;

        let output_file = self.write_results(&pages).await?;
        ::log::info!(
            "Scraping complete: {} of {} pages scraped, data saved to {}",
            pages.len(),
            outcomes.len(),
            output_file.display()
        );

        Ok(RunOutput {
            pages,
            outcomes,
            output_file,
        })
    }

    async fn fetch_with_outcome<S: Session>(
        &self,
        session: &mut S,
        path: &str,
    ) -> (PathOutcome, Option<PageResult>) {
        if !self.is_allowed(path) {
            return (PathOutcome::Disallowed, None);
        }

        match self.scrape_page(session, path).await {
            Ok(page) => {
                ::log::info!(
                    "Scraped: {} (title: {:?}, screenshot: {})",
                    path,
                    page.title,
                    page.screenshot.display()
                );
                (PathOutcome::Succeeded, Some(page))
            }
            Err(e) => {
                ::log::error!("Error scraping {}: {}", path, e);
                (PathOutcome::Failed, None)
            }
        }
    }

    /// Acquires a tab, scrapes through it and always hands it back
    async fn scrape_page<S: Session>(&self, session: &mut S, path: &str) -> Result<PageResult> {
        let url = self.page_url(path)?;
        ::log::info!("Scraping: {}", url);

        let tab = session.open_tab().await?;
        let result = self.scrape_tab(session, &tab, path, &url).await;

        if let Err(e) = session.close_tab(tab).await {
            ::log::warn!("Failed to close tab for {}: {}", path, e);
        }

        result
    }

    async fn scrape_tab<S: Session>(
        &self,
        session: &mut S,
        tab: &S::Tab,
        path: &str,
        url: &Url,
    ) -> Result<PageResult> {
        let navigation_timeout = self.config.navigation_timeout();
        timeout(navigation_timeout, session.navigate(tab, url))
            .await
            .map_err(|_| ScrapeError::NavigationTimeout(navigation_timeout))??;

        // Lazy-loaded content
        sleep(self.config.settle_delay()).await;

        let capture = session.capture(tab).await?;
        let scraped_at = Local::now();
        let fields = html::extract(&capture.html);

        let screenshot = self.config.output_dir.join(screenshot_file_name(path));
        tokio::fs::write(&screenshot, &capture.screenshot).await?;

        Ok(PageResult {
            url: url.to_string(),
            path: path.to_string(),
            scraped_at,
            title: fields.title,
            meta_description: fields.meta_description,
            headings: Headings {
                h1: fields.h1,
                h2: fields.h2,
            },
            main_text: fields.main_text,
            screenshot,
        })
    }

    /// Writes the results file in one step: temporary sibling, then rename
    async fn write_results(&self, pages: &[PageResult]) -> Result<PathBuf> {
        let output_file = self.config.results_file();
        let staging_file = output_file.with_extension("json.tmp");

        let json = serde_json::to_string_pretty(pages)?;
        tokio::fs::write(&staging_file, json.as_bytes()).await?;
        tokio::fs::rename(&staging_file, &output_file).await?;

        Ok(output_file)
    }
}
