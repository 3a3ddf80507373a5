use crate::config::{BrowserKind, ScrapeConfig};
use crate::crawlers::session::{PageCapture, Session};
use crate::error::{Result, ScrapeError};
use fantoccini::wd::WindowHandle;
use fantoccini::{Client, ClientBuilder};
use serde_json::{Map, Value, json};
use std::time::Duration;
use url::Url;

/// How often the page is polled while waiting for the network to go quiet
const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Consecutive unchanged polls needed before the network counts as idle
const IDLE_STABLE_POLLS: usize = 2;

/// Browsers reject absurd window sizes; very long pages get clipped here
const MAX_WINDOW_DIMENSION: u64 = 16_384;

/// Resource-timing entries kept per page; browsers default to 250, after
/// which the count stops growing and a busy page would look idle
const RESOURCE_TIMING_BUFFER_SIZE: u32 = 10_000;

const NETWORK_STATE_SCRIPT: &str = "performance.setResourceTimingBufferSize(arguments[0]); \
    return { \
        ready: document.readyState === 'complete', \
        resources: performance.getEntriesByType('resource').length \
    };";

const DOCUMENT_SIZE_SCRIPT: &str = "const d = document.documentElement; \
    const b = document.body || d; \
    return { \
        width: Math.max(d.scrollWidth, b.scrollWidth, d.clientWidth), \
        height: Math.max(d.scrollHeight, b.scrollHeight, d.clientHeight) \
    };";

/// [`Session`] backed by a WebDriver server (geckodriver, chromedriver, ...)
pub struct WebDriverSession {
    client: Client,
    /// Window the session started with; focus returns here after a tab closes
    home: WindowHandle,
}

impl WebDriverSession {
    /// Starts a headless browser session with the configured user agent
    pub async fn connect(config: &ScrapeConfig) -> Result<Self> {
        let capabilities = browser_capabilities(
            config.browser,
            &config.user_agent,
            config.navigation_timeout(),
        );
        let client =
            connect_to_webdriver(&config.webdriver_url, config.browser, capabilities).await?;
        let home = client.window().await?;

        ::log::info!(
            "Started {:?} session through {}",
            config.browser,
            config.webdriver_url
        );

        Ok(Self { client, home })
    }

    /// Polls until the document is complete and no new resources appear
    async fn wait_for_network_idle(&self) -> Result<()> {
        let mut last_count: Option<u64> = None;
        let mut stable_polls = 0;

        loop {
            let state = self
                .client
                .execute(NETWORK_STATE_SCRIPT, vec![json!(RESOURCE_TIMING_BUFFER_SIZE)])
                .await?;
            let ready = state["ready"].as_bool().unwrap_or(false);
            let resources = state["resources"].as_u64();

            if ready && resources.is_some() && resources == last_count {
                stable_polls += 1;
                if stable_polls >= IDLE_STABLE_POLLS {
                    ::log::debug!("Network idle after {:?} resources", resources);
                    return Ok(());
                }
            } else {
                stable_polls = 0;
            }
            last_count = resources;

            tokio::time::sleep(IDLE_POLL_INTERVAL).await;
        }
    }

    /// Takes a screenshot covering the whole document, not only the viewport
    async fn full_page_screenshot(&self) -> Result<Vec<u8>> {
        let size = self.client.execute(DOCUMENT_SIZE_SCRIPT, vec![]).await?;
        let width = window_dimension(&size["width"])?;
        let height = window_dimension(&size["height"])?;

        ::log::debug!("Resizing window to {}x{} for screenshot", width, height);
        self.client.set_window_size(width, height).await?;

        Ok(self.client.screenshot().await?)
    }
}

impl Session for WebDriverSession {
    type Tab = WindowHandle;

    async fn open_tab(&mut self) -> Result<Self::Tab> {
        let response = self.client.new_window(true).await?;
        self.client.switch_to_window(response.handle.clone()).await?;
        Ok(response.handle)
    }

    async fn navigate(&mut self, tab: &Self::Tab, url: &Url) -> Result<()> {
        self.client.switch_to_window(tab.clone()).await?;
        self.client.goto(url.as_str()).await?;
        self.wait_for_network_idle().await
    }

    async fn capture(&mut self, tab: &Self::Tab) -> Result<PageCapture> {
        self.client.switch_to_window(tab.clone()).await?;
        let html = self.client.source().await?;
        let screenshot = self.full_page_screenshot().await?;

        Ok(PageCapture { html, screenshot })
    }

    async fn close_tab(&mut self, tab: Self::Tab) -> Result<()> {
        // close_window acts on the focused window, so never call it unfocused
        if let Err(e) = self.client.switch_to_window(tab.clone()).await {
            ::log::warn!(
                "Tab {:?} could not be focused and stays open until the session ends",
                tab
            );
            return Err(e.into());
        }

        let closed = self.client.close_window().await;
        let refocused = self.client.switch_to_window(self.home.clone()).await;
        if closed.is_err() {
            ::log::warn!("Tab {:?} could not be closed", tab);
        }
        closed?;
        refocused?;
        Ok(())
    }

    async fn close(self) -> Result<()> {
        self.client.close().await?;
        ::log::debug!("WebDriver session closed");
        Ok(())
    }
}

/// Capabilities requesting a headless browser with an overridden user agent.
///
/// The server-side page load timeout matches `page_load` so an abandoned
/// navigation does not hold up the commands queued behind it.
fn browser_capabilities(
    browser: BrowserKind,
    user_agent: &str,
    page_load: Duration,
) -> Map<String, Value> {
    let mut capabilities = match browser {
        BrowserKind::Firefox => json!({
            "moz:firefoxOptions": {
                "args": ["-headless"],
                "prefs": { "general.useragent.override": user_agent }
            }
        }),
        BrowserKind::Chrome => json!({
            "goog:chromeOptions": {
                "args": ["--headless=new", format!("--user-agent={}", user_agent)]
            }
        }),
    };
    capabilities["timeouts"] = json!({ "pageLoad": page_load.as_millis() as u64 });

    match capabilities {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Connects to the WebDriver instance, falling back to the driver's usual port
async fn connect_to_webdriver(
    webdriver_url: &str,
    browser: BrowserKind,
    capabilities: Map<String, Value>,
) -> Result<Client> {
    let mut builder = ClientBuilder::native();
    builder.capabilities(capabilities);

    let first_error = match builder.connect(webdriver_url).await {
        Ok(client) => {
            ::log::debug!("Connected to WebDriver at {}", webdriver_url);
            return Ok(client);
        }
        Err(e) => e,
    };

    let fallback_url = browser.default_driver_url();
    if fallback_url == webdriver_url {
        return Err(ScrapeError::SessionStart {
            url: webdriver_url.to_string(),
            source: first_error,
        });
    }

    ::log::warn!(
        "Failed to connect to WebDriver at {}: {}; trying {}",
        webdriver_url,
        first_error,
        fallback_url
    );
    builder
        .connect(fallback_url)
        .await
        .map_err(|source| {
            ::log::error!(
                "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
            );
            ScrapeError::SessionStart {
                url: fallback_url.to_string(),
                source,
            }
        })
}

fn window_dimension(value: &Value) -> Result<u32> {
    let pixels = value
        .as_f64()
        .ok_or_else(|| ScrapeError::Browser(format!("document size is not a number: {}", value)))?;
    let clamped = (pixels.ceil().max(1.0) as u64).min(MAX_WINDOW_DIMENSION);
    Ok(clamped as u32)
}
