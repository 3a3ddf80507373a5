use crate::error::Result;
use url::Url;

/// Rendered state of a tab after navigation
#[derive(Debug, Clone, Default)]
pub struct PageCapture {
    /// Serialized DOM as the browser currently sees it
    pub html: String,
    /// Full-page screenshot, PNG encoded
    pub screenshot: Vec<u8>,
}

/// Minimal browser capability the pipeline drives.
///
/// One session lives for the whole run. Tabs are opened and released per
/// page; callers must hand every opened tab back to [`Session::close_tab`].
#[allow(async_fn_in_trait)]
pub trait Session {
    /// Handle to one open tab
    type Tab;

    /// Open a fresh tab
    async fn open_tab(&mut self) -> Result<Self::Tab>;

    /// Navigate a tab and wait until the page has settled
    async fn navigate(&mut self, tab: &Self::Tab, url: &Url) -> Result<()>;

    /// Read the rendered DOM and take a full-page screenshot
    async fn capture(&mut self, tab: &Self::Tab) -> Result<PageCapture>;

    /// Release a tab
    async fn close_tab(&mut self, tab: Self::Tab) -> Result<()>;

    /// End the session
    async fn close(self) -> Result<()>;
}
