pub mod html;

#[cfg(test)]
mod tests;

/// Maximum number of characters kept from the main content text
pub const MAIN_TEXT_LIMIT: usize = 2000;

/// Selector list for the element holding a page's main content
pub const MAIN_CONTENT_SELECTOR: &str = "main, article, .content, .main-content";

/// Fields extracted from a rendered page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageFields {
    pub title: String,
    pub meta_description: Option<String>,
    pub h1: Vec<String>,
    pub h2: Vec<String>,
    pub main_text: Option<String>,
}
