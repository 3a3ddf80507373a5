use crate::parsers::{MAIN_CONTENT_SELECTOR, MAIN_TEXT_LIMIT, PageFields};
use crate::utils::truncate_chars;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static TITLE: LazyLock<Selector> = LazyLock::new(|| selector("title"));
static META_DESCRIPTION: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"meta[name="description"]"#));
static H1: LazyLock<Selector> = LazyLock::new(|| selector("h1"));
static H2: LazyLock<Selector> = LazyLock::new(|| selector("h2"));
static MAIN_CONTENT: LazyLock<Selector> = LazyLock::new(|| selector(MAIN_CONTENT_SELECTOR));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selectors are valid CSS")
}

/// Extracts title, description, headings and main text from rendered HTML
pub fn extract(html: &str) -> PageFields {
    let doc = Html::parse_document(html);

    let title = doc
        .select(&TITLE)
        .next()
        .map(|e| collapse_whitespace(&text_content(e)))
        .unwrap_or_default();

    let meta_description = doc
        .select(&META_DESCRIPTION)
        .next()
        .and_then(|e| e.value().attr("content"))
        .filter(|content| !content.is_empty())
        .map(|content| content.to_string());

    let h1 = heading_texts(&doc, &H1);
    let h2 = heading_texts(&doc, &H2);

    // First match in document order across the whole selector list
    let main_text = doc
        .select(&MAIN_CONTENT)
        .next()
        .map(|e| truncate_chars(text_content(e).trim(), MAIN_TEXT_LIMIT));

    ::log::debug!(
        "HTML extraction found {} h1, {} h2, main content: {}",
        h1.len(),
        h2.len(),
        main_text.is_some()
    );

    PageFields {
        title,
        meta_description,
        h1,
        h2,
        main_text,
    }
}

fn heading_texts(doc: &Html, selector: &Selector) -> Vec<String> {
    doc.select(selector)
        .map(|e| text_content(e).trim().to_string())
        .collect()
}

/// Concatenated text of all descendant nodes, like the DOM's `textContent`
fn text_content(element: ElementRef<'_>) -> String {
    element.text().collect()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
