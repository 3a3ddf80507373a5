use crate::parsers::{MAIN_TEXT_LIMIT, html};

#[test]
fn test_full_marketing_page() {
    let page = r#"<html>
        <head>
            <title>  Priser |
                Bokio </title>
            <meta name="description" content="Bokföring för småföretag">
        </head>
        <body>
            <nav><h2>Meny</h2></nav>
            <main>
                <h1> Enkla priser </h1>
                <h2>Gratis</h2>
                <h2>Premium</h2>
                <p>Välj den plan som passar dig.</p>
            </main>
        </body>
    </html>"#;

    let fields = html::extract(page);

    assert_eq!(fields.title, "Priser | Bokio");
    assert_eq!(
        fields.meta_description.as_deref(),
        Some("Bokföring för småföretag")
    );
    assert_eq!(fields.h1, vec!["Enkla priser"]);
    assert_eq!(fields.h2, vec!["Meny", "Gratis", "Premium"]);

    let main_text = fields.main_text.unwrap();
    assert!(main_text.starts_with("Enkla priser"));
    assert!(main_text.ends_with("Välj den plan som passar dig."));
}

#[test]
fn test_missing_optional_fields() {
    let page = "<html><body><div><h1>Hej</h1></div></body></html>";

    let fields = html::extract(page);

    assert_eq!(fields.title, "");
    assert_eq!(fields.meta_description, None);
    assert_eq!(fields.h1, vec!["Hej"]);
    assert!(fields.h2.is_empty());
    assert_eq!(fields.main_text, None);
}

#[test]
fn test_empty_meta_description_is_none() {
    let page = r#"<html><head><meta name="description" content=""></head><body></body></html>"#;
    assert_eq!(html::extract(page).meta_description, None);

    let no_content = r#"<html><head><meta name="description"></head><body></body></html>"#;
    assert_eq!(html::extract(no_content).meta_description, None);
}

#[test]
fn test_main_content_first_match_in_document_order() {
    let page = r#"<html><body>
        <div class="content">Sidebar first</div>
        <main>Main second</main>
    </body></html>"#;

    assert_eq!(
        html::extract(page).main_text.as_deref(),
        Some("Sidebar first")
    );

    let article = r#"<html><body><article>  Artikel  </article></body></html>"#;
    assert_eq!(html::extract(article).main_text.as_deref(), Some("Artikel"));

    let nested = r#"<html><body><section class="main-content">Inner</section></body></html>"#;
    assert_eq!(html::extract(nested).main_text.as_deref(), Some("Inner"));
}

#[test]
fn test_main_text_truncated_to_limit() {
    let long = "ö".repeat(MAIN_TEXT_LIMIT + 500);
    let page = format!("<html><body><main>{}</main></body></html>", long);

    let main_text = html::extract(&page).main_text.unwrap();

    assert_eq!(main_text.chars().count(), MAIN_TEXT_LIMIT);
    assert!(main_text.chars().all(|c| c == 'ö'));
}

#[test]
fn test_empty_main_container_is_empty_text() {
    let page = "<html><body><main>   </main></body></html>";
    assert_eq!(html::extract(page).main_text.as_deref(), Some(""));
}
