use itertools::Itertools;
use scraper::{Html, Selector};

pub const MAX_MAIN_TEXT_CHARS: usize = 50_000;

/// Pull the readable text out of a page, skipping navigation, scripts and
/// other boilerplate, capped at 50k characters.
pub fn extract_main_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let scope_selector = Selector::parse("main, article").unwrap();
    let content_selector = Selector::parse("p, h1, h2, h3, h4, h5, h6, li, blockquote").unwrap();

    let blocks: Vec<String> = match document.select(&scope_selector).next() {
        Some(scope) => scope
            .select(&content_selector)
            .map(|el| el.text().join(" "))
            .collect(),
        None => document
            .select(&content_selector)
            .map(|el| el.text().join(" "))
            .collect(),
    };

    let text = blocks
        .iter()
        .flat_map(|b| b.split_whitespace())
        .join(" ");

    truncate_chars(&text, MAX_MAIN_TEXT_CHARS)
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{extract_main_text, truncate_chars};

    #[test]
    fn prefers_main_over_body_boilerplate() {
        let html = r#"
            <html><body>
                <nav><a href="/">Home</a><a href="/about">About</a></nav>
                <main><p>Acme builds rockets.</p><p>Fast delivery.</p></main>
                <footer><p>Copyright Acme</p></footer>
            </body></html>
        "#;

        let text = extract_main_text(html);

        assert_eq!(text, "Acme builds rockets. Fast delivery.");
    }

    #[test]
    fn falls_back_to_whole_document_without_main() {
        let html = "<html><body><h1>Acme</h1><p>We build rockets.</p></body></html>";

        let text = extract_main_text(html);

        assert_eq!(text, "Acme We build rockets.");
    }

    #[test]
    fn script_and_style_content_is_skipped() {
        let html = r#"
            <html><body>
                <script>var tracking = "secret";</script>
                <style>p { color: red; }</style>
                <p>Visible text.</p>
            </body></html>
        "#;

        let text = extract_main_text(html);

        assert_eq!(text, "Visible text.");
    }

    #[test]
    fn truncation_is_char_boundary_safe() {
        let text = "é".repeat(10);
        assert_eq!(truncate_chars(&text, 4), "éééé");
        assert_eq!(truncate_chars("short", 100), "short");
    }
}
