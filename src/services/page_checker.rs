use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

use crate::domain::{CheckMap, CheckValue, JsDependence};
use crate::services::content_extractor::extract_main_text;

static BYLINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bby\s+[A-Z][a-z]+").unwrap());
static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(updated|last modified|published)").unwrap());
static LIGHT_TEXT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)color\s*:\s*(#fff(fff)?|white)\b").unwrap());

fn sel(selector: &str) -> Selector {
    Selector::parse(selector).unwrap()
}

/// Run the fixed battery of quality checks against a page's raw HTML.
///
/// Check names are consumed verbatim by the scoring calculator; a missing
/// key there simply contributes no instance, so every check is always
/// emitted here.
pub fn check_page_quality(html: &str, url: &str, sitemap_ok: bool) -> CheckMap {
    let document = Html::parse_document(html);
    let page_host = Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string));
    let lower_html = html.to_lowercase();
    let main_text = extract_main_text(html);

    let ld_json: String = document
        .select(&sel(r#"script[type="application/ld+json"]"#))
        .flat_map(|s| s.text())
        .collect();

    let headings: Vec<(u8, String)> = document
        .select(&sel("h1, h2, h3, h4, h5, h6"))
        .filter_map(|el| {
            let level = el.value().name().as_bytes().get(1).map(|b| *b - b'0')?;
            Some((level, el.text().collect::<String>()))
        })
        .collect();

    let hrefs: Vec<String> = document
        .select(&sel("a[href]"))
        .filter_map(|a| a.value().attr("href").map(str::to_string))
        .collect();
    let (internal_links, external_links) = split_links(&hrefs, page_host.as_deref());

    let h1_count = document.select(&sel("h1")).count();
    let script_count = document.select(&sel("script")).count();
    let images: Vec<_> = document.select(&sel("img")).collect();
    let alt_text_ok = images
        .iter()
        .all(|img| img.value().attr("alt").is_some_and(|alt| !alt.trim().is_empty()));

    let robots_meta_ok = document
        .select(&sel(r#"meta[name="robots"]"#))
        .filter_map(|m| m.value().attr("content"))
        .all(|content| !content.to_lowercase().contains("noindex"));

    let mut checks = CheckMap::new();
    let mut passed = |name: &str, value: bool| {
        checks.insert(name.to_string(), CheckValue::Passed(value));
    };

    // Content quality group.
    passed(
        "faq_present",
        lower_html.contains("faq")
            || lower_html.contains("frequently asked")
            || ld_json.contains("FAQPage"),
    );
    passed(
        "question_headings",
        headings.iter().any(|(level, text)| *level >= 2 && text.contains('?')),
    );
    passed("h1_ok", h1_count == 1);
    passed("headings_hierarchy_ok", hierarchy_ok(&headings));
    passed(
        "byline_present",
        BYLINE_RE.is_match(&main_text)
            || document
                .select(&sel(r#"[rel="author"], .author, .byline"#))
                .next()
                .is_some(),
    );
    passed(
        "updated_date_present",
        document.select(&sel("time")).next().is_some() || DATE_RE.is_match(&main_text),
    );
    passed("outbound_citations_present", external_links > 0);
    passed(
        "glossary_terms_present",
        document.select(&sel("dl")).next().is_some() || lower_html.contains("glossary"),
    );
    passed("internal_linking_ok", internal_links >= 3);

    // Technical group.
    passed("org_schema_present", ld_json.contains("Organization"));
    passed("website_schema_present", ld_json.contains("WebSite"));
    passed(
        "product_service_schema_present",
        ld_json.contains("Product") || ld_json.contains("Service"),
    );
    passed("alt_text_ok", alt_text_ok);
    passed(
        "canonical_ok",
        document.select(&sel(r#"link[rel="canonical"]"#)).next().is_some(),
    );
    passed("robots_ok", robots_meta_ok);
    passed("sitemap_ok", sitemap_ok);
    passed("contrast_ok", !LIGHT_TEXT_RE.is_match(&lower_html));

    checks.insert(
        "js_dependence_level".to_string(),
        CheckValue::Graded(js_dependence(&main_text, script_count)),
    );

    checks
}

fn split_links(hrefs: &[String], page_host: Option<&str>) -> (usize, usize) {
    let mut internal = 0;
    let mut external = 0;

    for href in hrefs {
        if href.starts_with('#') {
            continue;
        }
        match Url::parse(href) {
            Ok(parsed) => match (parsed.host_str(), page_host) {
                (Some(link_host), Some(host)) if link_host == host => internal += 1,
                (Some(_), _) => external += 1,
                _ => {}
            },
            // Relative links stay on the site.
            Err(_) => internal += 1,
        }
    }

    (internal, external)
}

/// Heading levels must never skip down more than one step (h1 -> h3 with no
/// h2 in between fails). A page without headings has no hierarchy to credit.
fn hierarchy_ok(headings: &[(u8, String)]) -> bool {
    if headings.is_empty() {
        return false;
    }
    headings
        .windows(2)
        .all(|pair| pair[1].0 <= pair[0].0 || pair[1].0 - pair[0].0 <= 1)
}

fn js_dependence(main_text: &str, script_count: usize) -> JsDependence {
    if main_text.len() < 200 && script_count > 0 {
        JsDependence::High
    } else if script_count > 15 || main_text.len() < 800 {
        JsDependence::Medium
    } else {
        JsDependence::Low
    }
}
