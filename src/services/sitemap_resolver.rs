use reqwest::Client;
use sitemap::reader::{SiteMapEntity, SiteMapReader};
use sitemap::structs::Priority;
use std::io::Cursor;

const MAX_NESTED_SITEMAPS: usize = 10;

/// A URL discovered via the sitemap, with its declared priority if any.
/// Ephemeral: lives only within one crawl invocation.
#[derive(Debug, Clone)]
pub struct CandidateUrl {
    pub loc: String,
    pub priority: Option<f32>,
}

/// Fetch and flatten the domain's sitemap (following a sitemap index one
/// level deep). Any fetch or parse failure degrades to an empty list; the
/// URL selector falls back to homepage-only.
pub async fn fetch_candidates(client: &Client, domain: &str) -> Vec<CandidateUrl> {
    let sitemap_url = format!("https://{}/sitemap.xml", domain);

    let Some(xml) = fetch_xml(client, &sitemap_url).await else {
        log::warn!("No sitemap for {}, degrading to homepage-only", domain);
        return vec![];
    };

    let (mut candidates, nested) = parse_sitemap(&xml);

    for nested_url in nested.into_iter().take(MAX_NESTED_SITEMAPS) {
        if let Some(xml) = fetch_xml(client, &nested_url).await {
            let (mut urls, _) = parse_sitemap(&xml);
            candidates.append(&mut urls);
        }
    }

    candidates
}

async fn fetch_xml(client: &Client, url: &str) -> Option<Vec<u8>> {
    match client.get(url).send().await {
        Ok(res) if res.status().is_success() => match res.bytes().await {
            Ok(body) => Some(body.to_vec()),
            Err(e) => {
                log::warn!("Failed to read sitemap body from {}: {:?}", url, e);
                None
            }
        },
        Ok(res) => {
            log::info!("Sitemap fetch {} returned status {}", url, res.status());
            None
        }
        Err(e) => {
            log::warn!("Failed to fetch sitemap {}: {:?}", url, e);
            None
        }
    }
}

/// Returns the URL entries and any nested sitemap locations (index files).
fn parse_sitemap(xml: &[u8]) -> (Vec<CandidateUrl>, Vec<String>) {
    let mut candidates = Vec::new();
    let mut nested = Vec::new();

    for entity in SiteMapReader::new(Cursor::new(xml)) {
        match entity {
            SiteMapEntity::Url(entry) => {
                if let Some(url) = entry.loc.get_url() {
                    let priority = match entry.priority {
                        Priority::Value(p) => Some(p),
                        _ => None,
                    };
                    candidates.push(CandidateUrl {
                        loc: url.to_string(),
                        priority,
                    });
                }
            }
            SiteMapEntity::SiteMap(entry) => {
                if let Some(url) = entry.loc.get_url() {
                    nested.push(url.to_string());
                }
            }
            _ => {}
        }
    }

    (candidates, nested)
}

#[cfg(test)]
mod tests {
    use super::parse_sitemap;

    #[test]
    fn parses_urlset_with_priorities() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
            <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
              <url><loc>https://example.com/about</loc><priority>0.9</priority></url>
              <url><loc>https://example.com/blog/post-1</loc></url>
            </urlset>"#;

        let (candidates, nested) = parse_sitemap(xml.as_bytes());

        assert_eq!(candidates.len(), 2);
        assert!(nested.is_empty());
        assert_eq!(candidates[0].loc, "https://example.com/about");
        assert_eq!(candidates[0].priority, Some(0.9));
        assert_eq!(candidates[1].priority, None);
    }

    #[test]
    fn parses_sitemap_index_entries() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
            <sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
              <sitemap><loc>https://example.com/sitemap-pages.xml</loc></sitemap>
              <sitemap><loc>https://example.com/sitemap-posts.xml</loc></sitemap>
            </sitemapindex>"#;

        let (candidates, nested) = parse_sitemap(xml.as_bytes());

        assert!(candidates.is_empty());
        assert_eq!(
            nested,
            vec![
                "https://example.com/sitemap-pages.xml",
                "https://example.com/sitemap-posts.xml"
            ]
        );
    }

    #[test]
    fn malformed_xml_yields_nothing() {
        let (candidates, nested) = parse_sitemap(b"not xml at all");
        assert!(candidates.is_empty());
        assert!(nested.is_empty());
    }
}
