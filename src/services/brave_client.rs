use anyhow::bail;
use serde_json::Value;
use url::Url;

use crate::domain::{Citation, ProviderResponse};

pub const PROVIDER_NAME: &str = "brave_search";

const SEARCH_URL: &str = "https://api.search.brave.com/res/v1/web/search";
const SNIPPET_RESULTS: usize = 3;
const CITATION_RESULTS: usize = 10;
const TITLE_FALLBACK_RESULTS: usize = 5;

/// Search-grounded answer provider backed by the Brave Web Search API.
pub struct BraveClient {
    client: reqwest::Client,
    api_key: String,
}

impl BraveClient {
    pub fn new(api_key: String) -> Self {
        BraveClient {
            client: reqwest::Client::new(),
            api_key,
        }
    }

    pub async fn query(&self, prompt: &str, locale: &str) -> anyhow::Result<ProviderResponse> {
        if self.api_key.trim().is_empty() {
            bail!("BRAVE_API_KEY not configured");
        }

        let country = locale.split('-').nth(1).unwrap_or("CA");

        let response = self
            .client
            .get(SEARCH_URL)
            .query(&[("q", prompt), ("country", country)])
            .header("Accept", "application/json")
            .header("X-Subscription-Token", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("Brave API error: {} - {}", status, body);
        }

        let data: Value = response.json().await?;
        let (answer_text, citations) = parse_search_payload(&data);

        Ok(ProviderResponse {
            provider: PROVIDER_NAME.to_string(),
            answer_text,
            citations,
            raw_json: data,
        })
    }
}

/// Normalize a Brave search payload into answer text plus citations.
///
/// The answer text is assembled from the first usable source in order:
/// result descriptions/snippets, the infobox description, the first FAQ
/// answer, then result titles. Only a payload with nothing usable at all
/// yields the "No results found" placeholder.
pub fn parse_search_payload(data: &Value) -> (String, Vec<Citation>) {
    let results = data["web"]["results"].as_array();

    let mut answer_text = results
        .map(|results| {
            results
                .iter()
                .take(SNIPPET_RESULTS)
                .filter_map(result_snippet)
                .collect::<Vec<&str>>()
                .join(" ")
        })
        .unwrap_or_default();

    if answer_text.is_empty() {
        if let Some(desc) = data["infobox"]["long_desc"].as_str() {
            answer_text = desc.to_string();
        } else if let Some(faq_answer) = data["faq"]["results"][0]["answer"].as_str() {
            answer_text = faq_answer.to_string();
        }
    }

    let mut citations = Vec::new();
    if let Some(results) = results {
        for result in results.iter().take(CITATION_RESULTS) {
            let Some(raw_url) = result["url"].as_str() else {
                continue;
            };
            match Url::parse(raw_url) {
                Ok(parsed) => {
                    if let Some(host) = parsed.host_str() {
                        citations.push(Citation {
                            url: raw_url.to_string(),
                            domain: host.to_string(),
                        });
                    }
                }
                Err(e) => {
                    log::error!("Invalid result url {}: {:?}", raw_url, e);
                }
            }
        }
    }

    if answer_text.is_empty() {
        if let Some(results) = results {
            let titles: Vec<&str> = results
                .iter()
                .take(TITLE_FALLBACK_RESULTS)
                .filter_map(|r| r["title"].as_str())
                .collect();
            if !titles.is_empty() {
                answer_text = format!("{}.", titles.join(". "));
            }
        }
    }

    if answer_text.is_empty() {
        answer_text = "No results found".to_string();
    }

    (answer_text, citations)
}

fn result_snippet(result: &Value) -> Option<&str> {
    result["description"]
        .as_str()
        .or_else(|| result["snippet"].as_str())
        .or_else(|| result["extra_snippets"][0].as_str())
        .or_else(|| result["title"].as_str())
        .filter(|s| !s.is_empty())
}
