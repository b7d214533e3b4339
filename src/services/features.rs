use crate::domain::{AnswerFeatures, ProviderResponse};

/// Citation domains treated as authoritative (Tier A), plus any `.gov` or
/// `.edu` host.
const TIER_A_DOMAINS: [&str; 12] = [
    "wikipedia.org",
    "britannica.com",
    "reuters.com",
    "apnews.com",
    "bbc.com",
    "bbc.co.uk",
    "nytimes.com",
    "theguardian.com",
    "wsj.com",
    "forbes.com",
    "bloomberg.com",
    "techcrunch.com",
];

/// Turn one normalized provider response into structured signals. Pure and
/// deterministic so replaying a cached response yields identical features.
pub fn extract_features(
    response: &ProviderResponse,
    brand_name: &str,
    domain: &str,
    competitors: &[String],
) -> AnswerFeatures {
    let answer_lower = response.answer_text.to_lowercase();
    let brand_lower = brand_name.trim().to_lowercase();
    let own_domain = normalize_domain(domain);

    let brand_mentioned = !brand_lower.is_empty() && answer_lower.contains(&brand_lower);

    let self_cited = response.citations.iter().any(|citation| {
        let cited = normalize_domain(&citation.domain);
        cited == own_domain || cited.ends_with(&format!(".{}", own_domain))
    });

    let tier_a_present = response.citations.iter().any(|citation| {
        let cited = normalize_domain(&citation.domain);
        is_tier_a(&cited)
    });

    let competitor_count = competitors
        .iter()
        .filter(|name| {
            let name = name.trim().to_lowercase();
            !name.is_empty() && name != brand_lower && answer_lower.contains(&name)
        })
        .count() as u32;

    AnswerFeatures {
        brand_mentioned,
        self_cited,
        tier_a_present,
        competitor_count,
    }
}

fn normalize_domain(domain: &str) -> String {
    domain
        .trim()
        .to_lowercase()
        .trim_start_matches("www.")
        .to_string()
}

fn is_tier_a(domain: &str) -> bool {
    if domain.ends_with(".gov") || domain.ends_with(".edu") {
        return true;
    }
    TIER_A_DOMAINS
        .iter()
        .any(|tier_a| domain == *tier_a || domain.ends_with(&format!(".{}", tier_a)))
}

#[cfg(test)]
mod tests {
    use super::extract_features;
    use crate::domain::{Citation, ProviderResponse};

    fn response(answer: &str, citation_domains: &[&str]) -> ProviderResponse {
        ProviderResponse {
            provider: "openai".to_string(),
            answer_text: answer.to_string(),
            citations: citation_domains
                .iter()
                .map(|d| Citation {
                    url: format!("https://{}/page", d),
                    domain: d.to_string(),
                })
                .collect(),
            raw_json: serde_json::json!({}),
        }
    }

    #[test]
    fn brand_match_is_case_insensitive() {
        let res = response("ACME CORP is a rocket company.", &[]);
        let features = extract_features(&res, "Acme Corp", "acme.com", &[]);
        assert!(features.brand_mentioned);

        let res = response("Nothing relevant here.", &[]);
        let features = extract_features(&res, "Acme Corp", "acme.com", &[]);
        assert!(!features.brand_mentioned);
    }

    #[test]
    fn self_citation_matches_subdomains_and_www() {
        let res = response("answer", &["www.acme.com"]);
        assert!(extract_features(&res, "Acme", "acme.com", &[]).self_cited);

        let res = response("answer", &["docs.acme.com"]);
        assert!(extract_features(&res, "Acme", "acme.com", &[]).self_cited);

        let res = response("answer", &["notacme.com"]);
        assert!(!extract_features(&res, "Acme", "acme.com", &[]).self_cited);
    }

    #[test]
    fn tier_a_covers_list_and_gov_edu_suffixes() {
        let res = response("answer", &["en.wikipedia.org"]);
        assert!(extract_features(&res, "Acme", "acme.com", &[]).tier_a_present);

        let res = response("answer", &["nasa.gov"]);
        assert!(extract_features(&res, "Acme", "acme.com", &[]).tier_a_present);

        let res = response("answer", &["mit.edu"]);
        assert!(extract_features(&res, "Acme", "acme.com", &[]).tier_a_present);

        let res = response("answer", &["random-blog.net"]);
        assert!(!extract_features(&res, "Acme", "acme.com", &[]).tier_a_present);
    }

    #[test]
    fn competitor_count_is_distinct_list_entries() {
        let competitors: Vec<String> = ["Globex", "Initech", "Umbrella"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let res = response("Globex and initech both beat Acme. Globex again.", &[]);
        let features = extract_features(&res, "Acme", "acme.com", &competitors);

        // Globex appears twice but counts once.
        assert_eq!(features.competitor_count, 2);
    }

    #[test]
    fn empty_competitor_list_yields_zero() {
        let res = response("Globex beats Acme.", &[]);
        let features = extract_features(&res, "Acme", "acme.com", &[]);
        assert_eq!(features.competitor_count, 0);
    }

    #[test]
    fn extraction_is_deterministic() {
        let res = response("Acme is cited by wikipedia.", &["en.wikipedia.org", "acme.com"]);
        let competitors = vec!["Globex".to_string()];

        let first = extract_features(&res, "Acme", "acme.com", &competitors);
        let second = extract_features(&res, "Acme", "acme.com", &competitors);

        assert_eq!(first, second);
    }
}
