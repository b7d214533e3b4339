use std::cmp::Ordering;
use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::services::sitemap_resolver::CandidateUrl;

const TIER2_CAP: usize = 10;
const HIGH_PRIORITY_CAP: usize = 5;
const HIGH_PRIORITY_FLOOR: f32 = 0.8;

/// Business-critical page categories. At most one URL per category, in this
/// order, right after the homepage.
static TIER1_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        (path_pattern("about|about-us|about_us|company|who-we-are"), "About"),
        (path_pattern("contact|contact-us|contact_us|get-in-touch"), "Contact"),
        (path_pattern("services|our-services|what-we-do"), "Services"),
        (path_pattern("products|our-products|shop|store"), "Products"),
        (path_pattern("faq|faqs|frequently-asked-questions|help"), "FAQ"),
        (path_pattern("pricing|plans|packages|cost"), "Pricing"),
        (path_pattern("solutions|industries|use-cases"), "Solutions"),
    ]
});

static TIER2_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        path_pattern("team|our-team|leadership|people"),
        path_pattern("case-studies|portfolio|work|projects"),
        path_pattern("testimonials|reviews|clients"),
        path_pattern("careers|jobs|join-us"),
        path_pattern("resources|guides|learn"),
        path_pattern("features|capabilities"),
    ]
});

/// Low-value paths for AI visibility: blog posts, news, date archives,
/// taxonomy pages.
static LOW_VALUE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        path_pattern("blog|news|articles|press"),
        Regex::new(r"/\d{4}/\d{2}/").unwrap(),
        Regex::new(r"(?i)/(tag|category|author)/").unwrap(),
    ]
});

fn path_pattern(alternatives: &str) -> Regex {
    Regex::new(&format!(r"(?i)/({})($|/|\?)", alternatives)).unwrap()
}

fn add_url(urls: &mut Vec<String>, used: &mut HashSet<String>, loc: &str) {
    if used.insert(loc.to_string()) {
        urls.push(loc.to_string());
    }
}

/// Pick at most `budget` URLs from the sitemap candidates, best pages first.
///
/// Tier 0 is the bare domain root, always included. Tier 1 adds the first
/// match per critical category. Tier 2 adds important pages, then candidates
/// with declared priority >= 0.8. Tier 3 splits the leftover budget 70/30
/// between non-blog and blog pages; unused allowance in one bucket does not
/// carry over to the other.
pub fn select_urls(domain: &str, candidates: &[CandidateUrl], budget: usize) -> Vec<String> {
    let mut urls: Vec<String> = Vec::new();
    let mut used: HashSet<String> = HashSet::new();

    // Tier 0: the homepage is always scanned.
    add_url(&mut urls, &mut used, &format!("https://{}", domain));

    for (pattern, name) in TIER1_PATTERNS.iter() {
        if let Some(candidate) = candidates.iter().find(|c| pattern.is_match(&c.loc)) {
            add_url(&mut urls, &mut used, &candidate.loc);
            log::info!("Found critical page: {} - {}", name, candidate.loc);
        }
    }

    let tier2: Vec<String> = candidates
        .iter()
        .filter(|c| !used.contains(&c.loc) && TIER2_PATTERNS.iter().any(|p| p.is_match(&c.loc)))
        .take(TIER2_CAP.min(budget.saturating_sub(urls.len())))
        .map(|c| c.loc.clone())
        .collect();
    for loc in &tier2 {
        add_url(&mut urls, &mut used, loc);
    }

    let mut high_priority: Vec<&CandidateUrl> = candidates
        .iter()
        .filter(|c| !used.contains(&c.loc) && c.priority.unwrap_or(0.0) >= HIGH_PRIORITY_FLOOR)
        .collect();
    sort_by_priority(&mut high_priority);
    let high_priority: Vec<String> = high_priority
        .into_iter()
        .take(HIGH_PRIORITY_CAP.min(budget.saturating_sub(urls.len())))
        .map(|c| c.loc.clone())
        .collect();
    for loc in &high_priority {
        add_url(&mut urls, &mut used, loc);
    }

    // Tier 3: whatever budget is left, favoring non-blog pages 70/30.
    if urls.len() < budget {
        let remaining = budget - urls.len();
        let other_budget = (remaining as f64 * 0.7).floor() as usize;
        let blog_budget = remaining - other_budget;

        let is_low_value = |loc: &str| LOW_VALUE_PATTERNS.iter().any(|p| p.is_match(loc));

        let mut other: Vec<&CandidateUrl> = candidates
            .iter()
            .filter(|c| !used.contains(&c.loc) && !is_low_value(&c.loc))
            .collect();
        let mut blog: Vec<&CandidateUrl> = candidates
            .iter()
            .filter(|c| !used.contains(&c.loc) && is_low_value(&c.loc))
            .collect();

        sort_by_priority(&mut other);
        sort_by_priority(&mut blog);

        let picked: Vec<String> = other
            .into_iter()
            .take(other_budget)
            .chain(blog.into_iter().take(blog_budget))
            .map(|c| c.loc.clone())
            .collect();
        for loc in &picked {
            add_url(&mut urls, &mut used, loc);
        }
    }

    urls.truncate(budget);

    log::info!(
        "Selected {} of {} candidate urls for {}",
        urls.len(),
        candidates.len(),
        domain
    );

    urls
}

fn sort_by_priority(candidates: &mut [&CandidateUrl]) {
    candidates.sort_by(|a, b| {
        b.priority
            .unwrap_or(0.0)
            .partial_cmp(&a.priority.unwrap_or(0.0))
            .unwrap_or(Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::select_urls;
    use crate::services::sitemap_resolver::CandidateUrl;

    fn candidate(loc: &str, priority: Option<f32>) -> CandidateUrl {
        CandidateUrl {
            loc: loc.to_string(),
            priority,
        }
    }

    #[test]
    fn homepage_is_always_first() {
        let urls = select_urls("example.com", &[], 1);
        assert_eq!(urls, vec!["https://example.com"]);

        let candidates = vec![candidate("https://example.com/about", Some(0.9))];
        let urls = select_urls("example.com", &candidates, 1);
        assert_eq!(urls.first().map(String::as_str), Some("https://example.com"));
    }

    #[test]
    fn budget_exhausted_by_critical_pages_excludes_blog() {
        let candidates = vec![
            candidate("https://example.com/about", Some(0.9)),
            candidate("https://example.com/contact", Some(0.7)),
            candidate("https://example.com/blog/post-1", Some(0.5)),
        ];

        let urls = select_urls("example.com", &candidates, 3);

        assert_eq!(
            urls,
            vec![
                "https://example.com",
                "https://example.com/about",
                "https://example.com/contact",
            ]
        );
    }

    #[test]
    fn one_url_per_critical_category() {
        let candidates = vec![
            candidate("https://example.com/about", None),
            candidate("https://example.com/about-us", None),
            candidate("https://example.com/company", None),
            candidate("https://example.com/contact", None),
        ];

        let urls = select_urls("example.com", &candidates, 10);

        // Only the first About match is taken.
        assert!(urls.contains(&"https://example.com/about".to_string()));
        assert!(!urls.contains(&"https://example.com/about-us".to_string()));
        assert!(!urls.contains(&"https://example.com/company".to_string()));
        assert!(urls.contains(&"https://example.com/contact".to_string()));
    }

    #[test]
    fn never_exceeds_budget_and_never_duplicates() {
        let mut candidates = vec![
            candidate("https://example.com/about", Some(0.9)),
            candidate("https://example.com/team", Some(0.9)),
            candidate("https://example.com/pricing", Some(0.9)),
        ];
        for i in 0..50 {
            candidates.push(candidate(
                &format!("https://example.com/page-{}", i),
                Some(0.85),
            ));
        }

        for budget in 1..=20 {
            let urls = select_urls("example.com", &candidates, budget);
            assert!(urls.len() <= budget);

            let mut deduped = urls.clone();
            deduped.sort();
            deduped.dedup();
            assert_eq!(deduped.len(), urls.len());
        }
    }

    #[test]
    fn high_declared_priority_beats_unprioritized_pages() {
        let candidates = vec![
            candidate("https://example.com/landing", Some(0.9)),
            candidate("https://example.com/misc", None),
        ];

        let urls = select_urls("example.com", &candidates, 2);

        assert_eq!(
            urls,
            vec!["https://example.com", "https://example.com/landing"]
        );
    }

    #[test]
    fn tier3_split_does_not_redistribute_unused_blog_allowance() {
        // 10 slots remain after the homepage: 7 for non-blog, 3 for blog.
        // With only blog candidates left, the 7 non-blog slots stay empty.
        let candidates: Vec<_> = (0..20)
            .map(|i| candidate(&format!("https://example.com/blog/post-{}", i), Some(0.5)))
            .collect();

        let urls = select_urls("example.com", &candidates, 11);

        assert_eq!(urls.len(), 1 + 3);
    }

    #[test]
    fn tier3_buckets_date_archives_as_low_value() {
        // The archive page has the higher declared priority; if it were not
        // classified as low-value it would be picked before /widgets.
        let candidates = vec![
            candidate("https://example.com/2024/01/launch-post", Some(0.5)),
            candidate("https://example.com/widgets", None),
        ];

        let urls = select_urls("example.com", &candidates, 3);

        assert_eq!(
            urls,
            vec![
                "https://example.com",
                "https://example.com/widgets",
                "https://example.com/2024/01/launch-post",
            ]
        );
    }
}
