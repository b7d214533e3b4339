use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Check names that feed the content-quality pillar.
pub const CONTENT_CHECKS: [&str; 9] = [
    "faq_present",
    "question_headings",
    "h1_ok",
    "headings_hierarchy_ok",
    "byline_present",
    "updated_date_present",
    "outbound_citations_present",
    "glossary_terms_present",
    "internal_linking_ok",
];

/// Strict boolean check names that feed the technical-foundation pillar.
pub const TECHNICAL_CHECKS: [&str; 8] = [
    "org_schema_present",
    "website_schema_present",
    "product_service_schema_present",
    "alt_text_ok",
    "canonical_ok",
    "robots_ok",
    "sitemap_ok",
    "contrast_ok",
];

/// The single graded technical check.
pub const JS_DEPENDENCE_CHECK: &str = "js_dependence_level";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsDependence {
    Low,
    Medium,
    High,
}

/// A quality-check result: most checks are pass/fail, js dependence is graded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CheckValue {
    Passed(bool),
    Graded(JsDependence),
}

pub type CheckMap = HashMap<String, CheckValue>;
