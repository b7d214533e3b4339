use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub url: String,
    pub domain: String,
}

/// The normalized shape every provider client returns, whatever the wire
/// payload looked like.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub provider: String,
    pub answer_text: String,
    pub citations: Vec<Citation>,
    pub raw_json: serde_json::Value,
}

/// Structured signals extracted from one provider answer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnswerFeatures {
    pub brand_mentioned: bool,
    pub self_cited: bool,
    pub tier_a_present: bool,
    pub competitor_count: u32,
}
