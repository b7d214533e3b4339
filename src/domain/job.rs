use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JobType {
    Crawl,
    QueryProviders,
    CalculateScore,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::Crawl => "crawl",
            JobType::QueryProviders => "query_providers",
            JobType::CalculateScore => "calculate_score",
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Job {
    pub id: Uuid,
    pub run_id: Uuid,
    #[sqlx(rename = "type")]
    pub job_type: String,
    pub payload: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlPayload {
    pub domain: String,
    pub url_budget: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersPayload {
    pub brand_name: String,
    pub domain: String,
    pub industry: String,
}
