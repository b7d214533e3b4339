use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RunStatus {
    Queued,
    Running,
    Done,
    Failed,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Queued => "queued",
            RunStatus::Running => "running",
            RunStatus::Done => "done",
            RunStatus::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Run {
    pub id: Uuid,
    pub status: String,
    pub page_budget: i32,
    pub locale: String,
    pub total_score: Option<f64>,
    pub readiness_rank: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Organization {
    pub brand_name: String,
    pub domain: String,
    pub industry: Option<String>,
}
