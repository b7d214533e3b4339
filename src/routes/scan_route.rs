use actix_web::{post, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;

use crate::configuration::AnalysisSettings;
use crate::dal::{job_db, org_db, run_db};
use crate::domain::{CrawlPayload, JobType};

#[derive(Deserialize)]
pub struct ScanRequest {
    brand_name: String,
    domain: String,
    industry: Option<String>,
    page_budget: Option<usize>,
}

/// Kick off one analysis run: organization + queued run + initial crawl job.
#[post("")]
async fn scan(
    body: web::Json<ScanRequest>,
    pool: web::Data<PgPool>,
    analysis: web::Data<AnalysisSettings>,
) -> HttpResponse {
    let domain = normalize_domain(&body.domain);
    if domain.is_empty() || body.brand_name.trim().is_empty() {
        return HttpResponse::BadRequest().json(json!({
            "error": "brand_name and domain are required"
        }));
    }

    let page_budget = body.page_budget.unwrap_or(analysis.page_budget).max(1);

    let org_id = match org_db::insert_organization(
        &pool,
        body.brand_name.trim(),
        &domain,
        body.industry.as_deref(),
    )
    .await
    {
        Ok(id) => id,
        Err(e) => {
            log::error!("Failed to create organization: {:?}", e);
            return HttpResponse::InternalServerError().finish();
        }
    };

    let run_id = match run_db::insert_run(&pool, org_id, page_budget as i32, &analysis.locale).await
    {
        Ok(id) => id,
        Err(e) => {
            log::error!("Failed to create run: {:?}", e);
            return HttpResponse::InternalServerError().finish();
        }
    };

    let payload = CrawlPayload {
        domain,
        url_budget: page_budget,
    };
    if let Err(e) = job_db::enqueue(&pool, run_id, JobType::Crawl, json!(payload)).await {
        log::error!("Failed to enqueue crawl job for run {}: {:?}", run_id, e);
        return HttpResponse::InternalServerError().finish();
    }

    HttpResponse::Accepted().json(json!({ "run_id": run_id }))
}

fn normalize_domain(raw: &str) -> String {
    raw.trim()
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_start_matches("www.")
        .trim_end_matches('/')
        .to_lowercase()
}
