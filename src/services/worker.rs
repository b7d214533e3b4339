use std::time::Duration;

use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use crate::configuration::{AnalysisSettings, ApiKeySettings};
use crate::dal::{job_db, metrics_db, page_db, query_db, run_db};
use crate::domain::{CrawlPayload, Job, ProvidersPayload, RunStatus};
use crate::services::crawler::Crawler;
use crate::services::query_engine::QueryEngine;
use crate::services::scoring::{calculate_scores, ScoringWeights};

const IDLE_POLL_DELAY: Duration = Duration::from_secs(5);

/// Single pipeline worker: polls the jobs table for the oldest pending job
/// and runs one stage at a time. Stage chaining happens through job rows,
/// never in-process.
pub async fn job_worker_handler(
    pool: PgPool,
    api_keys: ApiKeySettings,
    analysis: AnalysisSettings,
) {
    log::info!("Started pipeline job worker");

    let crawler = Crawler::new();
    let mut query_engine = QueryEngine::new(&api_keys, &analysis);
    let weights = ScoringWeights::default();

    loop {
        let job = match job_db::fetch_next_pending(&pool).await {
            Ok(Some(job)) => job,
            Ok(None) => {
                tokio::time::sleep(IDLE_POLL_DELAY).await;
                continue;
            }
            Err(e) => {
                log::error!("Failed to poll jobs: {:?}", e);
                tokio::time::sleep(IDLE_POLL_DELAY).await;
                continue;
            }
        };

        if let Err(e) = job_db::update_status(&pool, job.id, "running").await {
            log::error!("Failed to mark job {} running: {:?}", job.id, e);
            tokio::time::sleep(IDLE_POLL_DELAY).await;
            continue;
        }

        log::info!("Processing job {} ({}) for run {}", job.id, job.job_type, job.run_id);

        let outcome = dispatch(&pool, &crawler, &mut query_engine, &weights, &job).await;

        match outcome {
            Ok(()) => {
                if let Err(e) = job_db::update_status(&pool, job.id, "done").await {
                    log::error!("Failed to mark job {} done: {:?}", job.id, e);
                }
            }
            Err(e) => {
                // A stage-level failure: the whole stage was meaningless,
                // so the run is marked failed, not just the job.
                log::error!("Job {} failed: {:#}", job.id, e);
                if let Err(e) = job_db::update_status(&pool, job.id, "failed").await {
                    log::error!("Failed to mark job {} failed: {:?}", job.id, e);
                }
                if let Err(e) = run_db::update_status(&pool, job.run_id, RunStatus::Failed).await {
                    log::error!("Failed to mark run {} failed: {:?}", job.run_id, e);
                }
            }
        }
    }
}

async fn dispatch(
    pool: &PgPool,
    crawler: &Crawler,
    query_engine: &mut QueryEngine,
    weights: &ScoringWeights,
    job: &Job,
) -> anyhow::Result<()> {
    match job.job_type.as_str() {
        "crawl" => {
            let payload: CrawlPayload = serde_json::from_value(job.payload.clone())
                .context("Malformed crawl payload")?;
            crawler.process_crawl_job(pool, job.run_id, &payload).await
        }
        "query_providers" => {
            let payload: ProvidersPayload = serde_json::from_value(job.payload.clone())
                .context("Malformed query_providers payload")?;
            query_engine
                .process_providers_job(pool, job.run_id, &payload)
                .await
        }
        "calculate_score" => process_score_job(pool, job.run_id, weights).await,
        other => anyhow::bail!("Unknown job type: {}", other),
    }
}

/// The scoring stage: pure calculation over whatever pages and answers the
/// earlier stages persisted, then the run's single terminal write.
pub async fn process_score_job(
    pool: &PgPool,
    run_id: Uuid,
    weights: &ScoringWeights,
) -> anyhow::Result<()> {
    let pages = page_db::get_checks_for_run(pool, run_id)
        .await
        .context("Failed to load crawled pages")?;
    let queries = query_db::get_features_by_query(pool, run_id)
        .await
        .context("Failed to load answers")?;

    let card = calculate_scores(&pages, &queries, weights);
    log::info!(
        "Run {} scored {} ({}) from {} pages and {} queries",
        run_id,
        card.total_score,
        card.readiness_rank,
        pages.len(),
        queries.len()
    );

    metrics_db::insert_metrics(pool, run_id, &card)
        .await
        .context("Failed to persist metrics")?;
    run_db::complete_run(pool, run_id, card.total_score, &card.readiness_rank)
        .await
        .context("Failed to complete run")?;

    Ok(())
}
