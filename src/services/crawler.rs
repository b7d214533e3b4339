use std::time::Duration;

use serde_json::json;
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dal::{job_db, page_db, run_db};
use crate::domain::{CrawlPayload, JobType, ProvidersPayload, RunStatus};
use crate::services::content_extractor::{extract_main_text, MAX_MAIN_TEXT_CHARS};
use crate::services::page_checker::check_page_quality;
use crate::services::robots::RobotsRules;
use crate::services::sitemap_resolver::fetch_candidates;
use crate::services::url_selector::select_urls;

pub const USER_AGENT: &str = "GeoScanBot/1.0 (+https://geoscan.dev)";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const REQUEST_DELAY: Duration = Duration::from_secs(1);

pub struct Crawler {
    client: reqwest::Client,
}

impl Default for Crawler {
    fn default() -> Self {
        Self::new()
    }
}

impl Crawler {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build crawl http client");

        Crawler { client }
    }

    /// The crawl stage: resolve robots/sitemap, select URLs under the
    /// budget, fetch and check each page, then hand off to the provider
    /// stage. A single page failure never aborts the run.
    pub async fn process_crawl_job(
        &self,
        pool: &PgPool,
        run_id: Uuid,
        payload: &CrawlPayload,
    ) -> anyhow::Result<()> {
        log::info!(
            "Starting crawl for {} with budget {}",
            payload.domain,
            payload.url_budget
        );
        run_db::update_status(pool, run_id, RunStatus::Running).await?;

        let robots = RobotsRules::fetch(&self.client, &payload.domain, USER_AGENT).await;
        let candidates = fetch_candidates(&self.client, &payload.domain).await;
        log::info!("Found {} urls in sitemap", candidates.len());

        let urls = select_urls(&payload.domain, &candidates, payload.url_budget);
        let sitemap_ok = !candidates.is_empty();

        let mut success_count = 0;
        let mut fail_count = 0;

        for url in &urls {
            if !robots.is_allowed(url) {
                log::info!("Skipping {} - disallowed by robots.txt", url);
                continue;
            }

            log::info!("Crawling: {}", url);
            let (status, html) = match self.fetch_page(url).await {
                Ok(page) => page,
                Err(e) => {
                    log::error!("Error crawling {}: {:?}", url, e);
                    fail_count += 1;
                    continue;
                }
            };

            let main_text = extract_main_text(&html);
            debug_assert!(main_text.chars().count() <= MAX_MAIN_TEXT_CHARS);
            let html_hash = hex::encode(Sha256::digest(html.as_bytes()));
            let checks = check_page_quality(&html, url, sitemap_ok);

            if let Err(e) =
                page_db::insert_page(pool, run_id, url, status, &main_text, &html_hash, &checks)
                    .await
            {
                log::error!("Failed to persist page {}: {:?}", url, e);
                fail_count += 1;
                continue;
            }

            success_count += 1;
            tokio::time::sleep(REQUEST_DELAY).await;
        }

        log::info!(
            "Crawl completed: {} success, {} failed of {} selected",
            success_count,
            fail_count,
            urls.len()
        );

        self.enqueue_provider_stage(pool, run_id).await;
        Ok(())
    }

    async fn fetch_page(&self, url: &str) -> anyhow::Result<(i32, String)> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Failed to fetch {}: {}", url, status);
        }
        let html = response.text().await?;
        Ok((status.as_u16() as i32, html))
    }

    /// Hand-off to the provider stage. If the organization cannot be loaded
    /// the follow-up job is simply not created; the run stays visibly
    /// stalled for external monitoring instead of being marked done.
    async fn enqueue_provider_stage(&self, pool: &PgPool, run_id: Uuid) {
        let org = match run_db::get_organization_for_run(pool, run_id).await {
            Ok(org) => org,
            Err(e) => {
                log::error!("Failed to load organization for run {}: {:?}", run_id, e);
                return;
            }
        };

        let payload = ProvidersPayload {
            brand_name: org.brand_name,
            domain: org.domain,
            industry: org.industry.unwrap_or_else(|| "general".to_string()),
        };

        match job_db::enqueue(pool, run_id, JobType::QueryProviders, json!(payload)).await {
            Ok(()) => log::info!("Provider query job created for run {}", run_id),
            Err(e) => log::error!("Failed to create provider job for run {}: {:?}", run_id, e),
        }
    }
}
