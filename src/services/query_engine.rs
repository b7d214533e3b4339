use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::configuration::{AnalysisSettings, ApiKeySettings};
use crate::dal::{job_db, query_db};
use crate::domain::{JobType, ProvidersPayload, SCENARIOS};
use crate::services::brave_client::BraveClient;
use crate::services::features::extract_features;
use crate::services::openai_client::OpenaiClient;
use crate::services::providers::Provider;
use crate::services::response_cache::{CacheKey, ResponseCache};

/// The provider-query stage: renders each scenario, queries every
/// configured provider through the response cache, extracts features and
/// persists one answer per (query, provider) pair.
pub struct QueryEngine {
    providers: Vec<Provider>,
    cache: ResponseCache,
    locale: String,
    competitors: Vec<String>,
}

impl QueryEngine {
    pub fn new(api_keys: &ApiKeySettings, analysis: &AnalysisSettings) -> Self {
        QueryEngine {
            providers: vec![
                Provider::Openai(OpenaiClient::new(api_keys.openai.clone())),
                Provider::BraveSearch(BraveClient::new(api_keys.brave.clone())),
            ],
            cache: ResponseCache::new(),
            locale: analysis.locale.clone(),
            competitors: analysis.competitors.clone(),
        }
    }

    pub async fn process_providers_job(
        &mut self,
        pool: &PgPool,
        run_id: Uuid,
        payload: &ProvidersPayload,
    ) -> anyhow::Result<()> {
        log::info!("Querying AI providers for {}", payload.brand_name);

        for scenario in &SCENARIOS {
            let prompt = scenario.prompt(&payload.brand_name, &payload.domain, &payload.industry);
            log::info!("Scenario {}: {}", scenario.key, scenario.title);

            let query_id = match query_db::insert_query(
                pool,
                run_id,
                scenario.key,
                scenario.title,
                &prompt,
                &self.locale,
            )
            .await
            {
                Ok(id) => id,
                Err(e) => {
                    log::error!("Failed to create query for {}: {:?}", scenario.key, e);
                    continue;
                }
            };

            let locale = self.locale.clone();
            let providers = &self.providers;
            let cache = &mut self.cache;

            for provider in providers {
                let key = CacheKey {
                    provider: provider.name().to_string(),
                    prompt: prompt.clone(),
                    locale: locale.clone(),
                    brand_name: payload.brand_name.clone(),
                };

                let (response, from_cache) = match cache.get(&key) {
                    Some(cached) => {
                        log::info!("Using cached {} response", provider.name());
                        (cached.clone(), true)
                    }
                    None => match provider.query(&prompt, &locale).await {
                        Ok(response) => {
                            cache.set(key, response.clone());
                            (response, false)
                        }
                        Err(e) => {
                            log::error!(
                                "{} error on scenario {}: {:#}",
                                provider.name(),
                                scenario.key,
                                e
                            );
                            continue;
                        }
                    },
                };

                let features = extract_features(
                    &response,
                    &payload.brand_name,
                    &payload.domain,
                    &self.competitors,
                );

                if let Err(e) = query_db::insert_answer(pool, query_id, &response, &features).await
                {
                    log::error!(
                        "Failed to persist {} answer for {}: {:?}",
                        provider.name(),
                        scenario.key,
                        e
                    );
                }

                // Only a real network call needs pacing.
                if !from_cache {
                    tokio::time::sleep(provider.pacing()).await;
                }
            }
        }

        log::info!("Completed AI queries for {}", payload.brand_name);

        job_db::enqueue(pool, run_id, JobType::CalculateScore, json!({})).await?;
        log::info!("Scoring job created for run {}", run_id);

        Ok(())
    }
}
