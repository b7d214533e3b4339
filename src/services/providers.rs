use std::time::Duration;

use crate::domain::ProviderResponse;
use crate::services::{brave_client, openai_client, BraveClient, OpenaiClient};

/// One configured AI answer provider behind the common normalized contract.
pub enum Provider {
    Openai(OpenaiClient),
    BraveSearch(BraveClient),
}

impl Provider {
    pub fn name(&self) -> &'static str {
        match self {
            Provider::Openai(_) => openai_client::PROVIDER_NAME,
            Provider::BraveSearch(_) => brave_client::PROVIDER_NAME,
        }
    }

    /// Delay applied after a call to this provider. Brave's free tier has
    /// the tighter per-minute cap, so it gets the longer pause.
    pub fn pacing(&self) -> Duration {
        match self {
            Provider::Openai(_) => Duration::from_secs(3),
            Provider::BraveSearch(_) => Duration::from_secs(5),
        }
    }

    pub async fn query(&self, prompt: &str, locale: &str) -> anyhow::Result<ProviderResponse> {
        match self {
            Provider::Openai(client) => client.query(prompt).await,
            Provider::BraveSearch(client) => client.query(prompt, locale).await,
        }
    }
}
