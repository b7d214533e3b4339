use anyhow::{anyhow, Context};
use async_openai::{
    config::OpenAIConfig,
    types::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs},
    Client,
};

use crate::domain::ProviderResponse;

pub const PROVIDER_NAME: &str = "openai";

/// Conversational answer provider. The chat API exposes no grounding, so
/// citations are always empty.
pub struct OpenaiClient {
    client: Option<Client<OpenAIConfig>>,
}

impl OpenaiClient {
    pub fn new(api_key: String) -> Self {
        let client = if api_key.trim().is_empty() {
            None
        } else {
            Some(Client::with_config(OpenAIConfig::new().with_api_key(api_key)))
        };
        OpenaiClient { client }
    }

    pub async fn query(&self, prompt: &str) -> anyhow::Result<ProviderResponse> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| anyhow!("OPENAI_API_KEY not configured"))?;

        let request = CreateChatCompletionRequestArgs::default()
            .model("gpt-4o-mini")
            .messages([ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()?
                .into()])
            .max_tokens(1000_u32)
            .build()?;

        let response = client.chat().create(request).await?;

        let answer_text = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .filter(|content| !content.trim().is_empty())
            .unwrap_or_else(|| "No response generated".to_string());

        let raw_json =
            serde_json::to_value(&response).context("Failed to serialize openai response")?;

        Ok(ProviderResponse {
            provider: PROVIDER_NAME.to_string(),
            answer_text,
            citations: vec![],
            raw_json,
        })
    }
}
