use crate::config::Config;
use crate::prompts;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::types::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

const MAX_TOKENS: u32 = 2000;
const TEMPERATURE: f32 = 0.3;

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Client for the Groq OpenAI-compatible chat completions API, used for the
/// final synthesis stage.
#[derive(Clone)]
pub struct GroqClient {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
    model: String,
}

impl GroqClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            client: Arc::new(client),
            base_url: config.groq_base_url.clone(),
            api_key: config.groq_api_key.clone(),
            model: config.groq_model.clone(),
        })
    }

    pub async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let url = format!("{}/openai/v1/chat/completions", self.base_url);
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };
        debug!(model = %self.model, user_chars = user.chars().count(), "requesting chat completion");
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(anyhow::anyhow!("Groq API error: {}", text));
        }
        let completion: ChatCompletionResponse = serde_json::from_str(&text)?;
        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("Groq API returned no choices"))?;
        Ok(choice.message.content.trim().to_string())
    }
}

impl domain::providers::SynthesisModel for GroqClient {
    async fn synthesize(&self, description: &str, context: &str) -> Result<String> {
        let user = prompts::synthesis_user_prompt(description, context);
        self.complete(prompts::SYNTHESIS_SYSTEM_PROMPT, &user).await
    }
}
