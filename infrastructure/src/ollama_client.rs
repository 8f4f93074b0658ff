use crate::config::Config;
use crate::prompts;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::types::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

#[derive(Serialize)]
struct EmbeddingRequest {
    model: String,
    prompt: String,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    embedding: Vec<f32>,
}

#[derive(Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    images: Option<Vec<String>>,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    stream: bool,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: Message,
    done: bool,
}

/// Client for a local Ollama server. Serves both the embedding model and the
/// vision model, which share the same HTTP endpoint.
#[derive(Clone)]
pub struct OllamaClient {
    client: Arc<Client>,
    base_url: String,
    embed_model: String,
    vision_model: String,
}

impl OllamaClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            client: Arc::new(client),
            base_url: config.ollama_base_url.clone(),
            embed_model: config.embed_model.clone(),
            vision_model: config.vision_model.clone(),
        })
    }

    pub async fn generate_embedding(&self, text: &str) -> Result<Vec<f32>> {
        let url = format!("{}/api/embeddings", self.base_url);
        let request = EmbeddingRequest {
            model: self.embed_model.clone(),
            prompt: text.to_string(),
        };
        debug!(model = %self.embed_model, chars = text.chars().count(), "requesting embedding");
        let response = self.client.post(&url).json(&request).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(anyhow::anyhow!("Ollama API error: {}", body));
        }
        let embedding_response: EmbeddingResponse = serde_json::from_str(&body)?;
        Ok(embedding_response.embedding)
    }

    pub async fn describe_image(&self, image: &[u8]) -> Result<String> {
        let url = format!("{}/api/chat", self.base_url);
        let request = ChatRequest {
            model: self.vision_model.clone(),
            messages: vec![Message {
                role: "user".to_string(),
                content: prompts::VISION_PROMPT.to_string(),
                images: Some(vec![STANDARD.encode(image)]),
            }],
            stream: false,
        };
        debug!(model = %self.vision_model, bytes = image.len(), "requesting image description");
        let response = self.client.post(&url).json(&request).send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(anyhow::anyhow!("Ollama API error: {}", text));
        }
        parse_chat_content(&text)
    }
}

/// Even with `stream: false` Ollama may answer with newline-delimited JSON
/// chunks, so message content is accumulated line by line. A body with no
/// parseable chat line is a provider error.
fn parse_chat_content(body: &str) -> Result<String> {
    let mut full_content = String::new();
    let mut parsed_any = false;
    for line in body.lines() {
        if line.trim().is_empty() {
            continue;
        }
        if let Ok(chat_resp) = serde_json::from_str::<ChatResponse>(line) {
            parsed_any = true;
            full_content.push_str(&chat_resp.message.content);
            if chat_resp.done {
                break;
            }
        }
    }
    if !parsed_any {
        return Err(anyhow::anyhow!(
            "Ollama API error: unrecognized chat response: {}",
            body
        ));
    }
    Ok(full_content.trim().to_string())
}

impl domain::providers::TextEmbedder for OllamaClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.generate_embedding(text).await
    }
}

impl domain::providers::VisionModel for OllamaClient {
    async fn describe(&self, image: &[u8]) -> Result<String> {
        self.describe_image(image).await
    }
}
