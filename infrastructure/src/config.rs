use dotenvy::dotenv;
use std::env;

/// Runtime configuration, loaded once from the environment (`.env`
/// supported) and passed into constructors. No process-wide globals.
pub struct Config {
    pub ollama_base_url: String,
    pub embed_model: String,
    pub vision_model: String,
    pub groq_base_url: String,
    pub groq_api_key: String,
    pub groq_model: String,
    pub corpus_db_path: String,
    pub top_k: usize,
    pub request_timeout_secs: u64,
    pub report_dir: String,
}

impl Config {
    pub fn load() -> Self {
        dotenv().ok();
        Self {
            ollama_base_url: env::var("OLLAMA_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:11434".to_string()),
            embed_model: env::var("EMBED_MODEL")
                .unwrap_or_else(|_| "embeddinggemma".to_string()),
            vision_model: env::var("VISION_MODEL")
                .unwrap_or_else(|_| "llama3.2-vision".to_string()),
            groq_base_url: env::var("GROQ_BASE_URL")
                .unwrap_or_else(|_| "https://api.groq.com".to_string()),
            // An empty key surfaces as a provider error at call time, not
            // at load time.
            groq_api_key: env::var("GROQ_API_KEY").unwrap_or_default(),
            groq_model: env::var("GROQ_MODEL")
                .unwrap_or_else(|_| "llama-3.3-70b-versatile".to_string()),
            corpus_db_path: env::var("CORPUS_DB").unwrap_or_else(|_| "corpus.db".to_string()),
            top_k: env::var("TOP_K")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(120),
            report_dir: env::var("REPORT_DIR").unwrap_or_else(|_| "outputs".to_string()),
        }
    }
}
