use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails with a descriptive error if required variables are missing;
/// there is deliberately no fallback for either API credential.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub embeddings_api_key: String,
    pub embeddings_api_url: String,
    pub port: u16,
    pub rust_log: String,
}

const DEFAULT_EMBEDDINGS_API_URL: &str = "https://api.openai.com/v1/embeddings";

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            embeddings_api_key: require_env("EMBEDDINGS_API_KEY")?,
            embeddings_api_url: std::env::var("EMBEDDINGS_API_URL")
                .unwrap_or_else(|_| DEFAULT_EMBEDDINGS_API_URL.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
