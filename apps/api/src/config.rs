use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Panics at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    /// API key for the hosted chat-completion service. Optional: when absent
    /// the LLM-backed endpoints fail with a "not configured" message instead
    /// of preventing startup.
    pub llm_api_key: Option<String>,
    pub llm_base_url: String,
    pub llm_model: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            jwt_secret: require_env("JWT_SECRET")?,
            llm_api_key: std::env::var("LLM_API_KEY").ok().filter(|k| !k.is_empty()),
            llm_base_url: std::env::var("LLM_BASE_URL")
                .unwrap_or_else(|_| crate::llm_client::DEFAULT_BASE_URL.to_string()),
            llm_model: std::env::var("LLM_MODEL")
                .unwrap_or_else(|_| crate::llm_client::DEFAULT_MODEL.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "4000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
