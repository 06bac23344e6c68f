//! Server configuration from environment variables.

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Socket address to bind, e.g. `127.0.0.1:8080`.
    pub listen_addr: String,
    /// LLM provider id: "groq", "ollama", or any OpenAI-compatible id.
    pub ai_provider: String,
    pub ai_model: String,
    pub ai_api_key: Option<String>,
    /// Base URL override for self-hosted providers (ollama).
    pub ai_base_url: Option<String>,
    /// Exchange suffix appended to bare symbols for quote lookups.
    pub exchange_suffix: String,
    /// Currency label attached to quotes.
    pub quote_currency: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            listen_addr: env_or("FOLIO_LISTEN_ADDR", "127.0.0.1:8080"),
            ai_provider: env_or("FOLIO_AI_PROVIDER", "groq"),
            ai_model: env_or("FOLIO_AI_MODEL", "llama-3.1-8b-instant"),
            ai_api_key: std::env::var("FOLIO_AI_API_KEY")
                .or_else(|_| std::env::var("GROQ_API_KEY"))
                .ok(),
            ai_base_url: std::env::var("FOLIO_AI_BASE_URL").ok(),
            exchange_suffix: env_or("FOLIO_EXCHANGE_SUFFIX", ".NS"),
            quote_currency: env_or("FOLIO_QUOTE_CURRENCY", "INR"),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
