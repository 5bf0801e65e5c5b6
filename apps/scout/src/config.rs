use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Required variables are validated at startup, before any work is scheduled.
#[derive(Debug, Clone)]
pub struct Config {
    pub scrapingdog_api_key: String,
    pub redis_url: String,
    pub ollama_url: String,
    pub ollama_model: String,
    pub ollama_temperature: f64,
    pub profile_path: String,
    pub email: Option<EmailConfig>,
    pub pipeline: PipelineConfig,
    pub rust_log: String,
}

/// Tunables for both pipeline stages. Injected into the pools at construction
/// time — worker bodies never read the environment themselves.
#[derive(Debug, Clone, Copy)]
pub struct PipelineConfig {
    /// Concurrent in-flight description resolutions.
    pub max_concurrent_resolutions: usize,
    /// Minimum interval between external description requests across all slots.
    pub rate_gate_interval: Duration,
    /// Concurrent in-flight oracle evaluations.
    pub max_concurrent_evaluations: usize,
    /// Attempt ceiling shared by resolution and oracle calls.
    pub max_retries: u32,
    /// Base backoff delay; attempt N sleeps N * base before retrying.
    pub retry_base_delay: Duration,
    /// Lifetime of a cached description.
    pub cache_ttl: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_concurrent_resolutions: 2,
            rate_gate_interval: Duration::from_secs(2),
            max_concurrent_evaluations: 1,
            max_retries: 5,
            retry_base_delay: Duration::from_secs(2),
            cache_ttl: Duration::from_secs(24 * 60 * 60),
        }
    }
}

/// SMTP delivery settings. Only constructed when the full set of email
/// variables is present; otherwise email dispatch is skipped.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub from: String,
    pub to: String,
    pub password: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            scrapingdog_api_key: require_env("SCRAPINGDOG_API_KEY")?,
            redis_url: require_env("REDIS_URL")?,
            ollama_url: std::env::var("OLLAMA_URL")
                .unwrap_or_else(|_| "http://localhost:11434/api/chat".to_string()),
            ollama_model: std::env::var("OLLAMA_MODEL")
                .unwrap_or_else(|_| "gemma3:1b".to_string()),
            ollama_temperature: match std::env::var("OLLAMA_TEMP") {
                Ok(t) => t
                    .parse::<f64>()
                    .context("OLLAMA_TEMP must be a valid float")?,
                Err(_) => 0.3,
            },
            profile_path: std::env::var("PROFILE_PATH")
                .unwrap_or_else(|_| "resume.txt".to_string()),
            email: EmailConfig::from_env()?,
            pipeline: PipelineConfig::default(),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

impl EmailConfig {
    /// Returns `None` when no email variables are set at all; errors when the
    /// configuration is only partially present.
    fn from_env() -> Result<Option<Self>> {
        let vars = ["EMAIL_FROM", "EMAIL_TO", "SMTP_HOST", "EMAIL_PASSWORD"];
        let present: Vec<&str> = vars
            .iter()
            .copied()
            .filter(|v| std::env::var(v).is_ok())
            .collect();

        if present.is_empty() {
            return Ok(None);
        }
        if present.len() < vars.len() {
            anyhow::bail!(
                "Partial email configuration: set all of {} or none",
                vars.join(", ")
            );
        }

        Ok(Some(EmailConfig {
            smtp_host: require_env("SMTP_HOST")?,
            smtp_port: match std::env::var("SMTP_PORT") {
                Ok(p) => p
                    .parse::<u16>()
                    .context("SMTP_PORT must be a valid port number")?,
                Err(_) => 587,
            },
            from: require_env("EMAIL_FROM")?,
            to: require_env("EMAIL_TO")?,
            password: require_env("EMAIL_PASSWORD")?,
        }))
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
