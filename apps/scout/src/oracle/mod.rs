#![allow(dead_code)]

//! Evaluation oracle — the single point of entry for all scoring-model calls.
//! Wraps the Ollama chat API behind the `EvaluationOracle` trait so the
//! scoring pool can be driven by scripted oracles in tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::OracleError;
use crate::retry::RetryPolicy;

/// "Score this description against a fixed profile" capability. Returns the
/// raw free-form completion; extraction and cleanup happen in `scoring`.
#[async_trait]
pub trait EvaluationOracle: Send + Sync {
    async fn evaluate(&self, system: &str, prompt: &str) -> Result<String, OracleError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub model: String,
    pub created_at: DateTime<Utc>,
    pub message: ResponseMessage,
    pub done: bool,
    #[serde(default)]
    pub total_duration: i64,
    #[serde(default)]
    pub eval_count: i64,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub role: String,
    pub content: String,
}

/// Ollama-backed oracle. Model, temperature, and retry policy are fixed at
/// construction from the application config.
pub struct OllamaClient {
    client: Client,
    url: String,
    model: String,
    temperature: f64,
    retry: RetryPolicy,
}

impl OllamaClient {
    pub fn new(url: String, model: String, temperature: f64, retry: RetryPolicy) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(300))
                .build()
                .expect("Failed to build HTTP client"),
            url,
            model,
            temperature,
            retry,
        }
    }

    async fn call_once(&self, system: &str, prompt: &str) -> Result<String, OracleError> {
        let request = ChatRequest {
            model: &self.model,
            stream: false,
            temperature: Some(self.temperature),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let response = self.client.post(&self.url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OracleError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let chat: ChatResponse = response.json().await?;
        debug!(
            model = %chat.model,
            eval_count = chat.eval_count,
            total_duration_ns = chat.total_duration,
            "oracle call succeeded"
        );

        if chat.message.content.trim().is_empty() {
            return Err(OracleError::EmptyResponse);
        }
        Ok(chat.message.content)
    }
}

#[async_trait]
impl EvaluationOracle for OllamaClient {
    async fn evaluate(&self, system: &str, prompt: &str) -> Result<String, OracleError> {
        self.retry
            .run("oracle call", OracleError::is_retryable, || {
                self.call_once(system, prompt)
            })
            .await
    }
}
