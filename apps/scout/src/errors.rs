use thiserror::Error;

/// Classified failure modes of a single description resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("listing has an empty id")]
    InvalidInput,

    #[error("rate limited by listing source")]
    RateLimited,

    #[error("listing source returned status {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("listing source returned an empty payload")]
    EmptyResult,

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ResolveError {
    /// Throttling and network-level failures are worth retrying; bad input,
    /// fatal upstream statuses, and empty payloads are not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ResolveError::RateLimited | ResolveError::Transport(_))
    }
}

/// Failure modes of a single oracle evaluation call.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("oracle returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("oracle returned an empty completion")]
    EmptyResponse,

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl OracleError {
    pub fn is_retryable(&self) -> bool {
        match self {
            OracleError::Transport(_) => true,
            OracleError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Cache access failures. Always non-fatal to resolution: a failed read is
/// treated as a miss, a failed write is logged and ignored.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("cache serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
