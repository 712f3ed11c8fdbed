use async_trait::async_trait;
use thiserror::Error;

/// Sampling options forwarded with every completion call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompletionOptions {
    pub temperature: f64,
    pub max_tokens: u32,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self { temperature: 0.7, max_tokens: 1024 }
    }
}

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion transport failure: {0}")]
    Transport(String),
    #[error("completion service returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("completion response carried no text content")]
    EmptyResponse,
}

/// Abstract text-completion backend. The engine always expects the returned
/// text to parse into a per-task JSON schema; parse failures are handled at
/// the task boundary, not here.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(
        &self,
        system_context: &str,
        instruction: &str,
        options: &CompletionOptions,
    ) -> Result<String, CompletionError>;
}
