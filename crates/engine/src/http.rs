//! HTTP adapter for the completion client. Speaks the OpenAI-compatible
//! chat-completions shape (openai, ollama) and the Anthropic messages shape.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde_json::{json, Value};

use wayfarer_core::config::{CompletionConfig, CompletionProvider};

use crate::completion::{CompletionClient, CompletionError, CompletionOptions};

const OPENAI_DEFAULT_BASE_URL: &str = "https://api.openai.com";
const ANTHROPIC_DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";

pub struct HttpCompletionClient {
    http: reqwest::Client,
    config: CompletionConfig,
}

impl HttpCompletionClient {
    pub fn new(config: CompletionConfig) -> Result<Self, CompletionError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        Ok(Self { http, config })
    }

    fn endpoint(&self) -> String {
        match self.config.provider {
            CompletionProvider::OpenAi => {
                let base =
                    self.config.base_url.as_deref().unwrap_or(OPENAI_DEFAULT_BASE_URL);
                format!("{}/v1/chat/completions", base.trim_end_matches('/'))
            }
            CompletionProvider::Ollama => {
                let base = self.config.base_url.as_deref().unwrap_or("http://localhost:11434");
                format!("{}/v1/chat/completions", base.trim_end_matches('/'))
            }
            CompletionProvider::Anthropic => {
                let base =
                    self.config.base_url.as_deref().unwrap_or(ANTHROPIC_DEFAULT_BASE_URL);
                format!("{}/v1/messages", base.trim_end_matches('/'))
            }
        }
    }

    fn request_body(
        &self,
        system_context: &str,
        instruction: &str,
        options: &CompletionOptions,
    ) -> Value {
        match self.config.provider {
            CompletionProvider::OpenAi | CompletionProvider::Ollama => json!({
                "model": self.config.model,
                "temperature": options.temperature,
                "max_tokens": options.max_tokens,
                "messages": [
                    { "role": "system", "content": system_context },
                    { "role": "user", "content": instruction },
                ],
            }),
            CompletionProvider::Anthropic => json!({
                "model": self.config.model,
                "temperature": options.temperature,
                "max_tokens": options.max_tokens,
                "system": system_context,
                "messages": [
                    { "role": "user", "content": instruction },
                ],
            }),
        }
    }

    fn extract_text(&self, body: &Value) -> Result<String, CompletionError> {
        let text = match self.config.provider {
            CompletionProvider::OpenAi | CompletionProvider::Ollama => body
                .pointer("/choices/0/message/content")
                .and_then(Value::as_str),
            CompletionProvider::Anthropic => {
                body.pointer("/content/0/text").and_then(Value::as_str)
            }
        };

        text.map(str::to_string).ok_or(CompletionError::EmptyResponse)
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn complete(
        &self,
        system_context: &str,
        instruction: &str,
        options: &CompletionOptions,
    ) -> Result<String, CompletionError> {
        let mut request = self
            .http
            .post(self.endpoint())
            .json(&self.request_body(system_context, instruction, options));

        if let Some(api_key) = &self.config.api_key {
            request = match self.config.provider {
                CompletionProvider::Anthropic => request
                    .header("x-api-key", api_key.expose_secret())
                    .header("anthropic-version", ANTHROPIC_VERSION),
                _ => request.bearer_auth(api_key.expose_secret()),
            };
        }

        let response =
            request.send().await.map_err(|e| CompletionError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Status { status: status.as_u16(), body });
        }

        let body: Value =
            response.json().await.map_err(|e| CompletionError::Transport(e.to_string()))?;
        self.extract_text(&body)
    }
}
