// lib/src/insights/summarizer.rs

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

use models::errors::{TrialError, TrialResult};

use super::errors::{SummaryError, SummaryResult};
use super::prompt::SYSTEM_PROMPT;
use crate::config::SummarizerConfig;

/// A text-generation service that turns a rendered prompt into a summary.
#[async_trait]
pub trait Summarizer: Send + Sync + Debug {
    fn get_type(&self) -> &'static str;

    async fn summarize(&self, prompt: &str) -> SummaryResult<String>;
}

/// Stand-in used when no service is configured. Every call fails upstream.
#[derive(Debug, Clone, Default)]
pub struct DisabledSummarizer;

#[async_trait]
impl Summarizer for DisabledSummarizer {
    fn get_type(&self) -> &'static str {
        "Disabled"
    }

    async fn summarize(&self, _prompt: &str) -> SummaryResult<String> {
        Err(SummaryError::Upstream("summarization service is not configured".to_string()))
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for an OpenAI-compatible `chat/completions` endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiSummarizer {
    client: Client,
    url: String,
    model: String,
    temperature: f32,
    api_key: String,
}

impl OpenAiSummarizer {
    pub fn new(config: &SummarizerConfig, api_key: String) -> TrialResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TrialError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(OpenAiSummarizer {
            client,
            url: format!("{}/chat/completions", config.endpoint.trim_end_matches('/')),
            model: config.model.clone(),
            temperature: config.temperature,
            api_key,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Summarizer for OpenAiSummarizer {
    fn get_type(&self) -> &'static str {
        "OpenAi"
    }

    async fn summarize(&self, prompt: &str) -> SummaryResult<String> {
        let body = ChatCompletionRequest {
            model: &self.model,
            temperature: self.temperature,
            messages: vec![
                ChatMessage { role: "system", content: SYSTEM_PROMPT },
                ChatMessage { role: "user", content: prompt },
            ],
        };

        debug!("Sending {} byte prompt to {}", prompt.len(), self.url);
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| SummaryError::Upstream(format!("request to {} failed: {}", self.url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(SummaryError::Upstream(format!("status {}: {}", status, text)));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| SummaryError::Upstream(format!("invalid completion body: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(SummaryError::EmptyOutput)
    }
}

/// Builds the summarizer named by `config.kind`.
///
/// An `openai` summarizer whose key variable is unset or blank falls back to
/// [`DisabledSummarizer`] with a warning.
pub fn build_summarizer(config: &SummarizerConfig) -> TrialResult<Arc<dyn Summarizer>> {
    match config.kind.to_lowercase().as_str() {
        "disabled" | "none" => {
            info!("AI summaries are disabled by configuration");
            Ok(Arc::new(DisabledSummarizer))
        }
        "openai" => match env::var(&config.api_key_env) {
            Ok(key) if !key.trim().is_empty() => {
                let summarizer = OpenAiSummarizer::new(config, key.trim().to_string())?;
                info!("Using summarizer at {} with model {}", summarizer.url(), config.model);
                Ok(Arc::new(summarizer))
            }
            _ => {
                warn!("{} is not set, AI summaries are disabled", config.api_key_env);
                Ok(Arc::new(DisabledSummarizer))
            }
        },
        other => Err(TrialError::ConfigError(format!("Unknown summarizer kind: {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};
    use tokio::net::TcpListener;

    async fn spawn_endpoint(status: StatusCode, body: Value) -> String {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(move |Json(request): Json<Value>| {
                let body = body.clone();
                async move {
                    assert_eq!(request["messages"][0]["role"], "system");
                    assert_eq!(request["messages"][1]["role"], "user");
                    (status, Json(body))
                }
            }),
        );
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/v1", addr)
    }

    fn summarizer_for(endpoint: String) -> OpenAiSummarizer {
        let config = SummarizerConfig { endpoint, timeout_secs: 5, ..Default::default() };
        OpenAiSummarizer::new(&config, "test-key".to_string()).unwrap()
    }

    #[tokio::test]
    async fn should_return_completion_text() {
        let endpoint = spawn_endpoint(
            StatusCode::OK,
            json!({"choices": [{"message": {"role": "assistant", "content": "  Mostly mild events.  "}}]}),
        )
        .await;
        let summary = summarizer_for(endpoint).summarize("prompt").await.unwrap();
        assert_eq!(summary, "Mostly mild events.");
    }

    #[tokio::test]
    async fn should_report_empty_output() {
        let endpoint = spawn_endpoint(StatusCode::OK, json!({"choices": []})).await;
        let err = summarizer_for(endpoint).summarize("prompt").await.unwrap_err();
        assert!(matches!(err, SummaryError::EmptyOutput));

        let endpoint = spawn_endpoint(
            StatusCode::OK,
            json!({"choices": [{"message": {"role": "assistant", "content": "   "}}]}),
        )
        .await;
        let err = summarizer_for(endpoint).summarize("prompt").await.unwrap_err();
        assert!(matches!(err, SummaryError::EmptyOutput));
    }

    #[tokio::test]
    async fn should_report_upstream_status_failure() {
        let endpoint =
            spawn_endpoint(StatusCode::INTERNAL_SERVER_ERROR, json!({"error": "overloaded"})).await;
        let err = summarizer_for(endpoint).summarize("prompt").await.unwrap_err();
        assert!(matches!(err, SummaryError::Upstream(msg) if msg.contains("500")));
    }

    #[tokio::test]
    async fn should_report_unreachable_service() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let err = summarizer_for(format!("http://{}/v1", addr)).summarize("prompt").await.unwrap_err();
        assert!(matches!(err, SummaryError::Upstream(_)));
    }

    #[tokio::test]
    async fn should_always_fail_when_disabled() {
        let err = DisabledSummarizer.summarize("prompt").await.unwrap_err();
        assert!(matches!(err, SummaryError::Upstream(_)));
    }

    #[test]
    fn should_fall_back_to_disabled_without_key() {
        let config = SummarizerConfig {
            api_key_env: "TRIALDASH_TEST_MISSING_KEY".to_string(),
            ..Default::default()
        };
        env::remove_var(&config.api_key_env);
        assert_eq!(build_summarizer(&config).unwrap().get_type(), "Disabled");
    }

    #[test]
    fn should_build_client_when_key_present() {
        let config = SummarizerConfig {
            api_key_env: "TRIALDASH_TEST_PRESENT_KEY".to_string(),
            endpoint: "http://localhost:9999/v1/".to_string(),
            ..Default::default()
        };
        env::set_var(&config.api_key_env, "secret");
        let summarizer = build_summarizer(&config).unwrap();
        assert_eq!(summarizer.get_type(), "OpenAi");
    }

    #[test]
    fn should_reject_unknown_kind() {
        let config = SummarizerConfig { kind: "oracle".to_string(), ..Default::default() };
        assert!(matches!(build_summarizer(&config), Err(TrialError::ConfigError(_))));
    }
}
