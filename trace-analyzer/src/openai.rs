use async_trait::async_trait;
use std::fmt::{Debug, Formatter};
use thiserror::Error;
use tracing::{debug, instrument};

pub const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
const BODY_SAMPLE_CHAR_LIMIT: usize = 2048;

/// One request/response exchange with the language model backend. Narrow on
/// purpose so the summarizer and batch analyzer can run against a scripted
/// implementation in tests.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn complete(&self, system_role: &str, user_prompt: &str)
        -> Result<String, BackendError>;
}

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("model backend request failed. Context: {context}")]
    Http {
        #[source]
        source: reqwest::Error,
        context: String,
    },
    #[error("unexpected model backend response. Context: {context}\n{body_sample}")]
    UnexpectedResponse { context: String, body_sample: String },
}

impl BackendError {
    fn from_reqwest_error<S: Into<String>>(source: reqwest::Error, context: S) -> Self {
        Self::Http {
            source,
            context: context.into(),
        }
    }
}

/// Sampling parameters are fixed per client, never negotiated per call.
#[derive(Clone, clap::Parser)]
pub struct OpenAiConfig {
    #[clap(long, env = "OPENAI_API_KEY")]
    pub openai_api_key: String,
    #[clap(long, env, default_value = "gpt-3.5-turbo")]
    pub model: String,
    #[clap(long, env, default_value_t = 0.7)]
    pub temperature: f64,
    #[clap(long, env, default_value_t = 500)]
    pub max_output_tokens: u32,
}

impl Debug for OpenAiConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field(
                "openai_api_key",
                &self.openai_api_key.chars().take(5).collect::<String>(),
            )
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .finish()
    }
}

pub struct OpenAiClient {
    client: reqwest::Client,
    config: OpenAiConfig,
    url: String,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, BackendError> {
        let client = reqwest::ClientBuilder::new()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| BackendError::from_reqwest_error(e, "building reqwest client"))?;
        Ok(Self {
            client,
            config,
            url: CHAT_COMPLETIONS_URL.to_string(),
        })
    }
}

#[derive(serde::Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f64,
    max_tokens: u32,
}

#[derive(serde::Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(serde::Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatCompletionChoice>,
}

#[derive(serde::Deserialize)]
struct ChatCompletionChoice {
    message: AssistantMessage,
}

#[derive(serde::Deserialize)]
struct AssistantMessage {
    content: String,
}

#[async_trait]
impl ModelClient for OpenAiClient {
    /// No retry logic here, callers decide whether a failed call is worth
    /// retrying. The returned content is whitespace-trimmed.
    #[instrument(skip_all)]
    async fn complete(
        &self,
        system_role: &str,
        user_prompt: &str,
    ) -> Result<String, BackendError> {
        let request = ChatCompletionRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system_role,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_output_tokens,
        };
        debug!("Sending completion request of {} chars", user_prompt.len());
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.config.openai_api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| BackendError::from_reqwest_error(e, "sending chat completion request"))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| {
            BackendError::from_reqwest_error(e, "reading chat completion response body")
        })?;
        if !status.is_success() {
            return Err(BackendError::UnexpectedResponse {
                context: format!("chat completion returned status {status}"),
                body_sample: truncate_body(&body),
            });
        }
        let parsed: ChatCompletionResponse =
            serde_json::from_str(&body).map_err(|e| BackendError::UnexpectedResponse {
                context: format!("decoding chat completion response: {e}"),
                body_sample: truncate_body(&body),
            })?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| BackendError::UnexpectedResponse {
                context: "chat completion response contained no choices".to_string(),
                body_sample: truncate_body(&body),
            })?;
        Ok(content.trim().to_string())
    }
}

fn truncate_body(body: &str) -> String {
    body.chars().take(BODY_SAMPLE_CHAR_LIMIT).collect()
}
