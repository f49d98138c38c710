//! Completion Client Adapters
//!
//! The pipeline talks to the language model through the `CompletionClient`
//! trait only. A call takes a finished prompt and yields a `CompletionResult`,
//! whose shape varies by provider: it may carry a direct `text` field, a list
//! of ranked candidates with nested content parts, or neither.

use crate::error::UpstreamFailure;
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs},
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// A single text fragment of a candidate's content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentPart {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ContentPart>,
}

/// One ranked completion candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

impl Candidate {
    /// A candidate holding a single text part.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            content: Some(CandidateContent {
                parts: vec![ContentPart {
                    text: Some(text.into()),
                }],
            }),
        }
    }
}

/// The raw result of a completion call, before normalization.
///
/// Deserializes directly from a Gemini `generateContent` response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionResult {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl CompletionResult {
    /// A result exposing only the direct text field.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            candidates: Vec::new(),
        }
    }
}

/// A single-shot text completion service.
///
/// Implementations bound their own latency and report timeouts, transport
/// errors and undecodable payloads as `UpstreamFailure`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<CompletionResult, UpstreamFailure>;
}

// --- Gemini (native REST) ---

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

/// Calls Gemini's `generateContent` endpoint directly over HTTPS.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl GeminiClient {
    /// Creates a new Gemini client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - The Gemini API key, sent in the `x-goog-api-key` header.
    /// * `model` - The model identifier (e.g., "gemini-2.5-flash-lite").
    /// * `timeout` - Upper bound for a whole request, connect through body.
    pub fn new(api_key: String, model: String, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_key,
            model,
            base_url: GEMINI_API_BASE.to_string(),
            timeout,
        })
    }

    /// Points the client at a different API base (proxies, regional endpoints).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn map_err(&self, err: reqwest::Error) -> UpstreamFailure {
        if err.is_timeout() {
            UpstreamFailure::Timeout(self.timeout.as_secs())
        } else {
            err.into()
        }
    }
}

#[async_trait]
impl CompletionClient for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<CompletionResult, UpstreamFailure> {
        let body = GenerateContentRequest {
            contents: [RequestContent {
                role: "user",
                parts: [RequestPart { text: prompt }],
            }],
        };

        debug!(model = %self.model, prompt_len = prompt.len(), "Sending generateContent request");
        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_err(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamFailure::Status {
                status: status.as_u16(),
                body: body.chars().take(512).collect(),
            });
        }

        let raw = response.text().await.map_err(|e| self.map_err(e))?;
        parse_gemini_response(&raw)
    }
}

/// Decodes a `generateContent` body into a `CompletionResult`.
pub fn parse_gemini_response(raw: &str) -> Result<CompletionResult, UpstreamFailure> {
    serde_json::from_str(raw).map_err(|e| UpstreamFailure::Malformed(e.to_string()))
}

// --- OpenAI-compatible chat completions ---

/// A `CompletionClient` for any OpenAI-compatible chat completions API,
/// including Gemini's OpenAI compatibility endpoint.
pub struct OpenAICompatibleClient {
    client: Client<OpenAIConfig>,
    model: String,
    timeout: Duration,
}

impl OpenAICompatibleClient {
    /// Creates a new client for an OpenAI-compatible service.
    ///
    /// # Arguments
    ///
    /// * `config` - The configuration for the OpenAI client, including API key and base URL.
    /// * `model` - The model identifier to use for chat completions (e.g., "gpt-4o").
    /// * `timeout` - Upper bound for one completion call.
    pub fn new(config: OpenAIConfig, model: String, timeout: Duration) -> Self {
        Self {
            client: Client::with_config(config),
            model,
            timeout,
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAICompatibleClient {
    async fn complete(&self, prompt: &str) -> Result<CompletionResult, UpstreamFailure> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![
                ChatCompletionRequestUserMessageArgs::default()
                    .content(prompt)
                    .build()?
                    .into(),
            ])
            .build()?;

        debug!(model = %self.model, prompt_len = prompt.len(), "Sending chat completion request");
        let response = tokio::time::timeout(self.timeout, self.client.chat().create(request))
            .await
            .map_err(|_| UpstreamFailure::Timeout(self.timeout.as_secs()))??;

        Ok(completion_from_choices(
            response.choices.into_iter().map(|choice| choice.message.content),
        ))
    }
}

/// Maps chat choice contents, in ranked order, onto candidates.
///
/// A choice without content becomes an empty candidate so ranks are preserved.
fn completion_from_choices(contents: impl IntoIterator<Item = Option<String>>) -> CompletionResult {
    let candidates = contents
        .into_iter()
        .map(|content| match content {
            Some(content) => Candidate::from_text(content),
            None => Candidate::default(),
        })
        .collect();

    CompletionResult {
        text: None,
        candidates,
    }
}
