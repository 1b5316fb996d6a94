use std::fmt;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::error::GeminiError;
use crate::schema::{GenerateContentRequest, GenerateContentResponse};

/// Public Gemini REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Thin client for the Gemini `generateContent` REST call.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, GeminiError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("paperlens/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Build a client only when a non-blank key is configured.
    pub fn from_optional_key(api_key: Option<&str>) -> Result<Option<Self>, GeminiError> {
        match api_key.map(str::trim).filter(|k| !k.is_empty()) {
            Some(key) => Self::new(key).map(Some),
            None => Ok(None),
        }
    }

    /// Point the client at a different host (proxies, local mocks).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a single-prompt `generateContent` request and return the first
    /// candidate's text.
    ///
    /// No retry. A non-success status surfaces the response body as
    /// [`GeminiError::Api`].
    pub async fn generate_content(&self, model: &str, prompt: &str) -> Result<String, GeminiError> {
        let url = format!(
            "{}/v1beta/models/{model}:generateContent",
            self.base_url.trim_end_matches('/')
        );
        let started = Instant::now();

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await?;

        let status = response.status();
        info!(
            model,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "gemini responded"
        );

        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(err) => {
                    warn!(
                        model,
                        status = status.as_u16(),
                        error = %err,
                        "failed to read gemini error body"
                    );
                    String::new()
                }
            };
            warn!(model, status = status.as_u16(), "gemini call failed");
            return Err(GeminiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let decoded: GenerateContentResponse = serde_json::from_slice(&bytes).map_err(|e| {
            GeminiError::SchemaViolation(format!("not a generateContent response: {e}"))
        })?;

        decoded.into_text()
    }

    /// [`generate_content`](Self::generate_content) bounded by a wall-clock
    /// deadline. The in-flight request is dropped when the deadline passes.
    pub async fn generate_content_within(
        &self,
        model: &str,
        prompt: &str,
        deadline: Duration,
    ) -> Result<String, GeminiError> {
        tokio::time::timeout(deadline, self.generate_content(model, prompt))
            .await
            .map_err(|_| GeminiError::Timeout { deadline })?
    }
}

impl fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("api_key", &redact_key(&self.api_key))
            .finish()
    }
}

fn redact_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let prefix: String = chars[..4].iter().collect();
    let suffix: String = chars[chars.len() - 4..].iter().collect();
    format!("{prefix}...{suffix}")
}
