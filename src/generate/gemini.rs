//! Chapter text generation via the Gemini generateContent API.

use crate::error::{ChapterizeError, Result};
use crate::generate::ChapterGenerator;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Default Gemini API base URL.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model; handles long transcripts and strict formatting well.
pub const DEFAULT_MODEL: &str = "gemini-1.5-pro-latest";

/// Maximum retries for API calls.
const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (milliseconds).
const BASE_DELAY_MS: u64 = 1000;

/// Google Gemini text generation client.
pub struct GeminiGenerator {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiGenerator {
    /// Create a new Gemini generator with the given API key.
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Set a different model (e.g., "gemini-2.0-flash").
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the API base URL, mainly for tests against a mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }

    /// Call the generateContent endpoint with retries on transport and
    /// server errors. Client errors are returned immediately.
    async fn call_generate_content(&self, request: &GenerateContentRequest) -> Result<String> {
        let url = self.endpoint();

        let mut last_error = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = BASE_DELAY_MS * 2u64.pow(attempt - 1);
                debug!("Retry attempt {} after {}ms delay", attempt, delay);
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }

            let response = self
                .client
                .post(&url)
                .header("Content-Type", "application/json")
                .json(request)
                .send()
                .await;

            match response {
                Ok(resp) => {
                    let status = resp.status();
                    debug!("Gemini API response status: {}", status);

                    if status.is_success() {
                        let body = resp.text().await?;
                        let sample: String = body.chars().take(500).collect();
                        debug!("Gemini API response: {}", sample);
                        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;

                        if let Some(error) = parsed.error {
                            return Err(ChapterizeError::Api(format!(
                                "Gemini error: {}",
                                error.message
                            )));
                        }

                        return Ok(extract_text(parsed));
                    }

                    let error_body = resp.text().await.unwrap_or_default();

                    // Don't retry on client errors
                    if status.as_u16() >= 400 && status.as_u16() < 500 {
                        return Err(ChapterizeError::Api(format!(
                            "Gemini API error ({}): {}",
                            status, error_body
                        )));
                    }

                    warn!("Gemini API server error ({}): {}", status, error_body);
                    last_error = Some(ChapterizeError::Api(format!(
                        "Gemini API server error: {}",
                        status
                    )));
                }
                Err(e) => {
                    warn!("Gemini API request failed: {}", e);
                    last_error = Some(e.into());
                }
            }
        }

        Err(last_error.unwrap_or_else(|| ChapterizeError::Api("Unknown error".to_string())))
    }
}

/// Concatenate all text parts of the first candidate, in arrival order,
/// trimmed of surrounding whitespace.
fn extract_text(response: GenerateContentResponse) -> String {
    let text = response
        .candidates
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|p| p.text)
        .collect::<String>();

    text.trim().to_string()
}

#[async_trait]
impl ChapterGenerator for GeminiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        if self.api_key.is_empty() {
            return Err(ChapterizeError::Generation(
                "Gemini API key is not set".to_string(),
            ));
        }

        debug!(
            "Generating chapters with model {} ({} char prompt)",
            self.model,
            prompt.len()
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("text/plain".to_string()),
            }),
        };

        let text = self.call_generate_content(&request).await?;

        debug!("Gemini returned {} chars of chapter text", text.len());

        Ok(text)
    }

    fn name(&self) -> &'static str {
        "Google Gemini"
    }
}

// Request/Response types

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
}

#[derive(Deserialize, Debug)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Deserialize, Debug)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ApiError {
    message: String,
}
