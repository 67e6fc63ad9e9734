//! Google Gemini `generateContent` client.
//!
//! Gemini-specific wire details:
//! - Auth via `?key=API_KEY` query parameter (not header-based)
//! - Request carries `contents` (role + parts) and a `generationConfig`
//! - Response text lives at `candidates[0].content.parts[0].text`
//!
//! A successful call with no usable candidate text degrades to the fixed
//! sentinel string rather than failing; only transport and non-2xx failures
//! surface as errors.

use async_trait::async_trait;
use lectern_core::error::GenerationError;
use lectern_core::generation::{GenerationClient, GenerationConfig, NO_RESPONSE_SENTINEL};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Client for the Gemini generation API.
pub struct GeminiClient {
    name: String,
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl GeminiClient {
    /// Create a new Gemini client with a bounded request timeout.
    pub fn new(api_key: impl Into<String>, timeout_secs: u64) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .connect_timeout(std::time::Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| GenerationError::Network(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            name: "gemini".into(),
            base_url: DEFAULT_BASE_URL.into(),
            api_key: api_key.into(),
            client,
        })
    }

    /// Create with a custom base URL (e.g., for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn build_request_body(prompt: &str, config: &GenerationConfig) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: "user".into(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: RequestGenerationConfig {
                temperature: config.temperature,
                max_output_tokens: config.max_output_tokens,
            },
        }
    }

    /// Pull the first candidate's first text part out of a parsed response.
    fn extract_text(response: GenerateContentResponse) -> Option<String> {
        response
            .candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
            .filter(|t| !t.is_empty())
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<String, GenerationError> {
        let url = format!(
            "{}/v1/models/{}:generateContent?key={}",
            self.base_url, config.model, self.api_key
        );
        let body = Self::build_request_body(prompt, config);

        debug!(model = %config.model, prompt_chars = prompt.len(), "Sending generation request");

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Gemini API error");
            return Err(GenerationError::Api {
                status_code: status,
                message: error_body,
            });
        }

        // A 2xx with an unparseable or empty payload is soft degradation,
        // not a failure: substitute the sentinel and carry on.
        let raw = response
            .text()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?;
        let text = match serde_json::from_str::<GenerateContentResponse>(&raw) {
            Ok(parsed) => Self::extract_text(parsed),
            Err(e) => {
                warn!(error = %e, "Unparseable Gemini response payload");
                None
            }
        };

        Ok(text.unwrap_or_else(|| {
            debug!("No usable candidate text; substituting sentinel");
            NO_RESPONSE_SENTINEL.to_string()
        }))
    }
}

// --- Gemini API types ---

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: RequestGenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct RequestGenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor() {
        let client = GeminiClient::new("test-key", 120).unwrap();
        assert_eq!(client.name(), "gemini");
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn constructor_with_base_url() {
        let client = GeminiClient::new("test-key", 120)
            .unwrap()
            .with_base_url("http://localhost:9090/");
        assert_eq!(client.base_url, "http://localhost:9090");
    }

    #[test]
    fn request_body_shape() {
        let config = GenerationConfig::new("gemini-2.5-flash");
        let body = GeminiClient::build_request_body("What is on the syllabus?", &config);
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(
            json["contents"][0]["parts"][0]["text"],
            "What is on the syllabus?"
        );
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 10_000);
        let temperature = json["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temperature - 0.2).abs() < 1e-6);
    }

    #[test]
    fn extract_text_from_well_formed_response() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{
                "candidates": [
                    {"content": {"parts": [{"text": "Per the syllabus file, the midterm is Oct 26."}]}}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(
            GeminiClient::extract_text(response).as_deref(),
            Some("Per the syllabus file, the midterm is Oct 26.")
        );
    }

    #[test]
    fn empty_candidates_yield_no_text() {
        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert_eq!(GeminiClient::extract_text(response), None);
    }

    #[test]
    fn missing_candidates_field_yields_no_text() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(GeminiClient::extract_text(response), None);
    }

    #[test]
    fn empty_text_part_yields_no_text() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": ""}]}}]}"#,
        )
        .unwrap();
        assert_eq!(GeminiClient::extract_text(response), None);
    }

    #[test]
    fn candidate_without_content_yields_no_text() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates": [{"finishReason": "SAFETY"}]}"#,
        )
        .unwrap();
        assert_eq!(GeminiClient::extract_text(response), None);
    }
}
