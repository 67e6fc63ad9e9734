//! GenerationClient trait — the abstraction over the external completion API.
//!
//! A GenerationClient knows how to send a rendered prompt as a single user
//! turn and extract the primary text output. The pipeline calls `generate()`
//! without knowing which backend is in use, so tests substitute a fake.

use crate::error::GenerationError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Fixed fallback text substituted when the API call succeeds but yields no
/// usable candidate text. Deliberate soft degradation, not a failure.
pub const NO_RESPONSE_SENTINEL: &str = "No response from Gemini";

/// Fixed generation parameters sent with every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// The model identifier (e.g., "gemini-2.5-flash").
    pub model: String,

    /// Low temperature keeps answers grounded in the supplied context.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate.
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

fn default_temperature() -> f32 {
    0.2
}

fn default_max_output_tokens() -> u32 {
    10_000
}

impl GenerationConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

/// The external completion endpoint, reduced to the one call the pipeline
/// needs.
///
/// Contract: `Ok(text)` carries either the extracted candidate text or
/// [`NO_RESPONSE_SENTINEL`] when the call succeeded with no usable output.
/// `Err` is reserved for transport-level and non-2xx failures, which
/// propagate to the caller unrecovered — no retries anywhere.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// A human-readable name for this backend (e.g., "gemini").
    fn name(&self) -> &str;

    /// Send the prompt as the sole user turn and return the primary text.
    async fn generate(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> std::result::Result<String, GenerationError>;
}
