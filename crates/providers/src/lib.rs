//! Generation API clients for Lectern.
//!
//! One real backend: Google Gemini's `generateContent` endpoint. The
//! pipeline only ever sees the [`lectern_core::GenerationClient`] trait, so
//! tests swap in fakes without touching the network.

pub mod gemini;

pub use gemini::GeminiClient;

use lectern_config::AppConfig;
use lectern_core::GenerationClient;
use lectern_core::error::GenerationError;
use std::sync::Arc;

/// Build the generation client for this deployment.
///
/// A missing API key is deliberately not an error here: the service still
/// starts (and serves transcript listings), and each generation request is
/// rejected with a configuration error before this client is ever called.
pub fn build_from_config(config: &AppConfig) -> Result<Arc<dyn GenerationClient>, GenerationError> {
    let client = GeminiClient::new(
        config.api_key.clone().unwrap_or_default(),
        config.generation.timeout_secs,
    )?;
    Ok(Arc::new(client))
}
