//! Qualtrics survey sink.
//!
//! Posts one survey response per exchange:
//! `POST https://{datacenter}.qualtrics.com/API/v3/surveys/{survey_id}/responses`
//! with the API token in the `X-API-TOKEN` header. Whatever happens — 2xx,
//! 4xx, network error — becomes a [`SurveyOutcome`], never a pipeline error.

use crate::TelemetryError;
use async_trait::async_trait;
use lectern_config::SurveyConfig;
use lectern_core::survey::{SurveyOutcome, SurveyRecord, SurveySink};
use tracing::{debug, warn};

/// Survey sink backed by the Qualtrics responses API.
pub struct QualtricsSink {
    name: String,
    base_url: String,
    api_token: String,
    survey_id: String,
    client: reqwest::Client,
}

impl QualtricsSink {
    /// Create a new sink with a bounded request timeout.
    pub fn new(config: &SurveyConfig, timeout_secs: u64) -> Result<Self, TelemetryError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| TelemetryError::ClientBuild(e.to_string()))?;

        Ok(Self {
            name: "qualtrics".into(),
            base_url: format!("https://{}.qualtrics.com", config.datacenter),
            api_token: config.api_token.clone(),
            survey_id: config.survey_id.clone(),
            client,
        })
    }

    /// Create with a custom base URL (e.g., for testing).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn build_payload(record: &SurveyRecord) -> serde_json::Value {
        serde_json::json!({
            "values": {
                "responseText": record.response_text,
                "queryText": record.query_text,
            }
        })
    }
}

#[async_trait]
impl SurveySink for QualtricsSink {
    fn name(&self) -> &str {
        &self.name
    }

    async fn record(&self, record: &SurveyRecord) -> SurveyOutcome {
        let url = format!(
            "{}/API/v3/surveys/{}/responses",
            self.base_url, self.survey_id
        );
        let payload = Self::build_payload(record);

        match self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("X-API-TOKEN", &self.api_token)
            .json(&payload)
            .send()
            .await
        {
            Ok(response) => {
                let status = response.status().as_u16();
                debug!(status, "Survey response recorded");
                SurveyOutcome::Status(status)
            }
            Err(e) => {
                warn!(error = %e, "Survey call failed");
                SurveyOutcome::Failed(e.to_string())
            }
        }
    }
}
