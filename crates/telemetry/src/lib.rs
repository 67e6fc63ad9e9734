//! Survey-logging telemetry for Lectern.
//!
//! Records each question/response exchange to a Qualtrics survey when the
//! three credentials (API token, survey id, datacenter) are all configured.
//! The sink's outcome is reported inline as a diagnostic comment; it never
//! fails or delays a request.

pub mod qualtrics;

pub use qualtrics::QualtricsSink;

use lectern_config::AppConfig;
use lectern_core::{NoopSink, SurveySink};
use std::sync::Arc;

/// Errors from the telemetry subsystem. Only construction can fail; the
/// recording call itself reports outcomes, not errors.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("failed to build survey HTTP client: {0}")]
    ClientBuild(String),
}

/// Build the survey sink for this deployment: the real Qualtrics sink when
/// telemetry is fully configured, a no-op otherwise.
pub fn build_from_config(config: &AppConfig) -> Result<Arc<dyn SurveySink>, TelemetryError> {
    match &config.survey {
        Some(survey) => Ok(Arc::new(QualtricsSink::new(
            survey,
            config.generation.survey_timeout_secs,
        )?)),
        None => Ok(Arc::new(NoopSink)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lectern_config::SurveyConfig;

    #[test]
    fn unconfigured_survey_builds_noop_sink() {
        let config = AppConfig::default();
        let sink = build_from_config(&config).unwrap();
        assert_eq!(sink.name(), "noop");
    }

    #[test]
    fn configured_survey_builds_qualtrics_sink() {
        let config = AppConfig {
            survey: Some(SurveyConfig {
                api_token: "token".into(),
                survey_id: "SV_123".into(),
                datacenter: "iad1".into(),
            }),
            ..AppConfig::default()
        };
        let sink = build_from_config(&config).unwrap();
        assert_eq!(sink.name(), "qualtrics");
    }
}
