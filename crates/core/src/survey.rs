//! SurveySink trait — the optional survey-logging side channel.
//!
//! The sink records each question/response exchange to an external
//! survey-collection service. Its outcome is reported inline as a diagnostic
//! comment and must never fail or delay the overall request, so `record`
//! returns an outcome value instead of a `Result`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One question/response exchange, as posted to the survey service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyRecord {
    /// The final composed response text (disclaimer included).
    pub response_text: String,
    /// The caller's question, or the transcript name for quiz requests.
    pub query_text: String,
    /// When the exchange completed.
    pub recorded_at: DateTime<Utc>,
}

impl SurveyRecord {
    pub fn new(response_text: impl Into<String>, query_text: impl Into<String>) -> Self {
        Self {
            response_text: response_text.into(),
            query_text: query_text.into(),
            recorded_at: Utc::now(),
        }
    }
}

/// What happened to the telemetry call. Rendered into the trailing HTML-style
/// comment on the response; never part of the semantic answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurveyOutcome {
    /// The sink is unconfigured; nothing was sent.
    NotConfigured,
    /// The service answered with this HTTP status (2xx or not).
    Status(u16),
    /// The call never completed (network error, timeout).
    Failed(String),
}

impl std::fmt::Display for SurveyOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurveyOutcome::NotConfigured => write!(f, "Qualtrics not called"),
            SurveyOutcome::Status(code) => write!(f, "Qualtrics status: {code}"),
            SurveyOutcome::Failed(reason) => write!(f, "Qualtrics error: {reason}"),
        }
    }
}

/// The survey-collection endpoint, reduced to a fire-and-report call.
#[async_trait]
pub trait SurveySink: Send + Sync {
    /// A human-readable name for this sink (e.g., "qualtrics", "noop").
    fn name(&self) -> &str;

    /// Record one exchange. Infallible by contract: failures become a
    /// [`SurveyOutcome`], never an error.
    async fn record(&self, record: &SurveyRecord) -> SurveyOutcome;
}

/// Sink installed when telemetry is not configured.
pub struct NoopSink;

#[async_trait]
impl SurveySink for NoopSink {
    fn name(&self) -> &str {
        "noop"
    }

    async fn record(&self, _record: &SurveyRecord) -> SurveyOutcome {
        SurveyOutcome::NotConfigured
    }
}
