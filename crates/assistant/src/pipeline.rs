//! The request pipeline — one exchange end to end.
//!
//! Each request is handled independently: the only shared state is the
//! immutable configuration and the two client handles, so concurrent
//! requests never coordinate. The generation call and the survey call are
//! each a single awaited external call; the survey is dispatched after the
//! generation result is known and its outcome can only annotate, never fail,
//! the response.

use crate::{compose, mode, prompt};
use lectern_config::AppConfig;
use lectern_content::{store, transcripts};
use lectern_core::error::{Error, MaterialsError, RequestError, Result};
use lectern_core::generation::{GenerationClient, GenerationConfig};
use lectern_core::request::{AskRequest, Mode, ResolvedRequest};
use lectern_core::source::{AssembledContext, KnowledgeSource};
use lectern_core::survey::{SurveyOutcome, SurveyRecord, SurveySink};
use std::sync::Arc;
use tracing::{debug, warn};

/// The final composed answer plus the survey outcome for the trailing
/// diagnostic comment.
#[derive(Debug, Clone)]
pub struct ComposedResponse {
    /// Answer text with the disclaimer footer appended.
    pub text: String,
    /// What happened to the telemetry call.
    pub survey: SurveyOutcome,
}

impl ComposedResponse {
    /// The wire-format body: answer text plus the trailing survey comment.
    pub fn full_text(&self) -> String {
        compose::with_survey_comment(&self.text, &self.survey)
    }
}

/// The course assistant: validates requests and runs the
/// resolve → assemble → prompt → generate → compose → record pipeline.
pub struct Assistant {
    config: AppConfig,
    generation: GenerationConfig,
    client: Arc<dyn GenerationClient>,
    sink: Arc<dyn SurveySink>,
}

impl Assistant {
    pub fn new(
        config: AppConfig,
        client: Arc<dyn GenerationClient>,
        sink: Arc<dyn SurveySink>,
    ) -> Self {
        Self {
            generation: config.generation_config(),
            config,
            client,
            sink,
        }
    }

    /// Answer one request. All pipeline failures surface here as a typed
    /// error for the boundary to convert; soft degradations (sentinel text,
    /// failed survey call) come back as part of a successful response.
    pub async fn answer(&self, request: &AskRequest) -> Result<ComposedResponse> {
        let resolved = request.resolve()?;

        if !self.config.has_api_key() {
            return Err(Error::Config {
                message: "Missing GEMINI API key".into(),
            });
        }

        match resolved {
            ResolvedRequest::Question { mode, question } => {
                self.answer_question(mode, &question).await
            }
            ResolvedRequest::Quiz { transcript } => self.build_quiz(&transcript).await,
        }
    }

    /// The transcript filenames available to the quiz mode.
    pub async fn available_transcripts(&self) -> Result<Vec<String>> {
        let names = transcripts::list_transcripts(&self.config.materials.transcripts_path()).await?;
        Ok(names)
    }

    async fn answer_question(&self, mode: Mode, question: &str) -> Result<ComposedResponse> {
        let source = mode::resolve_source(mode, &self.config.materials)
            .ok_or(RequestError::MissingTranscript)?;

        let context = self.load_context(&source).await?;
        let rendered = prompt::question_prompt(&source.label, &context.text, question);
        debug!(mode = mode.as_wire(), label = %source.label, "Rendered question prompt");

        self.finish(rendered, question).await
    }

    async fn build_quiz(&self, transcript: &str) -> Result<ComposedResponse> {
        let dir = self.config.materials.transcripts_path();
        let source = transcripts::resolve_transcript(&dir, transcript).await?;

        let context = self.load_context(&source).await?;
        let rendered = prompt::quiz_prompt(
            &source.label,
            &context.text,
            self.config.quiz.question_count,
            &self.config.quiz.instructor_name,
        );
        debug!(transcript, "Rendered quiz prompt");

        self.finish(rendered, transcript).await
    }

    async fn load_context(&self, source: &KnowledgeSource) -> Result<AssembledContext> {
        let context = store::assemble(source, self.config.materials.max_files_per_dir)
            .await
            .map_err(|e| generic_load_failure(&source.label, e))?;

        if context.is_blank() {
            return Err(MaterialsError::Empty {
                label: source.label.clone(),
            }
            .into());
        }

        Ok(context)
    }

    async fn finish(&self, rendered: String, query_text: &str) -> Result<ComposedResponse> {
        let generated = self.client.generate(&rendered, &self.generation).await?;
        let text = compose::with_disclaimer(&generated, &self.config.syllabus_link);

        let record = SurveyRecord::new(text.clone(), query_text);
        let survey = self.sink.record(&record).await;

        Ok(ComposedResponse { text, survey })
    }
}

/// Collapse size-bound failures into the generic load failure the caller
/// sees. The distinct cause is kept in the logs.
fn generic_load_failure(label: &str, err: MaterialsError) -> Error {
    match err {
        MaterialsError::ContextTooLarge { .. } | MaterialsError::TooManyFiles { .. } => {
            warn!(label, error = %err, "Context assembly rejected");
            MaterialsError::Unavailable {
                label: label.to_string(),
                reason: err.to_string(),
            }
            .into()
        }
        other => other.into(),
    }
}
