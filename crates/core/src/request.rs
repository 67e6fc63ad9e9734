//! Inbound request types — the wire shape of a single question or quiz ask.
//!
//! A request is value-like: it has no identity beyond the single exchange it
//! describes, and nothing here is persisted.

use crate::error::RequestError;
use serde::{Deserialize, Serialize};

/// The enumerated request category. Selects which knowledge source and which
/// prompt template the pipeline uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    Syllabus,
    /// Essay brief and EBO guidance. Older clients send `eboEssay`.
    #[serde(alias = "eboEssay")]
    Essay,
    Midterm,
    Final,
    TranscriptQuiz,
}

impl Mode {
    /// Parse a wire-format mode string. Unknown strings are a client error,
    /// distinct from "materials unavailable" (a server/config error).
    pub fn from_wire(s: &str) -> Result<Self, RequestError> {
        match s {
            "syllabus" => Ok(Mode::Syllabus),
            "essay" | "eboEssay" => Ok(Mode::Essay),
            "midterm" => Ok(Mode::Midterm),
            "final" => Ok(Mode::Final),
            "transcript-quiz" => Ok(Mode::TranscriptQuiz),
            other => Err(RequestError::UnknownMode(other.to_string())),
        }
    }

    /// The wire-format name of this mode.
    pub fn as_wire(&self) -> &'static str {
        match self {
            Mode::Syllabus => "syllabus",
            Mode::Essay => "essay",
            Mode::Midterm => "midterm",
            Mode::Final => "final",
            Mode::TranscriptQuiz => "transcript-quiz",
        }
    }
}

/// The raw POST body. Both deployment shapes land here:
/// `{"mode": ..., "question": ...}` for Q&A and `{"transcript": ...}` for the
/// quiz variant (which may omit `mode` entirely).
///
/// `mode` stays a plain string until [`AskRequest::resolve`] so that an
/// unknown mode surfaces as its own client error rather than a JSON parse
/// failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AskRequest {
    pub mode: Option<String>,
    pub question: Option<String>,
    pub transcript: Option<String>,
}

/// A validated request: exactly the fields its mode requires, present and
/// non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedRequest {
    Question { mode: Mode, question: String },
    Quiz { transcript: String },
}

impl AskRequest {
    /// Validate the request against its resolved mode.
    ///
    /// Rules:
    /// - a `mode` of `transcript-quiz` (or a body with no `mode` but a
    ///   `transcript`) requires a transcript name;
    /// - every other mode requires a question;
    /// - anything else is a client error.
    pub fn resolve(&self) -> Result<ResolvedRequest, RequestError> {
        let mode = match &self.mode {
            Some(raw) => Mode::from_wire(raw)?,
            None if self.transcript.is_some() => Mode::TranscriptQuiz,
            None => return Err(RequestError::MissingQuestion),
        };

        match mode {
            Mode::TranscriptQuiz => {
                let transcript = self
                    .transcript
                    .as_deref()
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .ok_or(RequestError::MissingTranscript)?;
                Ok(ResolvedRequest::Quiz {
                    transcript: transcript.to_string(),
                })
            }
            _ => {
                let question = self
                    .question
                    .as_deref()
                    .filter(|q| !q.trim().is_empty())
                    .ok_or(RequestError::MissingQuestion)?;
                Ok(ResolvedRequest::Question {
                    mode,
                    question: question.to_string(),
                })
            }
        }
    }
}
