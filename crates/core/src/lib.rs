//! # Lectern Core
//!
//! Domain types, traits, and error definitions for the Lectern course
//! assistant. This crate has **zero framework dependencies** — it defines the
//! domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! The two external collaborators (the generation API and the survey-logging
//! service) are defined as narrow traits here. Implementations live in their
//! respective crates. This enables:
//! - Testing the whole pipeline with substitutable fakes
//! - Clean dependency graph (all crates depend inward on core)

pub mod error;
pub mod generation;
pub mod request;
pub mod source;
pub mod survey;

// Re-export key types at crate root for ergonomics
pub use error::{
    Error, GenerationError, MaterialsError, RequestError, Result, TranscriptError,
};
pub use generation::{GenerationClient, GenerationConfig, NO_RESPONSE_SENTINEL};
pub use request::{AskRequest, Mode, ResolvedRequest};
pub use source::{AssembledContext, FileEntry, KnowledgeSource, SourceLocation};
pub use survey::{NoopSink, SurveyOutcome, SurveyRecord, SurveySink};
