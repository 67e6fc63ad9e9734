//! The Lectern request pipeline.
//!
//! Orchestrates one exchange end to end: validate the request, resolve its
//! mode to a knowledge source, assemble bounded context, render the prompt,
//! call the generation API, compose the attributed answer, and record the
//! exchange to the survey sink.

pub mod compose;
pub mod mode;
pub mod pipeline;
pub mod prompt;

pub use pipeline::{Assistant, ComposedResponse};
