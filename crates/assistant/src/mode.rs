//! Mode resolution — the fixed table mapping a request mode to its knowledge
//! source and attribution label.

use lectern_config::MaterialsConfig;
use lectern_core::request::Mode;
use lectern_core::source::KnowledgeSource;

/// Resolve a Q&A mode to its knowledge source.
///
/// `TranscriptQuiz` is not handled here: its source depends on a
/// caller-supplied name and resolves through
/// [`lectern_content::transcripts::resolve_transcript`].
pub fn resolve_source(mode: Mode, materials: &MaterialsConfig) -> Option<KnowledgeSource> {
    match mode {
        Mode::Syllabus => Some(KnowledgeSource::document(
            materials.syllabus_path(),
            "syllabus file",
        )),
        Mode::Essay => Some(KnowledgeSource::document(
            materials.essay_path(),
            "EBO & Essay file",
        )),
        Mode::Midterm => Some(KnowledgeSource::directory(
            materials.midterm_path(),
            "midterm materials",
        )),
        Mode::Final => Some(KnowledgeSource::directory(
            materials.final_path(),
            "final exam materials",
        )),
        Mode::TranscriptQuiz => None,
    }
}
