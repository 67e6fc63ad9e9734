//! Lecture transcript handling — name validation, enumeration, resolution.
//!
//! Transcript names come from the caller, so they are validated with pure
//! string checks before any filesystem access: only a bare filename with the
//! transcript extension may reach a path join. The resolved path is always
//! `transcripts_dir/<validated name>` — never caller-supplied path segments.

use lectern_core::error::{Error, MaterialsError, RequestError, TranscriptError};
use lectern_core::source::KnowledgeSource;
use std::path::Path;
use tracing::debug;

/// Extension every retrievable transcript must carry.
pub const TRANSCRIPT_EXTENSION: &str = ".txt";

/// Validate a caller-supplied transcript filename.
///
/// Rejects path separators, parent-directory components, missing or bare
/// extensions. Performs no filesystem access.
pub fn validate_transcript_name(name: &str) -> Result<(), RequestError> {
    let invalid = || RequestError::InvalidTranscriptName(name.to_string());

    if name.is_empty() {
        return Err(invalid());
    }
    if name.contains('/') || name.contains('\\') {
        return Err(invalid());
    }
    if name.contains("..") {
        return Err(invalid());
    }
    if !name.ends_with(TRANSCRIPT_EXTENSION) || name.len() == TRANSCRIPT_EXTENSION.len() {
        return Err(invalid());
    }

    Ok(())
}

/// The display name of a transcript: its filename without the extension.
/// Used as the attribution label in quiz prompts.
pub fn display_name(name: &str) -> &str {
    name.strip_suffix(TRANSCRIPT_EXTENSION).unwrap_or(name)
}

/// Enumerate available transcript filenames: direct file entries with the
/// transcript extension, sorted.
pub async fn list_transcripts(dir: &Path) -> Result<Vec<String>, MaterialsError> {
    let unavailable = |reason: String| MaterialsError::Unavailable {
        label: "transcripts".to_string(),
        reason,
    };

    let mut read_dir = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| unavailable(format!("{}: {e}", dir.display())))?;

    let mut names = Vec::new();
    while let Some(entry) = read_dir
        .next_entry()
        .await
        .map_err(|e| unavailable(e.to_string()))?
    {
        let file_type = entry
            .file_type()
            .await
            .map_err(|e| unavailable(e.to_string()))?;
        if !file_type.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(TRANSCRIPT_EXTENSION) {
            names.push(name);
        }
    }

    names.sort();
    Ok(names)
}

/// Resolve a validated transcript name to a knowledge source.
///
/// Validation failures are client errors; a validated name with no backing
/// file is a not-found error, distinct from "materials unavailable".
pub async fn resolve_transcript(dir: &Path, name: &str) -> Result<KnowledgeSource, Error> {
    validate_transcript_name(name)?;

    let path = dir.join(name);
    match tokio::fs::metadata(&path).await {
        Ok(meta) if meta.is_file() => {
            debug!(transcript = %name, "Resolved transcript");
            Ok(KnowledgeSource::document(path, display_name(name)))
        }
        _ => Err(TranscriptError::NotFound(name.to_string()).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn valid_names_accepted() {
        assert!(validate_transcript_name("lecture3.txt").is_ok());
        assert!(validate_transcript_name("2026-01-12 guest talk.txt").is_ok());
    }

    #[test]
    fn wrong_extension_rejected() {
        assert!(validate_transcript_name("lecture3.md").is_err());
        assert!(validate_transcript_name("lecture3").is_err());
        assert!(validate_transcript_name(".txt").is_err());
        assert!(validate_transcript_name("").is_err());
    }

    #[test]
    fn path_separators_rejected() {
        assert!(validate_transcript_name("notes/lecture3.txt").is_err());
        assert!(validate_transcript_name("..\\lecture3.txt").is_err());
        assert!(validate_transcript_name("/etc/passwd.txt").is_err());
    }

    #[test]
    fn parent_components_rejected() {
        assert!(validate_transcript_name("..lecture.txt").is_err());
        assert!(validate_transcript_name("lecture...txt").is_err());
    }

    #[test]
    fn display_name_strips_extension() {
        assert_eq!(display_name("lecture3.txt"), "lecture3");
    }

    #[tokio::test]
    async fn invalid_name_rejected_before_any_filesystem_access() {
        // The store root does not exist; a read attempt would surface
        // NotFound instead of the validation error.
        let err = resolve_transcript(Path::new("/nonexistent/transcripts"), "lecture3.md")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Request(RequestError::InvalidTranscriptName(_))
        ));
    }

    #[tokio::test]
    async fn traversal_name_rejected_before_any_filesystem_access() {
        let err = resolve_transcript(Path::new("/nonexistent/transcripts"), "../secrets.txt")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Request(RequestError::InvalidTranscriptName(_))
        ));
    }

    #[tokio::test]
    async fn missing_transcript_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_transcript(dir.path(), "lecture9.txt").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Transcript(TranscriptError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn existing_transcript_resolves_with_display_label() {
        let dir = tempfile::tempdir().unwrap();
        let mut f = std::fs::File::create(dir.path().join("lecture3.txt")).unwrap();
        writeln!(f, "Today we discuss supply curves.").unwrap();

        let source = resolve_transcript(dir.path(), "lecture3.txt").await.unwrap();
        assert_eq!(source.label, "lecture3");
    }

    #[tokio::test]
    async fn listing_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["lecture2.txt", "lecture1.txt", "notes.md"] {
            std::fs::File::create(dir.path().join(name)).unwrap();
        }
        std::fs::create_dir(dir.path().join("archive.txt")).unwrap(); // dir, not file

        let names = list_transcripts(dir.path()).await.unwrap();
        assert_eq!(names, vec!["lecture1.txt", "lecture2.txt"]);
    }

    #[tokio::test]
    async fn listing_missing_directory_fails() {
        let err = list_transcripts(Path::new("/nonexistent/transcripts"))
            .await
            .unwrap_err();
        assert!(matches!(err, MaterialsError::Unavailable { .. }));
    }
}
