//! Content store reader — single documents and aggregated directories.
//!
//! Directory aggregation visits direct file entries only (subdirectories are
//! ignored), sorted by name so assembly is deterministic. A file that fails
//! to read is logged and recorded as a failed [`FileEntry`]; its separator
//! header is still emitted, and the aggregation carries on. A missing or
//! unreadable directory, by contrast, is a hard "materials unavailable"
//! failure.

use crate::token::{estimate_tokens, guard_context_size};
use lectern_core::error::MaterialsError;
use lectern_core::source::{AssembledContext, FileEntry, KnowledgeSource, SourceLocation};
use std::path::Path;
use tracing::{debug, warn};

/// Read a single document in full.
pub async fn read_document(path: &Path, label: &str) -> Result<String, MaterialsError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| MaterialsError::Unavailable {
            label: label.to_string(),
            reason: format!("{}: {e}", path.display()),
        })
}

/// Enumerate a directory's direct file entries and read each one.
///
/// Entries are sorted by file name. More than `max_files` direct files is a
/// hard failure — an unbounded aggregation could swallow arbitrary disk
/// content before the token guard sees it.
pub async fn load_dir_entries(
    dir: &Path,
    label: &str,
    max_files: usize,
) -> Result<Vec<FileEntry>, MaterialsError> {
    let unavailable = |reason: String| MaterialsError::Unavailable {
        label: label.to_string(),
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
        if file_type.is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    if names.len() > max_files {
        return Err(MaterialsError::TooManyFiles {
            label: label.to_string(),
            count: names.len(),
            limit: max_files,
        });
    }

    names.sort();

    let mut entries = Vec::with_capacity(names.len());
    for name in names {
        let path = dir.join(&name);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(file = %name, error = %e, "Failed to read file during aggregation");
                None
            }
        };
        entries.push(FileEntry { name, content });
    }

    Ok(entries)
}

/// Concatenate entries into one context blob, each preceded by its separator
/// header. A failed entry contributes its header and no content.
pub fn combine(entries: &[FileEntry]) -> String {
    let mut combined = String::new();
    for entry in entries {
        combined.push_str("\n\n===== ");
        combined.push_str(&entry.name);
        combined.push_str(" =====\n\n");
        if let Some(content) = &entry.content {
            combined.push_str(content);
        }
    }
    combined
}

/// Produce the assembled context for a knowledge source.
///
/// Directory sources pass through the size guard; the generation API's input
/// ceiling only realistically matters for folder aggregation.
pub async fn assemble(
    source: &KnowledgeSource,
    max_files: usize,
) -> Result<AssembledContext, MaterialsError> {
    match &source.location {
        SourceLocation::Document(path) => {
            let text = read_document(path, &source.label).await?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| source.label.clone());
            debug!(label = %source.label, chars = text.len(), "Loaded document context");
            Ok(AssembledContext {
                estimated_tokens: estimate_tokens(&text),
                files: vec![FileEntry {
                    name,
                    content: Some(text.clone()),
                }],
                text,
            })
        }
        SourceLocation::Directory(dir) => {
            let files = load_dir_entries(dir, &source.label, max_files).await?;
            let text = combine(&files);
            let estimated_tokens = guard_context_size(&text)?;
            debug!(
                label = %source.label,
                files = files.len(),
                estimated_tokens,
                "Aggregated directory context"
            );
            Ok(AssembledContext {
                text,
                estimated_tokens,
                files,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lectern_core::source::KnowledgeSource;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, content: &str) {
        let mut f = std::fs::File::create(dir.join(name)).unwrap();
        write!(f, "{content}").unwrap();
    }

    #[tokio::test]
    async fn read_existing_document() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "syllabus.md", "Midterm: Oct 26");

        let text = read_document(&dir.path().join("syllabus.md"), "syllabus file")
            .await
            .unwrap();
        assert_eq!(text, "Midterm: Oct 26");
    }

    #[tokio::test]
    async fn missing_document_is_unavailable() {
        let err = read_document(Path::new("/nonexistent/syllabus.md"), "syllabus file")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Error loading syllabus file");
    }

    #[tokio::test]
    async fn aggregation_emits_one_header_per_file() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "week1.md", "Lecture one notes");
        write_file(dir.path(), "week2.md", "Lecture two notes");
        write_file(dir.path(), "week3.md", "Lecture three notes");

        let entries = load_dir_entries(dir.path(), "midterm materials", 256)
            .await
            .unwrap();
        let combined = combine(&entries);

        assert_eq!(combined.matches("=====").count(), 6); // 2 per header
        for name in ["week1.md", "week2.md", "week3.md"] {
            assert!(combined.contains(&format!("===== {name} =====")));
        }
        for content in ["Lecture one notes", "Lecture two notes", "Lecture three notes"] {
            assert!(combined.contains(content));
        }
    }

    #[tokio::test]
    async fn subdirectories_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "notes.md", "top-level");
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        write_file(&dir.path().join("nested"), "deep.md", "nested content");

        let entries = load_dir_entries(dir.path(), "final exam materials", 256)
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "notes.md");
    }

    #[tokio::test]
    async fn entries_are_sorted_by_name() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "b.md", "second");
        write_file(dir.path(), "a.md", "first");
        write_file(dir.path(), "c.md", "third");

        let entries = load_dir_entries(dir.path(), "midterm materials", 256)
            .await
            .unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a.md", "b.md", "c.md"]);
    }

    #[test]
    fn failed_entry_still_emits_header() {
        let entries = vec![
            FileEntry {
                name: "ok.md".into(),
                content: Some("readable".into()),
            },
            FileEntry {
                name: "broken.md".into(),
                content: None,
            },
        ];
        let combined = combine(&entries);
        assert!(combined.contains("===== ok.md ====="));
        assert!(combined.contains("===== broken.md ====="));
        assert!(combined.contains("readable"));
    }

    #[tokio::test]
    async fn too_many_files_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..4 {
            write_file(dir.path(), &format!("f{i}.md"), "x");
        }

        let err = load_dir_entries(dir.path(), "midterm materials", 3)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            MaterialsError::TooManyFiles { count: 4, limit: 3, .. }
        ));
    }

    #[tokio::test]
    async fn missing_directory_is_unavailable() {
        let err = load_dir_entries(Path::new("/nonexistent/materials"), "final exam materials", 256)
            .await
            .unwrap_err();
        assert!(matches!(err, MaterialsError::Unavailable { .. }));
    }

    #[tokio::test]
    async fn assemble_document_source() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "essay.md", "EBO brief due Nov 14");

        let source = KnowledgeSource::document(dir.path().join("essay.md"), "EBO & Essay file");
        let ctx = assemble(&source, 256).await.unwrap();
        assert_eq!(ctx.text, "EBO brief due Nov 14");
        assert_eq!(ctx.files.len(), 1);
        assert_eq!(ctx.files[0].name, "essay.md");
        assert!(!ctx.is_blank());
    }

    #[tokio::test]
    async fn assemble_empty_directory_is_blank() {
        let dir = tempfile::tempdir().unwrap();
        let source = KnowledgeSource::directory(dir.path(), "final exam materials");
        let ctx = assemble(&source, 256).await.unwrap();
        assert!(ctx.is_blank());
        assert!(ctx.files.is_empty());
    }
}
