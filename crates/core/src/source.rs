//! Knowledge sources and assembled context — the values that flow through the
//! context-assembly pipeline. Computed per request, never persisted.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where a mode's course material lives on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    /// A single document read in full.
    Document(PathBuf),
    /// A directory whose direct file entries are aggregated.
    Directory(PathBuf),
}

/// The resolved location of course material for one request, plus the
/// human-readable label used in attribution and in the generated prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeSource {
    pub location: SourceLocation,
    pub label: String,
}

impl KnowledgeSource {
    pub fn document(path: impl Into<PathBuf>, label: impl Into<String>) -> Self {
        Self {
            location: SourceLocation::Document(path.into()),
            label: label.into(),
        }
    }

    pub fn directory(path: impl Into<PathBuf>, label: impl Into<String>) -> Self {
        Self {
            location: SourceLocation::Directory(path.into()),
            label: label.into(),
        }
    }
}

/// The outcome of reading one file during directory aggregation.
///
/// A failed read keeps its entry (`content: None`) so partial-failure
/// behavior is observable in tests rather than only in logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Bare file name, as shown in the separator header.
    pub name: String,
    /// The file's text, or `None` when the read failed.
    pub content: Option<String>,
}

/// The concatenated text extracted from a [`KnowledgeSource`], already past
/// the size guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledContext {
    /// Combined context text, with `===== <name> =====` separator headers
    /// between entries when the source was a directory.
    pub text: String,
    /// Character-based token estimate for `text`.
    pub estimated_tokens: usize,
    /// Per-file read results, in aggregation order.
    pub files: Vec<FileEntry>,
}

impl AssembledContext {
    /// Whether the assembled text carries any usable material.
    /// Whitespace-only context counts as "no materials available".
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
