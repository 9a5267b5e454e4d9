//! Public and internal types for the renamer API and pipeline.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::RenameError;

/// File or directory, as reported by the walk. Symlinks and special files are `File`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryKind {
    File,
    Directory,
}

/// One discovered filesystem object under the scan root. Never mutated after the scan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileSystemEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl FileSystemEntry {
    pub fn new(path: impl Into<PathBuf>, kind: EntryKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Case-insensitive substring exclusions. A path containing any of them is pruned with its subtree.
#[derive(Clone, Debug, Default)]
pub struct ExclusionSet {
    /// Lowercased patterns; matching lowercases the candidate path too.
    patterns: Vec<String>,
}

impl ExclusionSet {
    /// Build from raw user input. Patterns are trimmed; empty ones are dropped.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| p.as_ref().trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();
        Self { patterns }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// True if the full path contains any pattern, ignoring case.
    pub fn is_excluded(&self, path: &Path) -> bool {
        if self.patterns.is_empty() {
            return false;
        }
        let path_str = path.to_string_lossy().to_lowercase();
        self.patterns.iter().any(|p| path_str.contains(p.as_str()))
    }
}

/// The `from` -> `to` substitution used for both names and contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplacementPair {
    pub from: String,
    pub to: String,
}

impl ReplacementPair {
    /// Both sides must be non-empty. Further validation (flag prefix, legal filename
    /// characters) is done by the CLI in [`crate::engine::validate`].
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Result<Self, RenameError> {
        let from = from.into();
        let to = to.into();
        if from.is_empty() {
            return Err(RenameError::invalid_input("replacement source must not be empty"));
        }
        if to.is_empty() {
            return Err(RenameError::invalid_input("replacement target must not be empty"));
        }
        Ok(Self { from, to })
    }
}

/// Lifecycle of a single run. Forward-only; `Aborted` is reachable from any non-terminal phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum RunPhase {
    Scanning,
    ContentRewriting,
    RenamingFiles,
    RenamingDirectories,
    Done,
    Aborted,
}

impl RunPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, RunPhase::Done | RunPhase::Aborted)
    }
}

/// One planned rename: `from` is addressed at the moment the step runs, `to` differs only in the last segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenameStep {
    pub from: PathBuf,
    pub to: PathBuf,
    pub kind: EntryKind,
}

/// Why a file was left untouched by the content stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// Binary heuristic fired.
    Binary,
    /// Passed the heuristic but is not valid UTF-8.
    NotUtf8,
    /// Symlink, device, fifo, ...
    NotRegular,
}

/// Outcome of the content stage for one file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RewriteOutcome {
    /// Content written back; `replacements` is the number of occurrences substituted.
    Rewritten { replacements: usize },
    Skipped(SkipReason),
}

/// What a run did. Returned by [`crate::rename_dir`].
#[derive(Clone, Debug, Default)]
pub struct RunReport {
    /// Everything the scan yielded (after exclusions).
    pub scanned: Vec<FileSystemEntry>,
    /// Files whose content was written back.
    pub rewritten: Vec<FileSystemEntry>,
    /// Files left untouched by the content stage.
    pub skipped: Vec<(FileSystemEntry, SkipReason)>,
    /// Renames performed, in execution order. In dry-run mode, the renames that would be performed.
    pub renamed: Vec<RenameStep>,
    /// True when nothing on disk was changed.
    pub dry_run: bool,
}

impl RunReport {
    /// Entries touched by the run: rewritten files plus renamed entries (by original path), deduplicated.
    pub fn touched(&self) -> Vec<FileSystemEntry> {
        let mut out: Vec<FileSystemEntry> = self.rewritten.clone();
        for step in &self.renamed {
            let entry = FileSystemEntry::new(step.from.clone(), step.kind);
            if !out.contains(&entry) {
                out.push(entry);
            }
        }
        out
    }
}

/// Cooperative cancellation flag shared with workers (set from the Ctrl+C handler).
pub type CancelFlag = Arc<AtomicBool>;

pub(crate) fn is_cancelled(cancel: &Option<CancelFlag>) -> bool {
    cancel
        .as_ref()
        .map(|c| c.load(Ordering::Relaxed))
        .unwrap_or(false)
}

/// Lib options for [`crate::rename_dir`].
#[derive(Clone, Debug, Default)]
pub struct RenameOpts {
    /// Exclusion substrings (case-insensitive, matched against the full path).
    pub exclude: Vec<String>,
    /// Prefix rewritten text files with a UTF-8 byte-order mark.
    pub emit_bom: bool,
    /// Content-rewrite worker count. When None, derived from rayon and the FD limit.
    pub num_threads: Option<usize>,
    /// Scan and plan only; touch nothing.
    pub dry_run: bool,
    /// Show a progress bar during the content stage.
    pub progress: bool,
    /// Checked between units of work; when set the run ends with [`RenameError::Cancelled`].
    pub cancel: Option<CancelFlag>,
}
