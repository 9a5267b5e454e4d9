//! Rename stage: files first, then directories, each group longest path first, touching only
//! the final path segment.
//!
//! Ordering is what keeps the precomputed paths valid: an entry is always renamed before any of
//! its ancestors (an ancestor's path is strictly shorter), so the prefix used to address it has
//! not changed yet when its turn comes.

use log::debug;
use std::fs;
use std::path::Path;

use crate::engine::tools::{
    contains_ignore_case, renamed_base_name, replace_last_segment, same_entry,
};
use crate::error::{IoResultExt, RenameError};
use crate::types::is_cancelled;
use crate::{CancelFlag, EntryKind, FileSystemEntry, RenameStep, ReplacementPair};

/// Order one group longest path first. Stable, so equal lengths keep scan order.
fn longest_first(entries: &[FileSystemEntry], kind: EntryKind) -> Vec<&FileSystemEntry> {
    let mut group: Vec<&FileSystemEntry> = entries.iter().filter(|e| e.kind == kind).collect();
    group.sort_by(|a, b| b.path.as_os_str().len().cmp(&a.path.as_os_str().len()));
    group
}

/// The step for one entry, or None if its base name does not change.
pub fn plan_step(entry: &FileSystemEntry, pair: &ReplacementPair) -> Option<RenameStep> {
    let name = entry.path.file_name()?;
    let Some(name) = name.to_str() else {
        debug!("Skipping non-UTF-8 name: {}", entry.path.display());
        return None;
    };
    match renamed_base_name(name, &pair.from, &pair.to) {
        Some(new_name) => Some(RenameStep {
            from: entry.path.clone(),
            to: replace_last_segment(&entry.path, &new_name),
            kind: entry.kind,
        }),
        None => {
            if contains_ignore_case(name, &pair.from) {
                debug!(
                    "{} matches only ignoring case; name left unchanged",
                    entry.path.display()
                );
            }
            None
        }
    }
}

/// Ordered rename steps: all files (longest path first), then all directories (longest path first).
/// Pure; nothing on disk is touched.
pub fn plan_renames(entries: &[FileSystemEntry], pair: &ReplacementPair) -> Vec<RenameStep> {
    [EntryKind::File, EntryKind::Directory]
        .into_iter()
        .flat_map(|kind| longest_first(entries, kind))
        .filter_map(|entry| plan_step(entry, pair))
        .collect()
}

/// Move `from` to `to`. An existing destination is a conflict unless it is `from` itself
/// (case-only rename on a case-insensitive filesystem).
pub fn rename_entry(from: &Path, to: &Path) -> Result<(), RenameError> {
    if fs::symlink_metadata(to).is_ok() && !same_entry(from, to) {
        return Err(RenameError::RenameConflict {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
        });
    }
    fs::rename(from, to).at_path(from)
}

/// Run `steps` in order. Stops at the first failure; earlier renames stay applied.
pub fn execute_steps(
    steps: &[RenameStep],
    cancel: &Option<CancelFlag>,
) -> Result<Vec<RenameStep>, RenameError> {
    let mut done = Vec::with_capacity(steps.len());
    for step in steps {
        if is_cancelled(cancel) {
            return Err(RenameError::Cancelled);
        }
        rename_entry(&step.from, &step.to)?;
        debug!("Renamed {} -> {}", step.from.display(), step.to.display());
        done.push(step.clone());
    }
    Ok(done)
}

/// Plan and execute every rename for `entries`.
pub fn rename_all(
    entries: &[FileSystemEntry],
    pair: &ReplacementPair,
    cancel: &Option<CancelFlag>,
) -> Result<Vec<RenameStep>, RenameError> {
    execute_steps(&plan_renames(entries, pair), cancel)
}
