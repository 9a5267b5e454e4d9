//! Entry scan: sequential walk under the root, pruning excluded subtrees.

use log::debug;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::RenameError;
use crate::utils::config::PackagePaths;
use crate::{EntryKind, ExclusionSet, FileSystemEntry};

/// One result from the directory walk: an entry to keep or an error with optional path.
pub enum WalkOutcome {
    Ok(FileSystemEntry),
    Err {
        err: std::io::Error,
        path: Option<PathBuf>,
    },
}

/// Convert a walkdir result into [`WalkOutcome`]. Only directories (as reported without
/// following links) become `Directory`; everything else is a `File`.
pub fn to_outcome_walkdir(r: Result<walkdir::DirEntry, walkdir::Error>) -> WalkOutcome {
    match r {
        Ok(entry) => {
            let kind = if entry.file_type().is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            WalkOutcome::Ok(FileSystemEntry::new(entry.into_path(), kind))
        }
        Err(err) => {
            let path = err.path().map(PathBuf::from);
            let err = err
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
            WalkOutcome::Err { err, path }
        }
    }
}

/// The root's own `.renamer.toml`. Nested files of the same name are ordinary entries.
pub fn is_root_config(entry: &walkdir::DirEntry) -> bool {
    entry.depth() == 1 && entry.file_name() == PackagePaths::get().config_filename()
}

/// Walk below `root` (root itself is never yielded). Excluded paths are pruned before
/// walkdir descends, so their descendants are never visited.
fn walkdir_iter<'a>(
    root: &Path,
    exclusions: &'a ExclusionSet,
) -> impl Iterator<Item = WalkOutcome> + 'a {
    WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_entry(move |e| !is_root_config(e) && !exclusions.is_excluded(e.path()))
        .map(to_outcome_walkdir)
}

/// Consume `iter`, collecting entries. The first error aborts the scan; there is no partial result.
pub fn run_walk_loop<I>(root: &Path, iter: I) -> Result<Vec<FileSystemEntry>, RenameError>
where
    I: Iterator<Item = WalkOutcome>,
{
    let mut entries = Vec::new();
    for outcome in iter {
        match outcome {
            WalkOutcome::Ok(entry) => entries.push(entry),
            WalkOutcome::Err { err, path } => {
                let path = path.unwrap_or_else(|| root.to_path_buf());
                return Err(RenameError::from_io(&path, err));
            }
        }
    }
    Ok(entries)
}

/// Enumerate every file and directory strictly under `root`, minus excluded subtrees.
///
/// Fails with `NotFound` if `root` does not exist, `AccessDenied` if any subtree cannot be read.
/// Order of the result follows the walk and carries no meaning.
pub fn scan(root: &Path, exclusions: &ExclusionSet) -> Result<Vec<FileSystemEntry>, RenameError> {
    if let Err(e) = std::fs::symlink_metadata(root) {
        return Err(RenameError::from_io(root, e));
    }
    debug!(
        "Scanning {} ({} exclusions)",
        root.display(),
        exclusions.len()
    );
    let entries = run_walk_loop(root, walkdir_iter(root, exclusions))?;
    debug!("Scan done: {} entries", entries.len());
    Ok(entries)
}
