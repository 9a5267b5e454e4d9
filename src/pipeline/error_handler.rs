use log::warn;
use std::path::PathBuf;

use crate::error::RenameError;

/// Pick the error to surface from a stage where every unit ran to completion.
/// All failures are logged; the one for the earliest input position is returned.
pub fn first_failure(mut failures: Vec<(usize, PathBuf, RenameError)>) -> Option<RenameError> {
    if failures.is_empty() {
        return None;
    }
    failures.sort_by_key(|(idx, _, _)| *idx);
    if failures.len() > 1 {
        warn!("{} files failed during content rewrite:", failures.len());
        for (_, path, err) in &failures {
            warn!("  {}: {}", path.display(), err);
        }
    }
    failures.into_iter().next().map(|(_, _, err)| err)
}
