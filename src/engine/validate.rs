//! Input checks done before a run: root exists, FROM/TO are usable name fragments.

use std::path::Path;

use crate::engine::tools::is_valid_name_fragment;
use crate::error::RenameError;
use crate::{ExclusionSet, ReplacementPair};

/// Prefix of CLI flags; FROM/TO may not start with it.
pub const FLAG_PREFIX: &str = "--";

pub fn validate_root(root: &Path) -> Result<(), RenameError> {
    match std::fs::symlink_metadata(root) {
        Ok(_) => Ok(()),
        Err(e) => Err(RenameError::from_io(root, e)),
    }
}

fn validate_fragment(label: &str, value: &str) -> Result<(), RenameError> {
    if value.is_empty() {
        return Err(RenameError::invalid_input(format!("{label} must not be empty")));
    }
    if value.starts_with(FLAG_PREFIX) {
        return Err(RenameError::invalid_input(format!(
            "{label} \"{value}\" must not start with {FLAG_PREFIX}"
        )));
    }
    if !is_valid_name_fragment(value) {
        return Err(RenameError::invalid_input(format!(
            "{label} \"{value}\" is not a valid file name"
        )));
    }
    Ok(())
}

/// Build a [`ReplacementPair`] from raw CLI values.
pub fn validate_change(from: &str, to: &str) -> Result<ReplacementPair, RenameError> {
    validate_fragment("FROM", from)?;
    validate_fragment("TO", to)?;
    ReplacementPair::new(from, to)
}

/// Trim and drop empty exclusions. Each must be a legal path fragment (no NUL).
pub fn validate_exclusions(raw: &[String]) -> Result<ExclusionSet, RenameError> {
    if let Some(bad) = raw.iter().find(|e| e.contains('\0')) {
        return Err(RenameError::invalid_input(format!(
            "exclusion \"{}\" is not a valid path",
            bad.escape_default()
        )));
    }
    Ok(ExclusionSet::new(raw))
}
