//! Renamer: bulk string-driven rename of file names, directory names and text file contents

pub mod engine;
pub mod error;
pub mod pipeline;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use error::RenameError;
pub use types::*;

use log::debug;
use std::path::Path;

/// Result alias used by public renamer API
pub type Result<T> = std::result::Result<T, RenameError>;

/// Single entry point: replace `from` with `to` under `root`, in file contents first, then in
/// file names, then in directory names. `root` itself is never renamed.
///
/// - Text files (per the binary heuristic) are rewritten concurrently; binaries are left alone.
/// - Renames run strictly after every rewrite finished, deepest paths first.
/// - `opts.dry_run` scans and plans only; the planned renames come back in [`RunReport::renamed`].
///
/// A failure mid-run leaves already-applied changes in place.
///
/// ```ignore
/// let opts = renamer::RenameOpts { exclude: vec!["node_modules".into()], ..Default::default() };
/// let report = renamer::rename_dir(path, "foo", "bar", &opts)?;
/// println!("{} renamed", report.renamed.len());
/// ```
pub fn rename_dir(root: &Path, from: &str, to: &str, opts: &RenameOpts) -> Result<RunReport> {
    let pair = ReplacementPair::new(from, to)?;
    let config_str = format!(
        "{} CONFIG:{:#?}",
        env!("CARGO_PKG_NAME").to_string().to_uppercase(),
        opts
    );
    debug!("{}", config_str);
    pipeline::run(root, &pair, opts)
}

/// Enumerate what a run would consider: every entry under `root` not pruned by `exclude`.
/// The root's own config file is never listed.
pub fn scan_dir(root: &Path, exclude: &[String]) -> Result<Vec<FileSystemEntry>> {
    pipeline::scan(root, &ExclusionSet::new(exclude))
}
