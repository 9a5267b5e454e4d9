//! Application configuration constants.
//! Tuning and thresholds in one place.

use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    pkg_name: &'static str,
    config_filename: String,
    temp_suffix: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                pkg_name: pkg,
                config_filename: format!(".{pkg}.toml"),
                temp_suffix: format!(".{pkg}.tmp"),
            }
        })
    }

    pub fn pkg_name(&self) -> &str {
        self.pkg_name
    }

    /// Per-directory config file, e.g. `.renamer.toml`.
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }

    /// Suffix of the sibling temp file used for atomic content replace.
    pub fn temp_suffix(&self) -> &str {
        &self.temp_suffix
    }
}

// ---- Worker threads ----

/// Thread limits for the content-rewrite pool.
/// Use [`WorkerThreadLimits::current()`] to fill `all_threads` from rayon; the rest are const.
#[derive(Clone, Copy, Debug)]
pub struct WorkerThreadLimits {
    /// Available threads (from rayon); set by [`WorkerThreadLimits::current()`].
    pub all_threads: usize,
    /// Never fewer than this many workers (when there is work).
    pub floor: usize,
}

impl Default for WorkerThreadLimits {
    fn default() -> Self {
        Self {
            all_threads: 0, // use current() to set from rayon
            floor: Self::FLOOR_THREADS,
        }
    }
}

impl WorkerThreadLimits {
    pub const FLOOR_THREADS: usize = 1;

    /// Build limits with `all_threads` set from `rayon::current_num_threads()`.
    pub fn current() -> Self {
        Self {
            all_threads: rayon::current_num_threads(),
            ..Self::default()
        }
    }
}

// ---- Binary heuristic ----

/// Thresholds for the binary/text guess.
pub struct BinaryHeuristic;

impl BinaryHeuristic {
    /// This many consecutive zero bytes means binary.
    pub const ZERO_RUN_THRESHOLD: usize = 4;
    /// This many control bytes (1..=7, 14..=25) anywhere in the file means binary.
    pub const CONTROL_CHARS_THRESHOLD: u64 = 100;
}

// ---- I/O ----

/// Chunk size for streaming reads in the binary heuristic (bytes). 64 KB.
pub const READ_CHUNK_SIZE: usize = 64 * 1024;

/// Temp names tried per file before giving up (`.name.renamer.tmp`, `.name.1.renamer.tmp`, ...).
pub const TEMP_NAME_ATTEMPTS: u32 = 16;

/// UTF-8 byte-order mark.
pub const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

// ---- Progress ----

/// Update the progress bar every this many files (reduce lock contention).
pub const PROGRESS_UPDATE_BATCH_SIZE: usize = 16;
