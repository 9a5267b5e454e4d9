//! Pipeline components: scan, content rewrite pool, rename stage, and the run that ties them together.

pub mod content;
pub mod context;
pub mod error_handler;
pub mod orchestrator;
pub mod rename;
pub mod replacer;
pub mod walk;
pub mod workers;

pub use content::{
    BinaryDetector, guess_if_binary, is_binary_file, is_control_byte, rewrite_file, rewrite_text,
};
pub use context::{RewriteChannels, RewriteContext, create_rewrite_channels};
pub use error_handler::first_failure;
pub use orchestrator::{RunState, run, run_scanned};
pub use rename::{execute_steps, plan_renames, plan_step, rename_all, rename_entry};
pub use replacer::{RewriteReport, RewriteSettings, rewrite_all};
pub use walk::{WalkOutcome, is_root_config, run_walk_loop, scan, to_outcome_walkdir};
pub use workers::{outcome_log_level, spawn_rewrite_workers};
