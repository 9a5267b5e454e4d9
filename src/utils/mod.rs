pub mod config;
pub mod fd_limit;
pub mod logger;
pub mod renamer_toml;
pub mod tempfiles;

pub use config::*;
pub use fd_limit::{FDS_PER_WORKER, max_open_fds, max_workers_by_fd_limit};
pub use logger::{Colors, setup_logging};
pub use renamer_toml::{RenamerToml, apply_file_to_opts, load_renamer_toml};
pub use tempfiles::{temp_path_for, write_atomically};
