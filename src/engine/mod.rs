//! Engine module: CLI surface and the helpers shared by the pipeline stages

pub mod arg_parser;
pub mod handlers;
pub mod progress;
pub mod tools;
pub mod validate;

// Re-export commonly used functions
pub use arg_parser::Cli;
pub use handlers::handle_run;
pub use tools::{
    contains_ignore_case, is_valid_name_fragment, path_relative_to, renamed_base_name,
    replace_last_segment, replace_literal, same_entry,
};
pub use validate::{FLAG_PREFIX, validate_change, validate_exclusions, validate_root};
