use clap::Parser;
use std::path::PathBuf;

struct DefaultArgs;

impl DefaultArgs {
    pub const DIR: &'static str = ".";
}

/// Replace a string in file names, directory names and text file contents, recursively.
#[derive(Clone, Debug, Parser)]
#[command(name = "renamer")]
#[command(
    about = "Replace FROM with TO in every file name, directory name and text file under DIR."
)]
pub struct Cli {
    /// Directory to process. Default: current directory.
    #[arg(value_name = "DIR", default_value = DefaultArgs::DIR)]
    pub dir: PathBuf,

    /// Text to replace and its replacement: --change FROM TO
    #[arg(long, short = 'c', num_args = 2, value_names = ["FROM", "TO"], required = true, allow_hyphen_values = true)]
    pub change: Vec<String>,

    /// Skip any path containing one of these (case-insensitive). Comma-separated and/or repeated.
    #[arg(long, short = 'e', value_delimiter = ',', num_args = 1..)]
    pub exclude: Vec<String>,

    /// Write a UTF-8 byte-order mark at the head of rewritten text files.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub emit_bom: Option<bool>,

    /// List what would change; do not touch anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Do not ask for confirmation.
    #[arg(long, short = 'y', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub yes: Option<bool>,

    /// Content-rewrite worker count. Default: available cores, capped by the FD limit.
    #[arg(long, short = 't', value_parser = clap::value_parser!(usize))]
    pub threads: Option<usize>,

    /// Verbose output.
    #[arg(long, short = 'v', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,
}

impl Cli {
    /// (FROM, TO) from `--change`. clap guarantees exactly two values.
    pub fn change_pair(&self) -> (&str, &str) {
        match self.change.as_slice() {
            [from, to] => (from.as_str(), to.as_str()),
            _ => ("", ""),
        }
    }
}
