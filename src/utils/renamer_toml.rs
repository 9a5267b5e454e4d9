//! Load `.renamer.toml` from the root directory (CLI only). Lib callers pass everything via RenameOpts.

use serde::Deserialize;
use std::path::Path;

use crate::utils::config::PackagePaths;

#[derive(Debug, Default, Deserialize)]
pub struct RenamerToml {
    #[serde(default)]
    pub settings: SettingsSection,
}

#[derive(Debug, Default, Deserialize)]
pub struct SettingsSection {
    pub exclude: Option<Vec<String>>,
    pub emit_bom: Option<bool>,
    pub threads: Option<usize>,
    pub verbose: Option<bool>,
    pub assume_yes: Option<bool>,
}

/// Load the config file from `dir` if present. Returns None if missing, unreadable or malformed (warned).
pub fn load_renamer_toml(dir: &Path) -> Option<RenamerToml> {
    let path = dir.join(PackagePaths::get().config_filename());
    let s = std::fs::read_to_string(&path).ok()?;
    parse_renamer_toml(&s)
        .map_err(|e| log::warn!("{}: {}", path.display(), e))
        .ok()
}

pub fn parse_renamer_toml(s: &str) -> Result<RenamerToml, toml::de::Error> {
    toml::from_str(s)
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($section:expr, $opts:expr, $file_field:ident => $opts_field:ident) => {
        if let Some(v) = $section.$file_field {
            $opts.$opts_field = v;
        }
    };
}

/// Apply file config to opts (only fields present in the file). Call before applying CLI flags.
pub fn apply_file_to_opts(file: &RenamerToml, opts: &mut crate::RenameOpts) {
    let s = &file.settings;
    if let Some(ref v) = s.exclude {
        opts.exclude = v.clone();
    }
    apply_file_opt!(s, opts, emit_bom => emit_bom);
    if let Some(n) = s.threads {
        opts.num_threads = Some(n);
    }
}
