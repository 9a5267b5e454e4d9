//! Path and string utilities

use std::path::{Path, PathBuf};

/// Convert absolute path to relative path from base
pub fn path_relative_to(path: &Path, base: &Path) -> Option<PathBuf> {
    path.strip_prefix(base).ok().map(|p| p.to_path_buf())
}

/// True if `haystack` contains `needle`, ignoring case.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Replace every non-overlapping occurrence of `from`, scanning left to right. Case-sensitive.
/// Returns the new string and the number of replacements.
pub fn replace_literal(text: &str, from: &str, to: &str) -> (String, usize) {
    if from.is_empty() {
        return (text.to_string(), 0);
    }
    let count = text.matches(from).count();
    if count == 0 {
        return (text.to_string(), 0);
    }
    (text.replace(from, to), count)
}

/// Same parent, new final segment.
pub fn replace_last_segment(path: &Path, new_name: &str) -> PathBuf {
    match path.parent() {
        Some(parent) => parent.join(new_name),
        None => PathBuf::from(new_name),
    }
}

/// New base name for `name`, or None if it should not be renamed.
///
/// Whether to attempt is decided case-insensitively; the substitution itself is case-sensitive,
/// so a name that only matches by case yields None (nothing to change).
pub fn renamed_base_name(name: &str, from: &str, to: &str) -> Option<String> {
    if !contains_ignore_case(name, from) {
        return None;
    }
    let (new_name, count) = replace_literal(name, from, to);
    if count == 0 || new_name == name {
        return None;
    }
    Some(new_name)
}

/// True if `a` and `b` are the same filesystem object (e.g. case-only rename on a
/// case-insensitive filesystem).
#[cfg(unix)]
pub fn same_entry(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;
    match (std::fs::symlink_metadata(a), std::fs::symlink_metadata(b)) {
        (Ok(ma), Ok(mb)) => ma.dev() == mb.dev() && ma.ino() == mb.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
pub fn same_entry(a: &Path, b: &Path) -> bool {
    let a = a.to_string_lossy().to_lowercase();
    let b = b.to_string_lossy().to_lowercase();
    a == b
}

/// Characters that can never appear in a file name on this platform.
#[cfg(windows)]
const INVALID_NAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*', '\0'];

#[cfg(not(windows))]
const INVALID_NAME_CHARS: &[char] = &['/', '\0'];

/// True if `name` can be part of a file name (no separators, no reserved characters).
pub fn is_valid_name_fragment(name: &str) -> bool {
    if name.contains(INVALID_NAME_CHARS) {
        return false;
    }
    // Windows also rejects every control character.
    !(cfg!(windows) && name.chars().any(char::is_control))
}
