use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{IoResultExt, RenameError};
use crate::utils::config::{PackagePaths, TEMP_NAME_ATTEMPTS};

/// Sibling temp path used while replacing `target`, e.g. `dir/.notes.txt.renamer.tmp`.
pub fn temp_path_for(target: &Path) -> PathBuf {
    temp_candidate(target, 0)
}

/// `attempt` 0 is [`temp_path_for`]; later attempts insert a counter (`.notes.txt.1.renamer.tmp`).
fn temp_candidate(target: &Path, attempt: u32) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    let suffix = PackagePaths::get().temp_suffix();
    let file_name = if attempt == 0 {
        format!(".{name}{suffix}")
    } else {
        format!(".{name}.{attempt}{suffix}")
    };
    target.parent().unwrap_or(Path::new(".")).join(file_name)
}

/// Replace the contents of `target` with `bytes`.
///
/// The target must be writable, exactly as for a direct write; a read-only file fails with
/// `AccessDenied` and is left as it was. Files with other hard links are written in place so
/// every link sees the new content. Otherwise a fresh sibling temp file is written, the original
/// permissions are copied onto it and it is renamed over `target`. Existing files are never
/// reused as the temp file. On failure the temp file is removed and `target` is unchanged.
pub fn write_atomically(target: &Path, bytes: &[u8]) -> Result<(), RenameError> {
    let meta = fs::metadata(target).at_path(target)?;
    let handle = OpenOptions::new().write(true).open(target).at_path(target)?;
    if has_other_links(&meta) {
        return write_in_place(handle, target, bytes);
    }
    drop(handle);

    let (temp_path, temp_file) = create_temp(target)?;
    let result = fill_temp(temp_file, &temp_path, bytes)
        .and_then(|_| fs::set_permissions(&temp_path, meta.permissions()).at_path(&temp_path))
        .and_then(|_| fs::rename(&temp_path, target).at_path(target));

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

#[cfg(unix)]
fn has_other_links(meta: &fs::Metadata) -> bool {
    use std::os::unix::fs::MetadataExt;
    meta.nlink() > 1
}

#[cfg(not(unix))]
fn has_other_links(_meta: &fs::Metadata) -> bool {
    false
}

fn write_in_place(mut file: File, target: &Path, bytes: &[u8]) -> Result<(), RenameError> {
    file.set_len(0).at_path(target)?;
    file.write_all(bytes).at_path(target)?;
    file.sync_all().at_path(target)
}

/// Create the first free temp candidate with `create_new`.
fn create_temp(target: &Path) -> Result<(PathBuf, File), RenameError> {
    for attempt in 0..TEMP_NAME_ATTEMPTS {
        let candidate = temp_candidate(target, attempt);
        match OpenOptions::new().write(true).create_new(true).open(&candidate) {
            Ok(file) => return Ok((candidate, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(RenameError::from_io(&candidate, e)),
        }
    }
    Err(RenameError::Io {
        path: temp_path_for(target),
        source: io::Error::new(io::ErrorKind::AlreadyExists, "no free temp file name"),
    })
}

fn fill_temp(mut file: File, temp_path: &Path, bytes: &[u8]) -> Result<(), RenameError> {
    file.write_all(bytes).at_path(temp_path)?;
    file.sync_all().at_path(temp_path)
}
