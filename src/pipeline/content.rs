//! Content stage for a single file: binary guess, then literal substitution and atomic write-back.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::engine::tools::replace_literal;
use crate::error::{IoResultExt, RenameError};
use crate::utils::config::{BinaryHeuristic, READ_CHUNK_SIZE, UTF8_BOM};
use crate::utils::write_atomically;
use crate::{ReplacementPair, RewriteOutcome, SkipReason};

/// Byte values 1..=7 and 14..=25.
pub fn is_control_byte(b: u8) -> bool {
    (b > 0 && b < 8) || (b > 13 && b < 26)
}

/// Streaming state for the binary guess. Feed chunks with [`BinaryDetector::feed`];
/// it latches once a zero run is long enough.
#[derive(Debug, Default)]
pub struct BinaryDetector {
    control_chars: u64,
    zero_run: usize,
    zero_run_hit: bool,
}

impl BinaryDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true as soon as the zero-run condition fires (caller can stop reading).
    pub fn feed(&mut self, chunk: &[u8]) -> bool {
        if self.zero_run_hit {
            return true;
        }
        for &b in chunk {
            if b == 0 {
                self.zero_run += 1;
                if self.zero_run >= BinaryHeuristic::ZERO_RUN_THRESHOLD {
                    self.zero_run_hit = true;
                    return true;
                }
                continue;
            }
            self.zero_run = 0;
            if is_control_byte(b) {
                self.control_chars += 1;
            }
        }
        false
    }

    pub fn is_binary(&self) -> bool {
        self.zero_run_hit || self.control_chars >= BinaryHeuristic::CONTROL_CHARS_THRESHOLD
    }
}

/// Stream `reader` once and guess whether it is binary. Stops early on a zero run;
/// otherwise reads to the end to count control bytes.
pub fn guess_if_binary<R: Read>(reader: R) -> std::io::Result<bool> {
    let mut reader = BufReader::with_capacity(READ_CHUNK_SIZE, reader);
    let mut buffer = vec![0u8; READ_CHUNK_SIZE];
    let mut detector = BinaryDetector::new();
    loop {
        let n = reader.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        if detector.feed(&buffer[..n]) {
            return Ok(true);
        }
    }
    Ok(detector.is_binary())
}

pub fn is_binary_file(path: &Path) -> Result<bool, RenameError> {
    let file = File::open(path).at_path(path)?;
    guess_if_binary(file).at_path(path)
}

/// Substitute in decoded text and re-encode, prefixing a BOM when asked.
/// Returns None when `bytes` is not UTF-8. An input BOM is dropped before substitution.
pub fn rewrite_text(bytes: &[u8], pair: &ReplacementPair, emit_bom: bool) -> Option<(Vec<u8>, usize)> {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let text = std::str::from_utf8(body).ok()?;
    let (replaced, count) = replace_literal(text, &pair.from, &pair.to);
    let mut out = Vec::with_capacity(replaced.len() + UTF8_BOM.len());
    if emit_bom {
        out.extend_from_slice(UTF8_BOM);
    }
    out.extend_from_slice(replaced.as_bytes());
    Some((out, count))
}

/// Process one file. Non-regular files and binaries are skipped; text files are always written
/// back (even with zero matches) so the BOM policy applies uniformly.
pub fn rewrite_file(
    path: &Path,
    pair: &ReplacementPair,
    emit_bom: bool,
) -> Result<RewriteOutcome, RenameError> {
    let meta = std::fs::symlink_metadata(path).at_path(path)?;
    if !meta.file_type().is_file() {
        return Ok(RewriteOutcome::Skipped(SkipReason::NotRegular));
    }
    if is_binary_file(path)? {
        return Ok(RewriteOutcome::Skipped(SkipReason::Binary));
    }
    let bytes = std::fs::read(path).at_path(path)?;
    let Some((out, replacements)) = rewrite_text(&bytes, pair, emit_bom) else {
        return Ok(RewriteOutcome::Skipped(SkipReason::NotUtf8));
    };
    write_atomically(path, &out)?;
    Ok(RewriteOutcome::Rewritten { replacements })
}
