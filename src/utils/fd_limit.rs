//! File descriptor limit detection for capping the content-rewrite pool (Unix).

/// File descriptors a rewrite worker holds at once (source file + temp file + slack).
pub const FDS_PER_WORKER: usize = 4;

/// Fraction of the process FD limit to use (leave headroom for the walk and logging).
const FD_LIMIT_FRACTION: f64 = 0.8;

/// Returns the soft limit for max open file descriptors, or `None` if unavailable (e.g. Windows).
#[cfg(unix)]
pub fn max_open_fds() -> Option<u64> {
    use std::mem::MaybeUninit;
    let mut rlim = MaybeUninit::<libc::rlimit>::uninit();
    if unsafe { libc::getrlimit(libc::RLIMIT_NOFILE, rlim.as_mut_ptr()) } != 0 {
        return None;
    }
    let rlim = unsafe { rlim.assume_init() };
    let cur = rlim.rlim_cur;
    // RLIM_INFINITY is typically !0 or u64::MAX; treat as "no practical limit"
    if cur == libc::RLIM_INFINITY || cur > i64::MAX as u64 {
        return None;
    }
    Some(cur as u64)
}

#[cfg(not(unix))]
pub fn max_open_fds() -> Option<u64> {
    None
}

/// Max rewrite workers that keep us under ~80% of the FD limit.
/// Returns `None` if no limit is available (use caller's default).
pub fn max_workers_by_fd_limit() -> Option<usize> {
    let limit = max_open_fds()?;
    let usable = (limit as f64 * FD_LIMIT_FRACTION) as usize;
    if usable < FDS_PER_WORKER {
        return Some(1);
    }
    Some(usable / FDS_PER_WORKER)
}

/// Resolve the content-rewrite worker count: explicit request or rayon default,
/// capped by the FD limit and by the number of files, never below one.
pub fn resolve_worker_count(requested: Option<usize>, available: usize, file_count: usize) -> usize {
    let wanted = requested.unwrap_or(available).max(1);
    let capped = match max_workers_by_fd_limit() {
        Some(fd_cap) if fd_cap < wanted => {
            log::debug!("Capping workers {} -> {} (FD limit ~80%)", wanted, fd_cap);
            fd_cap
        }
        _ => wanted,
    };
    capped.min(file_count).max(1)
}
