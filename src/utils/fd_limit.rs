//! File descriptor budget for capping worker concurrency (Unix).

use log::warn;

/// Descriptors a probe worker may hold at once (socket + DNS / TLS slack).
pub const FDS_PER_WORKER: usize = 2;

/// Descriptors kept free for the dictionary, the three sinks, stdio and the runtime.
const FD_RESERVED: u64 = 32;

/// Soft `RLIMIT_NOFILE`, or `None` when unlimited or unavailable (e.g. Windows).
#[cfg(unix)]
pub fn max_open_fds() -> Option<u64> {
    use std::mem::MaybeUninit;
    let mut rlim = MaybeUninit::<libc::rlimit>::uninit();
    if unsafe { libc::getrlimit(libc::RLIMIT_NOFILE, rlim.as_mut_ptr()) } != 0 {
        return None;
    }
    let cur = unsafe { rlim.assume_init() }.rlim_cur;
    if cur == libc::RLIM_INFINITY || cur > i64::MAX as u64 {
        return None;
    }
    Some(cur as u64)
}

#[cfg(not(unix))]
pub fn max_open_fds() -> Option<u64> {
    None
}

/// Largest worker count that fits in `fd_limit`. Never below 1.
pub fn workers_for_fd_limit(fd_limit: u64) -> usize {
    let usable = fd_limit.saturating_sub(FD_RESERVED) as usize;
    (usable / FDS_PER_WORKER).max(1)
}

/// Cap `requested` workers so open sockets stay under the process FD limit.
pub fn cap_concurrency(requested: usize) -> usize {
    match max_open_fds().map(workers_for_fd_limit) {
        Some(cap) if cap < requested => {
            warn!(
                "Concurrency {} exceeds the open file limit; capping to {} workers",
                requested, cap
            );
            cap
        }
        _ => requested,
    }
}
