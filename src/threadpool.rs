//! Process-wide thread pool configuration (component H).
//!
//! Lazily initializes rayon's global thread pool on first use; `set_threads`
//! lets a caller pin the worker count before the first search runs. Per the
//! contract, calls after the pool already exists are no-ops rather than
//! errors — the `OnceLock` ensures concurrent first-time callers observe the
//! same pool size regardless of which one wins the race.

use crate::util::{ScreenlocError, ScreenlocResult};

#[cfg(feature = "rayon")]
use std::sync::OnceLock;

#[cfg(feature = "rayon")]
static INIT: OnceLock<()> = OnceLock::new();

/// Sets the process-wide worker thread count.
///
/// `n = 0` requests auto-detection (logical core count, floored to 1). Must
/// be called before the first search; later calls are a no-op once the pool
/// has been lazily initialized (by an earlier call, or by the first search).
/// Fails with [`ScreenlocError::InvalidThreadCount`] when `n < 0`.
pub fn set_threads(n: i64) -> ScreenlocResult<()> {
    if n < 0 {
        return Err(ScreenlocError::InvalidThreadCount { value: n });
    }

    #[cfg(feature = "rayon")]
    {
        let threads = n as usize;
        INIT.get_or_init(|| {
            let mut builder = rayon::ThreadPoolBuilder::new();
            if threads > 0 {
                builder = builder.num_threads(threads);
            }
            let _ = builder.build_global();
        });
    }
    #[cfg(not(feature = "rayon"))]
    {
        let _ = n;
    }

    Ok(())
}

/// Ensures the global pool exists before a search runs, using auto-detected
/// parallelism if `set_threads` was never called.
#[cfg(feature = "rayon")]
pub(crate) fn ensure_initialized() {
    INIT.get_or_init(|| {
        let _ = rayon::ThreadPoolBuilder::new().build_global();
    });
}

#[cfg(not(feature = "rayon"))]
pub(crate) fn ensure_initialized() {}
