//! Kernel invocation.
//!
//! The thinnest layer in the harness: call the timed routine, hand its
//! cycle count back untouched. No scaling, no validation, no caching.
//! Whether the calling thread is pinned is the runner's responsibility;
//! this layer has no way to check it.

use crate::kernels::KernelFn;

/// Invoke one timed kernel and return its cycle-count result as-is.
///
/// The kernel is trusted: it always returns, and a trap inside it is
/// fatal to the process rather than recoverable here.
#[inline(never)]
pub fn invoke(kernel: KernelFn) -> u64 {
    kernel()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    fn const_stub() -> u64 {
        0xDEAD_BEEF
    }

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    fn counting_stub() -> u64 {
        COUNTER.fetch_add(1, Ordering::SeqCst) + 1
    }

    #[test]
    fn passes_kernel_result_through_untouched() {
        assert_eq!(invoke(const_stub), 0xDEAD_BEEF);
        assert_eq!(invoke(const_stub), 0xDEAD_BEEF);
    }

    #[test]
    fn repeated_invocations_are_not_memoized() {
        let first = invoke(counting_stub);
        let second = invoke(counting_stub);
        let third = invoke(counting_stub);
        assert!(second > first);
        assert!(third > second);
    }
}
