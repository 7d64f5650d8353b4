//! Host stack management for the recursive evaluator.
//!
//! Evaluation recurses through builtins and closures, so the host stack is
//! grown on demand instead of relying on the calling thread's stack size.

/// Runs `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    const RED_ZONE: usize = 128 * 1024;
    const GROWTH: usize = 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, GROWTH, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deep_recursion() {
        fn count(n: u64) -> u64 {
            ensure_sufficient_stack(|| if n == 0 { 0 } else { count(n - 1) + 1 })
        }

        assert_eq!(count(100_000), 100_000);
    }
}
