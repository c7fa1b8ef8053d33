//! Domain-specific assertion macros for campo harnesses.
//!
//! These add context-rich failure messages that make it clear which record
//! or store invariant was violated.

/// Assert two floats are equal within `1e-9`.
///
/// ```rust
/// assert_close!(summary.total_hectares, 30.0);
/// ```
#[macro_export]
macro_rules! assert_close {
    ($actual:expr, $expected:expr) => {{
        let actual: f64 = $actual;
        let expected: f64 = $expected;
        if (actual - expected).abs() > 1e-9 {
            panic!(
                "assert_close! failed:\n  expected: {}\n  actual:   {}",
                expected, actual
            );
        }
    }};
}

/// Assert that a store holds exactly `$n` records and is (or is not) ready.
///
/// ```rust
/// assert_store!(store, len 3, ready);
/// assert_store!(store, len 0, not ready);
/// ```
#[macro_export]
macro_rules! assert_store {
    ($store:expr, len $n:expr, ready) => {{
        let store: &campo_core::Store = &$store;
        assert_eq!(store.len(), $n, "store length");
        assert!(
            store.is_ready(),
            "assert_store! failed: store not ready\n  columns: {:?}",
            store.columns()
        );
    }};
    ($store:expr, len $n:expr, not ready) => {{
        let store: &campo_core::Store = &$store;
        assert_eq!(store.len(), $n, "store length");
        assert!(
            !store.is_ready(),
            "assert_store! failed: store unexpectedly ready\n  columns: {:?}",
            store.columns()
        );
    }};
}
