//! Shared setup for dynarr benchmarks.

#![forbid(unsafe_code)]

use dynarr::{ArrayConfig, DynamicArray};

/// Array of `0..n` built from zero capacity, so every doubling step ran.
pub fn filled(n: u64) -> DynamicArray<u64> {
    let mut arr = quiet(0);
    for i in 0..n {
        arr.push(i);
    }
    arr
}

/// Empty array with diagnostics off, so error-path benches measure the
/// check and not stderr.
pub fn quiet<T>(initial_capacity: usize) -> DynamicArray<T> {
    match DynamicArray::with_config(ArrayConfig::new(initial_capacity).silent()) {
        Ok(arr) => arr,
        Err(e) => panic!("default growth config rejected: {e}"),
    }
}
