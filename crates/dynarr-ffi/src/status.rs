//! C-compatible status codes.
//!
//! [`DynarrStatus`] is a `repr(i32)` enum returned by every fallible FFI
//! entry point. Conversions from [`ArrayError`] are provided.

use dynarr::ArrayError;

/// Status code returned by FFI functions.
///
/// `Ok` = 0, all errors are negative. Values are ABI-stable.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DynarrStatus {
    /// Success.
    Ok = 0,
    /// The array handle is null, stale, or was already destroyed.
    InvalidHandle = -1,
    /// Index not in `0..len`.
    IndexOutOfBounds = -2,
    /// A pointer argument is null or otherwise unusable.
    InvalidArgument = -3,
    /// Growth overflowed or the allocator refused.
    AllocationFailed = -4,
    /// Internal error (e.g. poisoned mutex after a prior panic).
    InternalError = -5,
    /// A Rust panic was caught at the FFI boundary.
    Panicked = -128,
}

impl From<&ArrayError> for DynarrStatus {
    fn from(e: &ArrayError) -> Self {
        match e {
            ArrayError::IndexOutOfBounds { .. } => DynarrStatus::IndexOutOfBounds,
            ArrayError::CapacityOverflow { .. } | ArrayError::AllocationFailed { .. } => {
                DynarrStatus::AllocationFailed
            }
        }
    }
}
