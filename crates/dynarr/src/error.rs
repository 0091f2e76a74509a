//! Array-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during array operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArrayError {
    /// The index is not in `0..len`. Also returned for every index of an
    /// empty array.
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// Number of live elements at the time of the call.
        len: usize,
    },
    /// The next capacity cannot be represented (`capacity * growth_factor`
    /// overflowed `usize` or the byte size exceeded `isize::MAX`).
    CapacityOverflow {
        /// Capacity at the time growth was attempted.
        capacity: usize,
    },
    /// The allocator refused to provide the requested slots.
    AllocationFailed {
        /// Capacity (in slots) that was requested.
        requested: usize,
    },
}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfBounds { index, len: 0 } => {
                write!(f, "index out of bounds: {index} (array is empty)")
            }
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index out of bounds: {index} not in 0..{len}")
            }
            Self::CapacityOverflow { capacity } => {
                write!(f, "capacity overflow growing from {capacity} slots")
            }
            Self::AllocationFailed { requested } => {
                write!(f, "failed to allocate {requested} slots")
            }
        }
    }
}

impl Error for ArrayError {}

/// A rejected [`try_push`](crate::DynamicArray::try_push).
///
/// Ownership of the value goes back to the caller; the array is unchanged.
pub struct PushError<T> {
    /// Why the push could not complete.
    pub error: ArrayError,
    /// The value that was not stored.
    pub value: T,
}

impl<T> PushError<T> {
    /// Recover the value that was not stored.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T> fmt::Debug for PushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PushError")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<T> fmt::Display for PushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "push rejected: {}", self.error)
    }
}

impl<T> Error for PushError<T> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.error)
    }
}

/// Errors detected during [`ArrayConfig::validate()`](crate::ArrayConfig::validate).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A growth factor below 2 cannot guarantee amortized O(1) push.
    GrowthFactorTooSmall {
        /// The configured factor.
        configured: usize,
    },
    /// Growing from zero capacity would leave no room for the next element.
    MinCapacityZero,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GrowthFactorTooSmall { configured } => {
                write!(f, "growth factor must be at least 2, got {configured}")
            }
            Self::MinCapacityZero => write!(f, "minimum capacity must be at least 1"),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_message_names_index_and_range() {
        let err = ArrayError::IndexOutOfBounds { index: 5, len: 3 };
        assert_eq!(err.to_string(), "index out of bounds: 5 not in 0..3");
    }

    #[test]
    fn out_of_bounds_on_empty_array_says_so() {
        let err = ArrayError::IndexOutOfBounds { index: 0, len: 0 };
        assert_eq!(err.to_string(), "index out of bounds: 0 (array is empty)");
    }

    #[test]
    fn push_error_returns_value_and_chains_source() {
        let err = PushError {
            error: ArrayError::AllocationFailed { requested: 8 },
            value: String::from("kept"),
        };
        assert!(err.to_string().contains("failed to allocate 8 slots"));
        assert!(err.source().is_some());
        assert_eq!(err.into_inner(), "kept");
    }

    #[test]
    fn config_error_display() {
        assert_eq!(
            ConfigError::GrowthFactorTooSmall { configured: 1 }.to_string(),
            "growth factor must be at least 2, got 1"
        );
        assert_eq!(
            ConfigError::MinCapacityZero.to_string(),
            "minimum capacity must be at least 1"
        );
    }
}
