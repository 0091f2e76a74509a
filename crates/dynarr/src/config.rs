//! Array configuration parameters.

use crate::diagnostics::Diagnostics;
use crate::error::ConfigError;

/// Configuration for a [`DynamicArray`](crate::DynamicArray).
///
/// Controls the starting capacity, the growth curve, and whether
/// recoverable errors are reported on stderr. Validated at construction;
/// immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayConfig {
    /// Number of slots allocated by the constructor. Zero is legal.
    pub initial_capacity: usize,

    /// Multiplier applied to the capacity when a push finds the buffer full.
    ///
    /// Default: 2. Must be at least 2.
    pub growth_factor: usize,

    /// Lower bound on the capacity after any growth step.
    ///
    /// Default: 1. Must be at least 1, otherwise growth from an empty
    /// buffer would produce another empty buffer.
    pub min_capacity: usize,

    /// Where recoverable-error diagnostics go. Fatal diagnostics are
    /// always written.
    pub diagnostics: Diagnostics,
}

impl ArrayConfig {
    /// Default growth factor (doubling).
    pub const DEFAULT_GROWTH_FACTOR: usize = 2;

    /// Default capacity floor applied when growing.
    pub const DEFAULT_MIN_CAPACITY: usize = 1;

    /// Create a config with the given initial capacity and default
    /// values for everything else.
    pub fn new(initial_capacity: usize) -> Self {
        Self {
            initial_capacity,
            growth_factor: Self::DEFAULT_GROWTH_FACTOR,
            min_capacity: Self::DEFAULT_MIN_CAPACITY,
            diagnostics: Diagnostics::default(),
        }
    }

    /// Same config with diagnostics suppressed.
    pub fn silent(mut self) -> Self {
        self.diagnostics = Diagnostics::Silent;
        self
    }

    /// Check the growth invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.growth_factor < 2 {
            return Err(ConfigError::GrowthFactorTooSmall {
                configured: self.growth_factor,
            });
        }
        if self.min_capacity == 0 {
            return Err(ConfigError::MinCapacityZero);
        }
        Ok(())
    }

    /// Capacity after one growth step from `capacity`, or `None` on overflow.
    pub fn next_capacity(&self, capacity: usize) -> Option<usize> {
        capacity
            .checked_mul(self.growth_factor)
            .map(|grown| grown.max(self.min_capacity))
    }
}

impl Default for ArrayConfig {
    fn default() -> Self {
        Self::new(0)
    }
}
