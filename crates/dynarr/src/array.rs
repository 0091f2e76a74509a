//! The growable array itself.
//!
//! Storage is a `Vec<Option<T>>` whose length *is* the array's capacity:
//! slots `0..len` are `Some`, slots `len..capacity` are `None`. Growth is
//! driven explicitly by [`ArrayConfig`] rather than by `Vec`'s own
//! amortization, so `capacity()` always reports exactly the slots this
//! array asked for.

use std::fmt;

use crate::config::ArrayConfig;
use crate::diagnostics::fatal;
use crate::error::{ArrayError, ConfigError, PushError};

/// An ordered, index-addressable sequence of owned values.
///
/// The array is the sole owner of everything pushed into it. Values leave
/// only by being dropped: one at a time through [`delete`](Self::delete) or
/// [`swap_delete`](Self::swap_delete), or all at once through
/// [`destroy`](Self::destroy) (or by dropping the array).
pub struct DynamicArray<T> {
    slots: Vec<Option<T>>,
    len: usize,
    config: ArrayConfig,
}

impl<T> DynamicArray<T> {
    /// Create an empty array with room for `initial_capacity` elements.
    ///
    /// A capacity of 0 is legal; the first push grows the buffer.
    ///
    /// Aborts the process with a diagnostic if the buffer cannot be
    /// allocated.
    pub fn create(initial_capacity: usize) -> Self {
        Self::allocate(ArrayConfig::new(initial_capacity))
    }

    /// Create an empty array from a validated config.
    ///
    /// Allocation failure aborts, as with [`create`](Self::create).
    pub fn with_config(config: ArrayConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::allocate(config))
    }

    fn allocate(config: ArrayConfig) -> Self {
        let capacity = config.initial_capacity;
        let mut slots = Vec::new();
        if slots.try_reserve_exact(capacity).is_err() {
            fatal(
                "create",
                format_args!("initial_capacity={capacity}"),
                &ArrayError::AllocationFailed {
                    requested: capacity,
                },
            );
        }
        slots.resize_with(capacity, || None);
        Self {
            slots,
            len: 0,
            config,
        }
    }

    /// Number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the array holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of allocated slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// The config this array was built with.
    pub fn config(&self) -> &ArrayConfig {
        &self.config
    }

    /// Append `value`, growing the buffer first if it is full.
    ///
    /// Amortized O(1). Aborts the process with a diagnostic if growth
    /// overflows or the allocator fails; use [`try_push`](Self::try_push)
    /// to handle that instead.
    pub fn push(&mut self, value: T) {
        if self.len == self.capacity() {
            if let Err(err) = self.grow() {
                fatal(
                    "push",
                    format_args!("len={}, capacity={}", self.len, self.capacity()),
                    &err,
                );
            }
        }
        self.write_next(value);
    }

    /// Append `value`, returning it inside a [`PushError`] if the buffer
    /// could not grow. The array is unchanged on error.
    pub fn try_push(&mut self, value: T) -> Result<(), PushError<T>> {
        if self.len == self.capacity() {
            if let Err(error) = self.grow() {
                self.config.diagnostics.report(
                    "try_push",
                    format_args!("len={}, capacity={}", self.len, self.capacity()),
                    &error,
                );
                return Err(PushError { error, value });
            }
        }
        self.write_next(value);
        Ok(())
    }

    /// Shared reference to the element at `idx`.
    pub fn fetch(&self, idx: usize) -> Result<&T, ArrayError> {
        if idx >= self.len {
            return Err(self.out_of_bounds("fetch", idx));
        }
        self.slots[idx].as_ref().ok_or(ArrayError::IndexOutOfBounds {
            index: idx,
            len: self.len,
        })
    }

    /// Mutable reference to the element at `idx`.
    pub fn fetch_mut(&mut self, idx: usize) -> Result<&mut T, ArrayError> {
        let len = self.len;
        if idx >= len {
            return Err(self.out_of_bounds("fetch_mut", idx));
        }
        self.slots[idx]
            .as_mut()
            .ok_or(ArrayError::IndexOutOfBounds { index: idx, len })
    }

    /// Drop the element at `idx` and shift the tail left to close the gap.
    ///
    /// Surviving elements keep their relative order. O(len - idx).
    pub fn delete(&mut self, idx: usize) -> Result<(), ArrayError> {
        self.take_compacting("delete", idx).map(drop)
    }

    /// Move the element at `idx` out, shifting the tail left like
    /// [`delete`](Self::delete). The caller decides when the value drops.
    pub fn remove(&mut self, idx: usize) -> Result<T, ArrayError> {
        self.take_compacting("remove", idx)
    }

    /// Drop the element at `idx` and move the last element into its place.
    ///
    /// O(1), but the order of the remaining elements is not preserved.
    pub fn swap_delete(&mut self, idx: usize) -> Result<(), ArrayError> {
        self.take_swapping("swap_delete", idx).map(drop)
    }

    /// Move the element at `idx` out, filling the hole with the last
    /// element like [`swap_delete`](Self::swap_delete).
    pub fn swap_remove(&mut self, idx: usize) -> Result<T, ArrayError> {
        self.take_swapping("swap_remove", idx)
    }

    /// Drop every remaining element, then the buffer.
    ///
    /// Returns the number of elements released. Consumes the array, so it
    /// cannot be used or destroyed again.
    pub fn destroy(self) -> usize {
        let Self { slots, len, .. } = self;
        drop(slots);
        len
    }

    fn grow(&mut self) -> Result<(), ArrayError> {
        let capacity = self.capacity();
        let requested = self
            .config
            .next_capacity(capacity)
            .ok_or(ArrayError::CapacityOverflow { capacity })?;
        self.slots
            .try_reserve_exact(requested - capacity)
            .map_err(|_| ArrayError::AllocationFailed { requested })?;
        self.slots.resize_with(requested, || None);
        Ok(())
    }

    fn write_next(&mut self, value: T) {
        debug_assert!(self.len < self.capacity());
        self.slots[self.len] = Some(value);
        self.len += 1;
    }

    fn take_compacting(&mut self, op: &str, idx: usize) -> Result<T, ArrayError> {
        let removed = self.take_live(op, idx)?;
        // The emptied slot rotates to `len - 1`, which becomes the first unused slot.
        self.slots[idx..self.len].rotate_left(1);
        self.len -= 1;
        Ok(removed)
    }

    fn take_swapping(&mut self, op: &str, idx: usize) -> Result<T, ArrayError> {
        let removed = self.take_live(op, idx)?;
        self.slots.swap(idx, self.len - 1);
        self.len -= 1;
        Ok(removed)
    }

    fn take_live(&mut self, op: &str, idx: usize) -> Result<T, ArrayError> {
        let len = self.len;
        if idx >= len {
            return Err(self.out_of_bounds(op, idx));
        }
        self.slots[idx]
            .take()
            .ok_or(ArrayError::IndexOutOfBounds { index: idx, len })
    }

    fn out_of_bounds(&self, op: &str, idx: usize) -> ArrayError {
        let err = ArrayError::IndexOutOfBounds {
            index: idx,
            len: self.len,
        };
        self.config
            .diagnostics
            .report(op, format_args!("idx={idx}"), &err);
        err
    }
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::create(0)
    }
}

impl<T> fmt::Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicArray")
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}
