//! Owned opaque element pointers.
//!
//! C callers push `void*` values whose lifetime the array takes over. Each
//! pointer is wrapped in an [`OwnedElement`] that calls the array's release
//! function exactly once when the element is deleted or the array is
//! destroyed.

use std::ffi::c_void;

/// Release function for stored elements: `void (*)(void *)`.
pub type DynarrReleaseFn = unsafe extern "C" fn(ptr: *mut c_void);

#[allow(unsafe_code)]
extern "C" {
    fn free(ptr: *mut c_void);
}

/// The C allocator's `free`, used when no release function is given.
pub(crate) fn default_release() -> DynarrReleaseFn {
    free
}

pub(crate) struct OwnedElement {
    ptr: *mut c_void,
    release: DynarrReleaseFn,
}

// SAFETY: the array is the sole owner of `ptr` once pushed (caller
// contract), and all access goes through the global table mutex.
#[allow(unsafe_code)]
unsafe impl Send for OwnedElement {}

impl OwnedElement {
    pub(crate) fn new(ptr: *mut c_void, release: DynarrReleaseFn) -> Self {
        Self { ptr, release }
    }

    pub(crate) fn as_ptr(&self) -> *mut c_void {
        self.ptr
    }
}

impl Drop for OwnedElement {
    #[allow(unsafe_code)]
    fn drop(&mut self) {
        if self.ptr.is_null() {
            return;
        }
        // SAFETY: `ptr` was handed over by the caller together with a
        // release function able to free it, and is released only here.
        unsafe { (self.release)(self.ptr) };
    }
}
