//! C ABI for dynarr.
//!
//! Exposes `DynamicArray` to C as opaque `u64` handles holding `void*`
//! elements. The array owns each pushed pointer and frees it with the
//! release function chosen at creation (the C allocator's `free` by
//! default). This is the only crate in the workspace that may contain
//! `unsafe` code.
//!
//! Every entry point is wrapped in `ffi_guard!`, which turns a Rust panic
//! into [`DynarrStatus::Panicked`] and stores the message for
//! [`dynarr_last_panic_message`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

use std::any::Any;
use std::cell::RefCell;
use std::ffi::c_char;

thread_local! {
    pub(crate) static LAST_PANIC: RefCell<String> = const { RefCell::new(String::new()) };
}

/// Run `$body` under `catch_unwind`, returning `$fallback` if it panics.
macro_rules! ffi_guard_or {
    ($fallback:expr, $body:block) => {{
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $body)) {
            Ok(value) => value,
            Err(payload) => {
                $crate::record_panic(payload.as_ref());
                $fallback
            }
        }
    }};
}

/// `ffi_guard_or!` for entry points returning a status code.
macro_rules! ffi_guard {
    ($body:block) => {
        ffi_guard_or!($crate::status::DynarrStatus::Panicked as i32, $body)
    };
}

/// Lock a mutex inside an `ffi_guard!` body. A poisoned lock is reported
/// under `$op` and returns `InternalError`.
macro_rules! ffi_lock {
    ($mutex:expr, $op:expr) => {
        match $mutex.lock() {
            Ok(guard) => guard,
            Err(_) => {
                ::dynarr::Diagnostics::Stderr.report(
                    $op,
                    format_args!(""),
                    &"array table lock poisoned",
                );
                return $crate::status::DynarrStatus::InternalError as i32;
            }
        }
    };
}

pub mod array;
pub mod element;
mod handle;
pub mod status;

pub use array::{
    dynarr_capacity, dynarr_create, dynarr_delete, dynarr_destroy, dynarr_fetch,
    dynarr_fetch_get, dynarr_len, dynarr_push, dynarr_swap_delete,
};
pub use element::DynarrReleaseFn;
pub use handle::NULL_HANDLE;
pub use status::DynarrStatus;

pub(crate) fn record_panic(payload: &(dyn Any + Send)) {
    let msg = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        String::from("unknown panic payload")
    };
    LAST_PANIC.with(|cell| *cell.borrow_mut() = msg);
}

/// Copy the message of the last panic caught on this thread into `buf`.
///
/// Returns the full message length in bytes (excluding the NUL), or 0 if
/// no panic has been recorded. At most `buf_len - 1` bytes are written,
/// followed by a NUL terminator. Pass a null `buf` to query the length.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dynarr_last_panic_message(buf: *mut c_char, buf_len: usize) -> i32 {
    LAST_PANIC.with(|cell| {
        let msg = cell.borrow();
        if !buf.is_null() && buf_len > 0 {
            let n = msg.len().min(buf_len - 1);
            // SAFETY: buf points to buf_len writable bytes per caller contract.
            unsafe {
                std::ptr::copy_nonoverlapping(msg.as_ptr(), buf as *mut u8, n);
                *buf.add(n) = 0;
            }
        }
        msg.len().min(i32::MAX as usize) as i32
    })
}
