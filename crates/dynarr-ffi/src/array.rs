//! Array lifecycle FFI: create, push, fetch, delete, destroy.
//!
//! All arrays live in one global handle table behind a mutex. Elements are
//! moved out of the table before their release function runs, so release
//! functions execute without the lock held and may call back into this API.
//!
//! Failures are reported on stderr under the C entry point's name with the
//! arguments it was called with; the wrapped arrays themselves are silent.

use std::ffi::c_void;
use std::fmt;
use std::ptr;
use std::sync::Mutex;

use dynarr::diagnostics::fatal;
use dynarr::{ArrayConfig, ArrayError, Diagnostics, DynamicArray};

use crate::element::{default_release, DynarrReleaseFn, OwnedElement};
use crate::handle::{BadHandle, HandleTable, NULL_HANDLE};
use crate::status::DynarrStatus;

struct FfiArray {
    items: DynamicArray<OwnedElement>,
    release: DynarrReleaseFn,
}

static ARRAYS: Mutex<HandleTable<FfiArray>> = Mutex::new(HandleTable::new());

fn invalid_handle(op: &str, arr: u64, args: fmt::Arguments<'_>) -> i32 {
    Diagnostics::Stderr.report(op, args, &BadHandle::of(arr));
    DynarrStatus::InvalidHandle as i32
}

fn invalid_argument(op: &str, arg: &str) -> i32 {
    Diagnostics::Stderr.report(op, format_args!("{arg}=NULL"), &"null output pointer");
    DynarrStatus::InvalidArgument as i32
}

fn array_error(op: &str, args: fmt::Arguments<'_>, err: &ArrayError) -> i32 {
    Diagnostics::Stderr.report(op, args, err);
    DynarrStatus::from(err) as i32
}

/// Create an array with room for `initial_capacity` elements.
///
/// `release` frees elements on delete and destroy; pass null to use the C
/// allocator's `free`. On success writes the handle to `arr_out`. Aborts
/// the process if the buffer cannot be allocated.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dynarr_create(
    initial_capacity: usize,
    release: Option<DynarrReleaseFn>,
    arr_out: *mut u64,
) -> i32 {
    ffi_guard!({
        if arr_out.is_null() {
            return invalid_argument("dynarr_create", "arr_out");
        }
        let items = match DynamicArray::with_config(ArrayConfig::new(initial_capacity).silent()) {
            Ok(items) => items,
            Err(err) => {
                Diagnostics::Stderr.report(
                    "dynarr_create",
                    format_args!("initial_capacity={initial_capacity}"),
                    &err,
                );
                return DynarrStatus::InternalError as i32;
            }
        };
        let array = FfiArray {
            items,
            release: release.unwrap_or_else(default_release),
        };
        let handle = ffi_lock!(ARRAYS, "dynarr_create").insert(array);
        // SAFETY: arr_out is valid per caller contract.
        unsafe { *arr_out = handle };
        DynarrStatus::Ok as i32
    })
}

/// Append `value`, transferring its ownership to the array.
///
/// On `InvalidHandle` ownership stays with the caller. Aborts the process
/// if the array cannot grow.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dynarr_push(arr: u64, value: *mut c_void) -> i32 {
    ffi_guard!({
        let mut table = ffi_lock!(ARRAYS, "dynarr_push");
        let Some(array) = table.get_mut(arr) else {
            return invalid_handle(
                "dynarr_push",
                arr,
                format_args!("arr={arr:#x}, value={value:p}"),
            );
        };
        let element = OwnedElement::new(value, array.release);
        array.items.push(element);
        DynarrStatus::Ok as i32
    })
}

/// Element at `idx`, still owned by the array.
///
/// Returns null for an invalid handle or an out-of-range index.
/// **Ambiguity warning:** null is also what a stored null pointer looks
/// like. Prefer [`dynarr_fetch_get`] for unambiguous error detection.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dynarr_fetch(arr: u64, idx: usize) -> *mut c_void {
    ffi_guard_or!(ptr::null_mut(), {
        let Ok(table) = ARRAYS.lock() else {
            Diagnostics::Stderr.report(
                "dynarr_fetch",
                format_args!("arr={arr:#x}, idx={idx}"),
                &"array table lock poisoned",
            );
            return ptr::null_mut();
        };
        let Some(array) = table.get(arr) else {
            invalid_handle("dynarr_fetch", arr, format_args!("arr={arr:#x}, idx={idx}"));
            return ptr::null_mut();
        };
        match array.items.fetch(idx) {
            Ok(element) => element.as_ptr(),
            Err(err) => {
                array_error("dynarr_fetch", format_args!("arr={arr:#x}, idx={idx}"), &err);
                ptr::null_mut()
            }
        }
    })
}

/// Element at `idx` with explicit error reporting.
///
/// Writes the pointer to `*out` and returns `Ok`. Returns `InvalidHandle`,
/// `IndexOutOfBounds` or `InvalidArgument` without writing to `out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dynarr_fetch_get(arr: u64, idx: usize, out: *mut *mut c_void) -> i32 {
    ffi_guard!({
        if out.is_null() {
            return invalid_argument("dynarr_fetch_get", "out");
        }
        let table = ffi_lock!(ARRAYS, "dynarr_fetch_get");
        let Some(array) = table.get(arr) else {
            return invalid_handle("dynarr_fetch_get", arr, format_args!("arr={arr:#x}, idx={idx}"));
        };
        match array.items.fetch(idx) {
            Ok(element) => {
                // SAFETY: out is valid per caller contract.
                unsafe { *out = element.as_ptr() };
                DynarrStatus::Ok as i32
            }
            Err(err) => array_error(
                "dynarr_fetch_get",
                format_args!("arr={arr:#x}, idx={idx}"),
                &err,
            ),
        }
    })
}

/// Release the element at `idx` and close the gap, keeping order.
///
/// The release function runs after the table lock is dropped.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dynarr_delete(arr: u64, idx: usize) -> i32 {
    ffi_guard!({
        let removed = {
            let mut table = ffi_lock!(ARRAYS, "dynarr_delete");
            let Some(array) = table.get_mut(arr) else {
                return invalid_handle(
                    "dynarr_delete",
                    arr,
                    format_args!("arr={arr:#x}, idx={idx}"),
                );
            };
            array.items.remove(idx)
        };
        match removed {
            Ok(element) => {
                drop(element);
                DynarrStatus::Ok as i32
            }
            Err(err) => array_error("dynarr_delete", format_args!("arr={arr:#x}, idx={idx}"), &err),
        }
    })
}

/// Release the element at `idx` and move the last element into its slot.
///
/// The release function runs after the table lock is dropped.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dynarr_swap_delete(arr: u64, idx: usize) -> i32 {
    ffi_guard!({
        let removed = {
            let mut table = ffi_lock!(ARRAYS, "dynarr_swap_delete");
            let Some(array) = table.get_mut(arr) else {
                return invalid_handle(
                    "dynarr_swap_delete",
                    arr,
                    format_args!("arr={arr:#x}, idx={idx}"),
                );
            };
            array.items.swap_remove(idx)
        };
        match removed {
            Ok(element) => {
                drop(element);
                DynarrStatus::Ok as i32
            }
            Err(err) => array_error(
                "dynarr_swap_delete",
                format_args!("arr={arr:#x}, idx={idx}"),
                &err,
            ),
        }
    })
}

/// Number of live elements, written to `*out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dynarr_len(arr: u64, out: *mut usize) -> i32 {
    ffi_guard!({
        if out.is_null() {
            return invalid_argument("dynarr_len", "out");
        }
        let table = ffi_lock!(ARRAYS, "dynarr_len");
        let Some(array) = table.get(arr) else {
            return invalid_handle("dynarr_len", arr, format_args!("arr={arr:#x}"));
        };
        // SAFETY: out is valid per caller contract.
        unsafe { *out = array.items.len() };
        DynarrStatus::Ok as i32
    })
}

/// Number of allocated slots, written to `*out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dynarr_capacity(arr: u64, out: *mut usize) -> i32 {
    ffi_guard!({
        if out.is_null() {
            return invalid_argument("dynarr_capacity", "out");
        }
        let table = ffi_lock!(ARRAYS, "dynarr_capacity");
        let Some(array) = table.get(arr) else {
            return invalid_handle("dynarr_capacity", arr, format_args!("arr={arr:#x}"));
        };
        // SAFETY: out is valid per caller contract.
        unsafe { *out = array.items.capacity() };
        DynarrStatus::Ok as i32
    })
}

/// Release every remaining element, then the array.
///
/// A null handle is a contract violation and aborts the process. A stale
/// handle (e.g. a second destroy) returns `InvalidHandle` and releases
/// nothing.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dynarr_destroy(arr: u64) -> i32 {
    ffi_guard!({
        if arr == NULL_HANDLE {
            fatal(
                "dynarr_destroy",
                format_args!("arr={arr:#x}"),
                &BadHandle::Null,
            );
        }
        // Table guard is dropped before elements are released.
        let removed = ffi_lock!(ARRAYS, "dynarr_destroy").remove(arr);
        match removed {
            Some(array) => {
                array.items.destroy();
                DynarrStatus::Ok as i32
            }
            None => invalid_handle("dynarr_destroy", arr, format_args!("arr={arr:#x}")),
        }
    })
}
