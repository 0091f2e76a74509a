//! Drives the C ABI the way a C caller would: opaque handles, heap
//! elements, a release callback, and status codes.

use std::cell::{Cell, RefCell};
use std::ffi::c_void;
use std::thread;

use dynarr_ffi::{
    dynarr_capacity, dynarr_create, dynarr_delete, dynarr_destroy, dynarr_fetch, dynarr_len,
    dynarr_push, dynarr_swap_delete, DynarrReleaseFn, DynarrStatus, NULL_HANDLE,
};

thread_local! {
    static RELEASED: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

extern "C" fn release_string(ptr: *mut c_void) {
    // SAFETY: every element in these tests comes from `element()`.
    let s = unsafe { Box::from_raw(ptr as *mut String) };
    RELEASED.with(|r| r.borrow_mut().push(*s));
}

fn element(s: &str) -> *mut c_void {
    Box::into_raw(Box::new(s.to_string())) as *mut c_void
}

fn fetch_str(arr: u64, idx: usize) -> Option<String> {
    let p = dynarr_fetch(arr, idx);
    if p.is_null() {
        return None;
    }
    // SAFETY: p came from `element()` and is still owned by the array.
    Some(unsafe { (*(p as *const String)).clone() })
}

fn new_array(initial_capacity: usize) -> u64 {
    let mut arr = NULL_HANDLE;
    let release: DynarrReleaseFn = release_string;
    assert_eq!(
        dynarr_create(initial_capacity, Some(release), &mut arr),
        DynarrStatus::Ok as i32
    );
    arr
}

#[test]
fn growth_delete_and_teardown_through_c_abi() {
    RELEASED.with(|r| r.borrow_mut().clear());
    let arr = new_array(2);
    for s in ["A", "B", "C"] {
        assert_eq!(dynarr_push(arr, element(s)), DynarrStatus::Ok as i32);
    }

    let mut cap = 0;
    let mut len = 0;
    assert_eq!(dynarr_capacity(arr, &mut cap), DynarrStatus::Ok as i32);
    assert_eq!(dynarr_len(arr, &mut len), DynarrStatus::Ok as i32);
    assert_eq!((len, cap), (3, 4));

    assert_eq!(dynarr_delete(arr, 0), DynarrStatus::Ok as i32);
    assert_eq!(fetch_str(arr, 0).as_deref(), Some("B"));
    assert_eq!(fetch_str(arr, 1).as_deref(), Some("C"));
    assert_eq!(fetch_str(arr, 2), None);

    assert_eq!(dynarr_destroy(arr), DynarrStatus::Ok as i32);
    assert_eq!(dynarr_destroy(arr), DynarrStatus::InvalidHandle as i32);
    RELEASED.with(|r| assert_eq!(*r.borrow(), vec!["A", "B", "C"]));
}

#[test]
fn arrays_are_independent() {
    RELEASED.with(|r| r.borrow_mut().clear());
    let a = new_array(0);
    let b = new_array(0);
    assert_ne!(a, b);

    dynarr_push(a, element("a0"));
    dynarr_push(b, element("b0"));
    dynarr_push(b, element("b1"));

    assert_eq!(dynarr_destroy(b), DynarrStatus::Ok as i32);
    assert_eq!(fetch_str(a, 0).as_deref(), Some("a0"));
    assert_eq!(dynarr_delete(b, 0), DynarrStatus::InvalidHandle as i32);

    assert_eq!(dynarr_destroy(a), DynarrStatus::Ok as i32);
    RELEASED.with(|r| assert_eq!(*r.borrow(), vec!["b0", "b1", "a0"]));
}

#[test]
fn arrays_on_separate_threads() {
    let workers: Vec<_> = (0..4)
        .map(|t| {
            thread::spawn(move || {
                RELEASED.with(|r| r.borrow_mut().clear());
                let arr = new_array(1);
                for i in 0..100 {
                    let s = format!("{t}:{i}");
                    assert_eq!(dynarr_push(arr, element(&s)), DynarrStatus::Ok as i32);
                }
                for _ in 0..50 {
                    assert_eq!(dynarr_delete(arr, 0), DynarrStatus::Ok as i32);
                }
                assert_eq!(fetch_str(arr, 0), Some(format!("{t}:50")));
                assert_eq!(dynarr_destroy(arr), DynarrStatus::Ok as i32);
                RELEASED.with(|r| r.borrow().len())
            })
        })
        .collect();
    for w in workers {
        assert_eq!(w.join().unwrap(), 100);
    }
}

#[test]
fn push_to_destroyed_array_leaves_ownership_with_caller() {
    let arr = new_array(0);
    assert_eq!(dynarr_destroy(arr), DynarrStatus::Ok as i32);

    let p = element("orphan");
    assert_eq!(dynarr_push(arr, p), DynarrStatus::InvalidHandle as i32);
    assert!(dynarr_fetch(arr, 0).is_null());
    release_string(p);
    assert!(dynarr_fetch(NULL_HANDLE, 0).is_null());
}

thread_local! {
    static WATCHED: Cell<u64> = const { Cell::new(NULL_HANDLE) };
    static SEEN_LENS: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

/// Frees a `String` and records the length of the watched array, calling
/// back into the API from inside a release.
extern "C" fn release_and_query(ptr: *mut c_void) {
    // SAFETY: every element in this test comes from `element()`.
    drop(unsafe { Box::from_raw(ptr as *mut String) });
    let mut len = usize::MAX;
    let status = dynarr_len(WATCHED.with(Cell::get), &mut len);
    assert_eq!(status, DynarrStatus::Ok as i32);
    SEEN_LENS.with(|s| s.borrow_mut().push(len));
}

#[test]
fn release_function_may_call_back_into_the_api() {
    let watched = new_array(0);
    dynarr_push(watched, element("w"));
    WATCHED.with(|w| w.set(watched));

    let mut arr = NULL_HANDLE;
    let release: DynarrReleaseFn = release_and_query;
    assert_eq!(
        dynarr_create(4, Some(release), &mut arr),
        DynarrStatus::Ok as i32
    );
    for s in ["a", "b", "c", "d"] {
        dynarr_push(arr, element(s));
    }

    assert_eq!(dynarr_delete(arr, 0), DynarrStatus::Ok as i32);
    assert_eq!(dynarr_swap_delete(arr, 0), DynarrStatus::Ok as i32);
    assert_eq!(dynarr_destroy(arr), DynarrStatus::Ok as i32);
    SEEN_LENS.with(|s| assert_eq!(*s.borrow(), vec![1, 1, 1, 1]));

    assert_eq!(dynarr_destroy(watched), DynarrStatus::Ok as i32);
}
