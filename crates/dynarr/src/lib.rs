//! Growable array that exclusively owns its elements.
//!
//! [`DynamicArray`] keeps a contiguous buffer of `capacity` slots of which
//! the first `len` are live. Pushing past capacity grows the buffer by a
//! configurable factor; deleting compacts the tail so indices stay dense.
//! Every stored value is owned by the array and dropped on delete or
//! teardown.
//!
//! # Error classes
//!
//! - **Recoverable:** out-of-range indices on [`fetch`](DynamicArray::fetch)
//!   and [`delete`](DynamicArray::delete). A diagnostic is written, nothing
//!   is mutated, and an [`ArrayError`] is returned.
//! - **Fatal:** allocator failure or capacity overflow on
//!   [`create`](DynamicArray::create) and [`push`](DynamicArray::push). A
//!   diagnostic is written and the process aborts.
//!   [`try_push`](DynamicArray::try_push) surfaces the same condition as a
//!   [`PushError`] instead.
//!
//! ```rust
//! use dynarr::DynamicArray;
//!
//! let mut arr = DynamicArray::create(2);
//! arr.push("a");
//! arr.push("b");
//! arr.push("c");
//! assert_eq!(arr.capacity(), 4);
//!
//! arr.delete(0).unwrap();
//! assert_eq!(arr.fetch(0), Ok(&"b"));
//! assert!(arr.fetch(2).is_err());
//!
//! assert_eq!(arr.destroy(), 2);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod array;
pub mod config;
pub mod diagnostics;
pub mod error;

pub use array::DynamicArray;
pub use config::ArrayConfig;
pub use diagnostics::Diagnostics;
pub use error::{ArrayError, ConfigError, PushError};
