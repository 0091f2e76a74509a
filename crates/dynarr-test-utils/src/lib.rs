//! Test fixtures for dynarr development.
//!
//! [`DropLog`] hands out [`Tracked`] values that record their id when they
//! are dropped, so tests can assert exactly which elements an array
//! released and in what order. [`child`] re-runs a test in a child
//! process so aborting paths and stderr output can be asserted on.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::fmt;
use std::sync::{Arc, Mutex};

pub mod child;

/// Shared record of dropped [`Tracked`] ids.
///
/// Cloning a log shares the same record.
#[derive(Clone, Default)]
pub struct DropLog {
    dropped: Arc<Mutex<Vec<u32>>>,
}

impl DropLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap `id` in a value that reports to this log when dropped.
    pub fn track(&self, id: u32) -> Tracked {
        Tracked {
            id,
            log: Arc::clone(&self.dropped),
        }
    }

    /// Ids dropped so far, in drop order.
    pub fn dropped(&self) -> Vec<u32> {
        self.dropped
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Number of values dropped so far.
    pub fn count(&self) -> usize {
        self.dropped
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

/// A value whose drop is recorded in a [`DropLog`].
pub struct Tracked {
    id: u32,
    log: Arc<Mutex<Vec<u32>>>,
}

impl Tracked {
    pub fn id(&self) -> u32 {
        self.id
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl fmt::Debug for Tracked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tracked({})", self.id)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        if let Ok(mut dropped) = self.log.lock() {
            dropped.push(self.id);
        }
    }
}
