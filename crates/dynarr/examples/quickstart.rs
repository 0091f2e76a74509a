//! dynarr quickstart: the full lifecycle of one array.
//!
//! Demonstrates:
//!   1. Creating an array with a small initial capacity
//!   2. Pushing past capacity and watching it double
//!   3. Fetching by index, including an out-of-range index
//!   4. Deleting with compaction and with swap
//!   5. Tearing the array down
//!
//! Run with:
//!   cargo run -p dynarr --example quickstart

use dynarr::{ArrayError, DynamicArray};

struct Job {
    name: &'static str,
}

impl Drop for Job {
    fn drop(&mut self) {
        println!("  released job {}", self.name);
    }
}

fn main() -> Result<(), ArrayError> {
    let mut jobs = DynamicArray::create(2);
    println!("created: len={} capacity={}", jobs.len(), jobs.capacity());

    for name in ["fetch", "build", "test", "package", "deploy"] {
        jobs.push(Job { name });
        println!(
            "pushed {name:<8} len={} capacity={}",
            jobs.len(),
            jobs.capacity()
        );
    }

    println!("job 2 is {}", jobs.fetch(2)?.name);

    // Recoverable: reported on stderr, array untouched.
    if let Err(e) = jobs.fetch(jobs.len()) {
        println!("expected error: {e}");
    }

    println!("delete(0), keeping order:");
    jobs.delete(0)?;
    println!("swap_delete(0), moving the last job forward:");
    jobs.swap_delete(0)?;
    for i in 0..jobs.len() {
        println!("  [{i}] {}", jobs.fetch(i)?.name);
    }

    println!("destroy:");
    let released = jobs.destroy();
    println!("released {released} remaining jobs");
    Ok(())
}
