//! Run a test body in a child copy of the current test binary.
//!
//! Aborting paths cannot be observed in-process. A test checks
//! [`is_child`] first: in the child it runs the scenario, in the parent it
//! calls [`run_child`] with its own name and inspects the [`ChildRun`].

use std::env;
use std::io;
use std::process::{Command, ExitStatus};

/// Set in the child's environment.
pub const CHILD_VAR: &str = "DYNARR_TEST_CHILD";

#[cfg(unix)]
const SIGABRT: i32 = 6;

/// Whether this process was started by [`run_child`].
pub fn is_child() -> bool {
    env::var_os(CHILD_VAR).is_some()
}

/// Exit status and stderr of a finished child.
pub struct ChildRun {
    pub status: ExitStatus,
    pub stderr: String,
}

impl ChildRun {
    /// `dynarr:` diagnostic lines the child wrote, in order.
    pub fn diagnostics(&self) -> Vec<&str> {
        self.stderr
            .lines()
            .filter(|line| line.starts_with("dynarr: "))
            .collect()
    }

    /// Whether the child was killed by `abort()`.
    pub fn aborted(&self) -> bool {
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            self.status.signal() == Some(SIGABRT)
        }
        #[cfg(not(unix))]
        {
            // 101 is a failed test, not an abort.
            !self.status.success() && self.status.code() != Some(101)
        }
    }
}

/// Re-run exactly the test named `test` in a child process with
/// [`CHILD_VAR`] set, capturing its stderr.
pub fn run_child(test: &str) -> io::Result<ChildRun> {
    let output = Command::new(env::current_exe()?)
        .args([test, "--exact", "--nocapture", "--test-threads=1"])
        .env(CHILD_VAR, "1")
        .output()?;
    Ok(ChildRun {
        status: output.status,
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}
