//! Diagnostic output for failed array operations.
//!
//! Every line has the form `dynarr: <op>(<args>): <error>` and goes to
//! stderr. Recoverable failures respect [`Diagnostics`]; fatal ones are
//! always written before the process aborts.

use std::fmt;

/// Reporting mode for recoverable errors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Diagnostics {
    /// Write one line per failure to stderr.
    #[default]
    Stderr,
    /// Report nothing; callers rely on the returned error alone.
    Silent,
}

impl Diagnostics {
    /// The line [`report`](Self::report) would write, or `None` when
    /// silent.
    pub fn line(
        self,
        op: &str,
        args: fmt::Arguments<'_>,
        err: &dyn fmt::Display,
    ) -> Option<String> {
        match self {
            Diagnostics::Stderr => Some(render(op, args, err)),
            Diagnostics::Silent => None,
        }
    }

    /// Report a recoverable failure of `op` called with `args`.
    pub fn report(self, op: &str, args: fmt::Arguments<'_>, err: &dyn fmt::Display) {
        if let Some(line) = self.line(op, args, err) {
            eprintln!("{line}");
        }
    }
}

/// Format a diagnostic line without writing it.
pub fn render(op: &str, args: fmt::Arguments<'_>, err: &dyn fmt::Display) -> String {
    format!("dynarr: {op}({args}): {err}")
}

/// Report an unrecoverable failure of `op` and abort the process.
pub fn fatal(op: &str, args: fmt::Arguments<'_>, err: &dyn fmt::Display) -> ! {
    eprintln!("{} (fatal)", render(op, args, err));
    std::process::abort()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ArrayError;

    #[test]
    fn render_names_operation_arguments_and_error() {
        let err = ArrayError::IndexOutOfBounds { index: 2, len: 2 };
        let line = render("fetch", format_args!("idx={}", 2), &err);
        assert_eq!(line, "dynarr: fetch(idx=2): index out of bounds: 2 not in 0..2");
    }

    #[test]
    fn render_without_arguments() {
        let line = render("destroy", format_args!(""), &"null array handle");
        assert_eq!(line, "dynarr: destroy(): null array handle");
    }

    #[test]
    fn silent_mode_produces_no_line() {
        let err = ArrayError::IndexOutOfBounds { index: 0, len: 0 };
        assert_eq!(
            Diagnostics::Silent.line("delete", format_args!("idx=0"), &err),
            None
        );
        assert_eq!(
            Diagnostics::Stderr
                .line("delete", format_args!("idx=0"), &err)
                .as_deref(),
            Some("dynarr: delete(idx=0): index out of bounds: 0 (array is empty)")
        );
    }
}
