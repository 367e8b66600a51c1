/*
 * Error types shared by the git-revision-info library and CLI.
 *
 * This crate uses:
 * 1. snafu: For the error enum and its context selectors.
 * 2. miette: For diagnostic codes and help text.
 * 3. tracing: For logging failures that the caller chose to recover from.
 */

pub mod types;

use miette::Diagnostic;
use tracing::error;

pub use miette;
pub use snafu;
pub use types::*;

pub type Result<T, E = RevisionError> = std::result::Result<T, E>;

impl RevisionError {
    /// The miette diagnostic code, e.g. `git::command_failed`.
    pub fn code_str(&self) -> Option<String> {
        Diagnostic::code(self).map(|c| c.to_string())
    }

    /// Whether this error came from running an external command.
    pub fn is_command_error(&self) -> bool {
        matches!(self, Self::Spawn { .. } | Self::CommandFailed { .. })
    }
}

pub trait ReportExt {
    /// Logs the error to the diagnostic channel without propagating it.
    fn report(&self, context: &str);
}

impl ReportExt for RevisionError {
    fn report(&self, context: &str) {
        let help = Diagnostic::help(self).map(|h| h.to_string());
        error!(
            code = self.code_str().as_deref(),
            help = help.as_deref(),
            error = %self,
            "{context}"
        );
    }
}
