//
// ──────────────────────────────────────────────────────────────────────────────
//  COMMAND EXECUTION
// ──────────────────────────────────────────────────────────────────────────────
//
// GitRunner turns a git subcommand ("rev-parse HEAD") into a full shell command
// line, optionally pinned to a specific work tree, and hands it to an Executor.
//
//   try_run              -> Result<String>, the raw outcome
//   run                  -> String, logs failures and substitutes FALLBACK_OUTPUT
//   run_defined_command  -> Option<String>, strips a leading "git", logs failures
//
// Output is stdout with trailing whitespace removed. Nothing else is touched.
//

use std::{future::Future, path::Path};

use revision_errors::{
    CommandFailedSnafu, ReportExt, Result, SpawnSnafu, snafu::ResultExt,
};
use tokio::process::Command;
use tracing::debug;

/// Value published in place of a failed command's output.
pub const FALLBACK_OUTPUT: &str = "Error executing git command";

/// Prefix stripped by [`GitRunner::run_defined_command`].
pub const GIT_PREFIX: &str = "git";

/// Runs one complete shell command line and returns its raw stdout.
pub trait Executor: Send + Sync {
    fn execute(&self, command_line: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Executes through the platform shell with the ambient environment and
/// working directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellExecutor;

impl Executor for ShellExecutor {
    async fn execute(&self, command_line: &str) -> Result<String> {
        let mut command = shell_command(command_line);
        command.kill_on_drop(true);

        let output = command
            .output()
            .await
            .context(SpawnSnafu { command: command_line })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return CommandFailedSnafu {
                command: command_line,
                status: output.status.to_string(),
                stderr: strip_trailing_whitespace(&stderr),
            }
            .fail();
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(not(windows))]
fn shell_command(command_line: &str) -> Command {
    let mut command = Command::new("sh");
    command.args(["-c", command_line]);
    command
}

#[cfg(windows)]
fn shell_command(command_line: &str) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", command_line]);
    command
}

/// Removes trailing spaces, tabs and line breaks. Idempotent.
pub fn strip_trailing_whitespace(output: &str) -> &str {
    output.trim_end()
}

/// `git`, or `git --git-dir=<tree>/.git --work-tree=<tree>` when a non-empty
/// work tree is given.
pub fn base_invocation(work_tree: Option<&Path>) -> String {
    match work_tree.filter(|tree| !tree.as_os_str().is_empty()) {
        Some(tree) => format!(
            "{GIT_PREFIX} --git-dir={} --work-tree={}",
            tree.join(".git").display(),
            tree.display()
        ),
        None => GIT_PREFIX.to_string(),
    }
}

/// The full command line; `suffix` is appended verbatim.
pub fn build_invocation(work_tree: Option<&Path>, suffix: &str) -> String {
    format!("{} {suffix}", base_invocation(work_tree))
}

#[derive(Debug, Clone, Default)]
pub struct GitRunner<E = ShellExecutor> {
    executor: E,
}

impl GitRunner {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: Executor> GitRunner<E> {
    pub fn with_executor(executor: E) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Runs `git <suffix>` once and reports failure to the caller.
    pub async fn try_run(&self, work_tree: Option<&Path>, suffix: &str) -> Result<String> {
        let command_line = build_invocation(work_tree, suffix);
        debug!(command = %command_line, "running git command");

        let stdout = self.executor.execute(&command_line).await?;
        Ok(strip_trailing_whitespace(&stdout).to_string())
    }

    /// Like [`try_run`](Self::try_run), but never fails: errors are logged
    /// and replaced by [`FALLBACK_OUTPUT`].
    pub async fn run(&self, work_tree: Option<&Path>, suffix: &str) -> String {
        match self.try_run(work_tree, suffix).await {
            Ok(output) => output,
            Err(err) => {
                err.report(FALLBACK_OUTPUT);
                FALLBACK_OUTPUT.to_string()
            }
        }
    }

    /// Runs a user-written command such as `"git status"`. A leading `git`
    /// is cut off by position before delegating. Failures are logged and
    /// yield `None`.
    pub async fn run_defined_command(
        &self,
        work_tree: Option<&Path>,
        command: &str,
    ) -> Option<String> {
        let suffix = command.strip_prefix(GIT_PREFIX).unwrap_or(command);

        match self.try_run(work_tree, suffix).await {
            Ok(output) => Some(output),
            Err(err) => {
                err.report("error running defined git command");
                None
            }
        }
    }
}
