//! Reads commit hash, version, branch and last-commit details from a git work
//! tree and publishes them to a build pipeline as global defines and as an
//! inline `<script>` for `index.html`.

pub mod feature;
pub mod options;
pub mod plugin;
pub mod publish;
pub mod resolver;
pub mod runner;

pub use feature::Feature;
pub use options::{PluginOptions, ResolvedOptions};
pub use plugin::{GitRevisionPlugin, run_git_define_command};
pub use resolver::{ExtractionResult, MetadataResolver};
pub use revision_errors::{Result, RevisionError};
pub use runner::{Executor, FALLBACK_OUTPUT, GitRunner, ShellExecutor};
