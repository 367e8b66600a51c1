/*
 * Structured Error Definitions.
 */

#![allow(unused_assignments)]

use miette::{Diagnostic, NamedSource, SourceSpan};
use snafu::prelude::*;

#[derive(Debug, Snafu, Diagnostic)]
#[snafu(visibility(pub))]
pub enum RevisionError {
    /// Both an explicit version command and lightweight tags were requested.
    #[snafu(display("lightweightTags can't be used together with versionCommand"))]
    #[diagnostic(
        code(options::conflicting_version),
        help("Drop `lightweightTags` and append ` --tags` to `versionCommand` yourself.")
    )]
    ConflictingVersionOptions,

    /// The shell could not be started at all.
    #[snafu(display("Failed to spawn `{command}`"))]
    #[diagnostic(code(git::spawn), help("Is a shell available on PATH?"))]
    Spawn {
        /// The full shell command line.
        command: String,
        source: std::io::Error,
    },

    /// The command ran but reported failure.
    #[snafu(display("`{command}` exited with {status}: {stderr}"))]
    #[diagnostic(
        code(git::command_failed),
        help("Check that git is installed and the work tree points at a repository.")
    )]
    CommandFailed {
        command: String,
        /// Exit status as reported by the OS.
        status: String,
        /// Captured standard error, trailing whitespace removed.
        stderr: String,
    },

    /// Error when reading a configuration file.
    #[snafu(display("Failed to read config at {path}"))]
    #[diagnostic(code(config::read))]
    ReadConfig {
        path: String,
        source: std::io::Error,
    },

    /// Error when parsing configuration files.
    #[snafu(display("Failed to parse config at {path}: {message}"))]
    #[diagnostic(
        code(config::invalid_format),
        help("Ensure the configuration file is valid YAML or JSON.")
    )]
    ParseConfig {
        /// The path to the file.
        path: String,
        message: String,
        /// The source code for snippet rendering.
        #[source_code]
        src: NamedSource<String>,
        /// The location of the error, when the parser reports one.
        #[label("syntax error here")]
        span: Option<SourceSpan>,
    },

    /// The inline script template failed to render.
    #[snafu(display("Failed to render inline script: {message}"))]
    #[diagnostic(code(publish::render))]
    Render { message: String },

    /// The extraction result could not be serialized.
    #[snafu(display("Failed to serialize revision data: {message}"))]
    #[diagnostic(code(publish::serialize))]
    Serialize { message: String },
}
