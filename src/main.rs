use std::path::PathBuf;

use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use git_revision_info::{GitRevisionPlugin, PluginOptions, RevisionError};
use revision_errors::miette;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

//
// ──────────────────────────────────────────────────────────────────────────────
//  CLI ARGUMENTS
// ──────────────────────────────────────────────────────────────────────────────
//
// Options come from an optional YAML/JSON file using the plugin's option names
// (commitHashCommand, gitWorkTree, customVar, ...). --work-tree overrides the
// file's gitWorkTree. Each subcommand prints one publication shape.
//

#[derive(Parser, Debug)]
#[command(name = "git-revision-info", version, about)]
pub struct Cli {
    /// Plugin options file (YAML or JSON).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Git work tree to read from instead of the current repository.
    #[arg(short, long)]
    work_tree: Option<String>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum CliCommand {
    /// Print the extracted revision data as JSON.
    Extract,
    /// Print the global define values as JSON.
    Define,
    /// Print the deferred <script> tag for index.html.
    Html,
    /// Run a git command, e.g. `run git log -1 --format=%H`.
    Run {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },
}

pub fn load_options(cli: &Cli) -> anyhow::Result<PluginOptions> {
    let mut options = match &cli.config {
        Some(path) => PluginOptions::from_file(path)?,
        None => PluginOptions::default(),
    };
    if let Some(tree) = &cli.work_tree {
        options.git_work_tree = Some(tree.clone());
    }
    Ok(options)
}

/// Runs the selected subcommand and returns what should be printed.
pub async fn execute(cli: &Cli) -> anyhow::Result<String> {
    let options = load_options(cli)?;
    let plugin = GitRevisionPlugin::new(&options)?;

    let output = match &cli.command {
        CliCommand::Extract => serde_json::to_string_pretty(&plugin.extract().await)?,
        CliCommand::Define => serde_json::to_string_pretty(&plugin.config().await?.define)?,
        CliCommand::Html => plugin
            .transform_index_html()
            .await?
            .iter()
            .map(|tag| tag.to_html())
            .collect::<Vec<_>>()
            .join("\n"),
        CliCommand::Run { command } => {
            let command = command.join(" ");
            plugin
                .run_defined_command(&command)
                .await
                .ok_or_else(|| anyhow!("`{command}` failed"))?
        }
    };
    Ok(output)
}

fn init_tracing() {
    // Respect RUST_LOG or default to 'warn'
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .compact()
                .with_filter(filter),
        )
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    color_eyre::install()
        .map_err(|err| anyhow!("{err}"))
        .context("installing color-eyre")?;
    init_tracing();

    let cli = Cli::parse();
    match execute(&cli).await {
        Ok(output) => {
            println!("{output}");
            Ok(())
        }
        // Library errors carry diagnostic codes and help; let miette render them.
        Err(err) => match err.downcast::<RevisionError>() {
            Ok(diagnostic) => {
                eprintln!("{:?}", miette::Report::new(diagnostic));
                std::process::exit(1);
            }
            Err(err) => Err(err),
        },
    }
}

#[cfg(test)]
mod common;
#[cfg(test)]
#[path = "tests.rs"]
mod tests;
