//! The host-facing plugin object.
//!
//! A host build tool constructs one [`GitRevisionPlugin`] per build session and
//! calls [`config`](GitRevisionPlugin::config) while resolving its
//! configuration and [`transform_index_html`](GitRevisionPlugin::transform_index_html)
//! while post-processing `index.html`. Each call runs a fresh extraction, so
//! the two snapshots can differ if the repository changes in between.

use std::{collections::BTreeMap, path::Path};

use revision_errors::Result;
use tracing::info;

use crate::{
    options::{PluginOptions, ResolvedOptions},
    publish::{self, HtmlTagDescriptor},
    resolver::{ExtractionResult, MetadataResolver},
    runner::{Executor, GitRunner, ShellExecutor},
};

pub const PLUGIN_NAME: &str = "vite-plugin-git-revision-info";

/// The build phase the plugin applies to.
pub const PLUGIN_APPLY: &str = "build";

/// Configuration patch returned from [`GitRevisionPlugin::config`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ConfigPatch {
    pub define: BTreeMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct GitRevisionPlugin<E = ShellExecutor> {
    resolver: MetadataResolver<E>,
}

impl GitRevisionPlugin {
    /// Resolves `options`; a conflicting version setup aborts construction.
    pub fn new(options: &PluginOptions) -> Result<Self> {
        Self::with_runner(options, GitRunner::new())
    }
}

impl<E: Executor> GitRevisionPlugin<E> {
    pub fn with_runner(options: &PluginOptions, runner: GitRunner<E>) -> Result<Self> {
        let resolved = ResolvedOptions::resolve(options)?;
        Ok(Self {
            resolver: MetadataResolver::with_runner(resolved, runner),
        })
    }

    pub fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    pub fn apply(&self) -> &'static str {
        PLUGIN_APPLY
    }

    pub fn options(&self) -> &ResolvedOptions {
        self.resolver.options()
    }

    pub fn resolver(&self) -> &MetadataResolver<E> {
        &self.resolver
    }

    pub async fn extract(&self) -> ExtractionResult {
        self.resolver.extract().await
    }

    /// Global defines for the bundle.
    pub async fn config(&self) -> Result<ConfigPatch> {
        let data = self.extract().await;
        Ok(ConfigPatch {
            define: publish::define_values(&data)?,
        })
    }

    /// The deferred script tag to inject into `<body>`.
    pub async fn transform_index_html(&self) -> Result<Vec<HtmlTagDescriptor>> {
        let options = self.resolver.options();
        let data = self.extract().await;
        let script = publish::inline_script(&options.custom_var, &data, options.console_directly)?;

        if options.console_directly {
            info!(data = %publish::serialize_result(&data)?, "git revision info");
        }
        Ok(vec![HtmlTagDescriptor::deferred_script(script)])
    }

    /// Runs an arbitrary git command against the configured work tree.
    pub async fn run_defined_command(&self, command: &str) -> Option<String> {
        self.resolver
            .runner()
            .run_defined_command(self.options().work_tree(), command)
            .await
    }
}

/// Stand-alone form of the defined-command helper.
pub async fn run_git_define_command(work_tree: Option<&Path>, command: &str) -> Option<String> {
    GitRunner::new().run_defined_command(work_tree, command).await
}
