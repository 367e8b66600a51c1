//! Plugin options as supplied by the user, and their resolved form.
//!
//! User options mirror the original plugin's option names (`commitHashCommand`,
//! `gitWorkTree`, ...). Every field is optional and unknown fields are ignored.
//! Resolution fills every field from the defaults, so a [`ResolvedOptions`]
//! never has anything missing.
//!
//! The per-feature boolean flags (`commitHash`, `version`, ...) are accepted
//! for compatibility but never consulted: a feature is extracted exactly when
//! its command string is non-empty.

use std::{fs, path::Path};

use revision_errors::{
    ConflictingVersionOptionsSnafu, ParseConfigSnafu, ReadConfigSnafu, Result,
    miette::{NamedSource, SourceSpan},
    snafu::{ResultExt, ensure},
};
use serde::Deserialize;

use crate::feature::{Feature, LIGHTWEIGHT_TAGS_SUFFIX, VERSION_COMMAND};

/// Default name of the global assigned by the injected script.
pub const DEFAULT_CUSTOM_VAR: &str = "__GIT__INFO";

#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct PluginOptions {
    // Feature flags. Kept for compatibility, ignored at runtime.
    pub commit_hash: Option<bool>,
    pub version: Option<bool>,
    pub branch: Option<bool>,
    pub last_commit_time: Option<bool>,
    pub last_commit_msg: Option<bool>,

    /// Append `--tags` to the default version command.
    pub lightweight_tags: Option<bool>,

    pub commit_hash_command: Option<String>,
    pub version_command: Option<String>,
    pub branch_command: Option<String>,
    pub last_commit_time_command: Option<String>,
    pub last_commit_msg_command: Option<String>,

    pub commit_hash_var: Option<String>,
    pub version_var: Option<String>,
    pub branch_var: Option<String>,
    pub last_commit_time_var: Option<String>,
    pub last_commit_msg_var: Option<String>,

    /// Repository work tree. Empty means the ambient repository.
    pub git_work_tree: Option<String>,
    /// Name of the global assigned by the injected script.
    pub custom_var: Option<String>,
    /// Also print the data to the browser console.
    pub console_directly: Option<bool>,
}

impl PluginOptions {
    pub fn from_yaml_str(src: &str, path: &str) -> Result<Self> {
        serde_yml::from_str(src).map_err(|err| {
            let span = err
                .location()
                .map(|loc| SourceSpan::from((loc.index(), 1)));
            ParseConfigSnafu {
                path,
                message: err.to_string(),
                src: NamedSource::new(path, src.to_string()),
                span,
            }
            .build()
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().display().to_string();
        let src = fs::read_to_string(&path).context(ReadConfigSnafu { path: &path })?;
        Self::from_yaml_str(&src, &path)
    }

    fn command_override(&self, feature: Feature) -> Option<&String> {
        match feature {
            Feature::CommitHash => self.commit_hash_command.as_ref(),
            Feature::Version => self.version_command.as_ref(),
            Feature::Branch => self.branch_command.as_ref(),
            Feature::LastCommitTime => self.last_commit_time_command.as_ref(),
            Feature::LastCommitMsg => self.last_commit_msg_command.as_ref(),
        }
    }

    fn var_override(&self, feature: Feature) -> Option<&String> {
        match feature {
            Feature::CommitHash => self.commit_hash_var.as_ref(),
            Feature::Version => self.version_var.as_ref(),
            Feature::Branch => self.branch_var.as_ref(),
            Feature::LastCommitTime => self.last_commit_time_var.as_ref(),
            Feature::LastCommitMsg => self.last_commit_msg_var.as_ref(),
        }
    }

    fn flag_override(&self, feature: Feature) -> Option<bool> {
        match feature {
            Feature::CommitHash => self.commit_hash,
            Feature::Version => self.version,
            Feature::Branch => self.branch,
            Feature::LastCommitTime => self.last_commit_time,
            Feature::LastCommitMsg => self.last_commit_msg,
        }
    }
}

/// Settings for one feature after defaults were applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSettings {
    pub feature: Feature,
    /// Retained for compatibility; extraction does not read it.
    pub enabled: bool,
    /// Empty disables the feature.
    pub command: String,
    pub var: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    features: [FeatureSettings; 5],
    pub lightweight_tags: bool,
    pub git_work_tree: String,
    pub custom_var: String,
    pub console_directly: bool,
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        Self {
            features: Feature::ALL.map(|feature| FeatureSettings {
                feature,
                enabled: true,
                command: feature.default_command().to_string(),
                var: feature.default_var().to_string(),
            }),
            lightweight_tags: false,
            git_work_tree: String::new(),
            custom_var: DEFAULT_CUSTOM_VAR.to_string(),
            console_directly: false,
        }
    }
}

impl ResolvedOptions {
    /// Merges `options` over the defaults.
    ///
    /// Fails before anything else happens when a non-empty `versionCommand`
    /// is combined with `lightweightTags: true`.
    pub fn resolve(options: &PluginOptions) -> Result<Self> {
        let explicit_version = options
            .version_command
            .as_deref()
            .filter(|cmd| !cmd.is_empty());
        let lightweight_tags = options.lightweight_tags.unwrap_or(false);

        ensure!(
            !(explicit_version.is_some() && lightweight_tags),
            ConflictingVersionOptionsSnafu
        );

        let defaults = Self::default();
        let features = defaults.features.map(|base| {
            let feature = base.feature;
            let command = if feature == Feature::Version {
                match explicit_version {
                    Some(cmd) => cmd.to_string(),
                    None if lightweight_tags => {
                        format!("{VERSION_COMMAND}{LIGHTWEIGHT_TAGS_SUFFIX}")
                    }
                    None => base.command,
                }
            } else {
                options.command_override(feature).cloned().unwrap_or(base.command)
            };

            FeatureSettings {
                feature,
                enabled: options.flag_override(feature).unwrap_or(base.enabled),
                command,
                var: options.var_override(feature).cloned().unwrap_or(base.var),
            }
        });

        Ok(Self {
            features,
            lightweight_tags,
            git_work_tree: options.git_work_tree.clone().unwrap_or(defaults.git_work_tree),
            custom_var: options.custom_var.clone().unwrap_or(defaults.custom_var),
            console_directly: options.console_directly.unwrap_or(defaults.console_directly),
        })
    }

    /// Per-feature settings in extraction order.
    pub fn features(&self) -> &[FeatureSettings] {
        &self.features
    }

    pub fn feature(&self, feature: Feature) -> &FeatureSettings {
        // `features` follows `Feature::ALL`, which follows declaration order.
        &self.features[feature as usize]
    }

    /// Replaces one feature's command; an empty string disables it.
    pub fn with_command(mut self, feature: Feature, command: impl Into<String>) -> Self {
        self.features[feature as usize].command = command.into();
        self
    }

    pub fn command(&self, feature: Feature) -> &str {
        &self.feature(feature).command
    }

    pub fn var(&self, feature: Feature) -> &str {
        &self.feature(feature).var
    }

    /// The work tree to target, or `None` for the ambient repository.
    pub fn work_tree(&self) -> Option<&Path> {
        (!self.git_work_tree.is_empty()).then(|| Path::new(&self.git_work_tree))
    }
}
