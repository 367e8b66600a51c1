//! Runs the enabled features against a repository and collects their output.

use std::slice;

use futures::future::join_all;
use serde::{Serialize, Serializer, ser::SerializeMap};
use tracing::info;

use crate::{
    options::{FeatureSettings, ResolvedOptions},
    runner::{Executor, GitRunner, ShellExecutor},
};

/// Variable name to extracted value, in feature order.
///
/// Serializes as a flat JSON object. Inserting an existing key replaces the
/// value but keeps the original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionResult {
    entries: Vec<(String, String)>,
}

impl ExtractionResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> slice::Iter<'_, (String, String)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Serialize for ExtractionResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Owns the resolved options for one build session and re-extracts on every
/// call. Nothing is cached.
#[derive(Debug, Clone)]
pub struct MetadataResolver<E = ShellExecutor> {
    options: ResolvedOptions,
    runner: GitRunner<E>,
}

impl MetadataResolver {
    pub fn new(options: ResolvedOptions) -> Self {
        Self::with_runner(options, GitRunner::new())
    }
}

impl<E: Executor> MetadataResolver<E> {
    pub fn with_runner(options: ResolvedOptions, runner: GitRunner<E>) -> Self {
        Self { options, runner }
    }

    pub fn options(&self) -> &ResolvedOptions {
        &self.options
    }

    pub fn runner(&self) -> &GitRunner<E> {
        &self.runner
    }

    /// Features whose command is non-empty, in extraction order.
    pub fn enabled_features(&self) -> impl Iterator<Item = &FeatureSettings> {
        self.options
            .features()
            .iter()
            .filter(|settings| !settings.command.is_empty())
    }

    /// Runs every enabled feature's command concurrently and collects the
    /// outputs in feature order. Failed commands contribute
    /// [`FALLBACK_OUTPUT`](crate::runner::FALLBACK_OUTPUT).
    pub async fn extract(&self) -> ExtractionResult {
        let work_tree = self.options.work_tree();
        let enabled: Vec<_> = self.enabled_features().collect();

        let outputs = join_all(
            enabled
                .iter()
                .map(|settings| self.runner.run(work_tree, &settings.command)),
        )
        .await;

        let mut data = ExtractionResult::new();
        for (settings, output) in enabled.iter().zip(outputs) {
            data.insert(settings.var.as_str(), output);
        }

        info!(count = data.len(), "extracted git revision info");
        data
    }
}
