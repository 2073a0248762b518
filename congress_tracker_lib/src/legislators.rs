//! Legislator -> state lookup built from the congress-legislators dataset.
//!
//! Reads `legislators-*.yaml` files from the unitedstates/congress-legislators
//! project and maps each bioguide id to the state of the record's **last**
//! term in document order (not the latest by date).

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::PipelineError;

/// A legislator from the congress-legislators dataset.
///
/// Every field is optional so a record with a missing block parses and is
/// skipped instead of failing the file.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct LegislatorRecord {
    pub id: Option<LegislatorId>,
    pub terms: Option<Vec<Term>>,
}

/// Identifier fields for a legislator
#[derive(Deserialize, Debug, Clone, Default)]
pub struct LegislatorId {
    pub bioguide: Option<String>,
}

/// Congressional term information
#[derive(Deserialize, Debug, Clone, Default)]
pub struct Term {
    pub state: Option<String>,
}

impl LegislatorRecord {
    /// `(bioguide, state)` from the last listed term, when both are present and non-empty.
    pub fn state_entry(&self) -> Option<(&str, &str)> {
        let bioguide = self
            .id
            .as_ref()?
            .bioguide
            .as_deref()
            .filter(|s| !s.is_empty())?;
        let state = self
            .terms
            .as_ref()?
            .last()?
            .state
            .as_deref()
            .filter(|s| !s.is_empty())?;
        Some((bioguide, state))
    }
}

/// Parse legislator records from YAML content.
pub fn parse_legislators(yaml_content: &str) -> Result<Vec<LegislatorRecord>, PipelineError> {
    Ok(serde_yml::from_str(yaml_content)?)
}

/// Bioguide id -> two-letter state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegislatorDirectory {
    states: HashMap<String, String>,
}

impl LegislatorDirectory {
    /// Builds from every path in order. Later files override earlier ones.
    ///
    /// Missing files are skipped. Any read or parse failure degrades the
    /// whole build to an empty directory.
    pub fn build<P: AsRef<Path>>(paths: &[P]) -> Self {
        Self::build_with_budget(paths, None)
    }

    /// Same as `build` over a single file, stopping once `max_entries`
    /// legislators have been collected.
    pub fn build_limited(path: impl AsRef<Path>, max_entries: usize) -> Self {
        Self::build_with_budget(&[path], Some(max_entries))
    }

    /// `build` with an optional cap on the number of collected entries.
    pub fn build_with_budget<P: AsRef<Path>>(paths: &[P], max_entries: Option<usize>) -> Self {
        match Self::try_build(paths, max_entries) {
            Ok(directory) => {
                tracing::info!("Legislator directory built with {} entries", directory.len());
                directory
            }
            Err(e) => {
                tracing::warn!("Failed to build legislator directory: {}; continuing with none", e);
                Self::default()
            }
        }
    }

    /// Fallible core of `build_with_budget`.
    pub fn try_build<P: AsRef<Path>>(
        paths: &[P],
        max_entries: Option<usize>,
    ) -> Result<Self, PipelineError> {
        let mut directory = Self::default();

        for path in paths {
            if directory.budget_reached(max_entries) {
                break;
            }
            let path = path.as_ref();
            if !path.exists() {
                tracing::info!("Legislator file {} not found, skipping", path.display());
                continue;
            }
            let content = std::fs::read_to_string(path)?;
            let records = parse_legislators(&content)?;
            let before = directory.len();
            directory.absorb(&records, max_entries);
            tracing::debug!(
                "Read {} legislator records from {} ({} new ids)",
                records.len(),
                path.display(),
                directory.len() - before
            );
        }

        Ok(directory)
    }

    /// Builds directly from parsed records.
    pub fn from_records(records: &[LegislatorRecord], max_entries: Option<usize>) -> Self {
        let mut directory = Self::default();
        directory.absorb(records, max_entries);
        directory
    }

    fn absorb(&mut self, records: &[LegislatorRecord], max_entries: Option<usize>) {
        for record in records {
            if self.budget_reached(max_entries) {
                break;
            }
            if let Some((bioguide, state)) = record.state_entry() {
                self.states.insert(bioguide.to_string(), state.to_string());
            }
        }
    }

    fn budget_reached(&self, max_entries: Option<usize>) -> bool {
        max_entries.is_some_and(|max| self.states.len() >= max)
    }

    pub fn state_of(&self, bioguide: &str) -> Option<&str> {
        self.states.get(bioguide).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn as_map(&self) -> &HashMap<String, String> {
        &self.states
    }

    pub fn into_map(self) -> HashMap<String, String> {
        self.states
    }

    /// Up to `n` entries ordered by bioguide id.
    pub fn sample(&self, n: usize) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .states
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        entries.sort_unstable();
        entries.truncate(n);
        entries
    }
}
