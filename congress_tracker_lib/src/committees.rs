//! Committee assignments per legislator from `committee-membership-current.yaml`.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::Deserialize;

use crate::error::PipelineError;

/// One member entry under a committee id.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct CommitteeMember {
    pub bioguide: Option<String>,
    pub name: Option<String>,
    pub title: Option<String>,
}

/// Committee id -> members, as laid out in the membership file.
pub type CommitteeMembership = BTreeMap<String, Vec<CommitteeMember>>;

pub fn parse_membership(yaml_content: &str) -> Result<CommitteeMembership, PipelineError> {
    Ok(serde_yml::from_str(yaml_content)?)
}

/// Bioguide id -> committee ids, each list ordered by committee id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommitteeDirectory {
    by_member: HashMap<String, Vec<String>>,
}

impl CommitteeDirectory {
    /// Builds from a membership file. A missing or unparsable file gives an
    /// empty directory.
    pub fn build(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!("Committee membership file {} not found, skipping", path.display());
            return Self::default();
        }
        match Self::try_build(path) {
            Ok(directory) => {
                tracing::info!(
                    "Committee directory built for {} legislators",
                    directory.len()
                );
                directory
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to build committee directory from {}: {}; continuing with none",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    pub fn try_build(path: &Path) -> Result<Self, PipelineError> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_membership(parse_membership(&content)?))
    }

    pub fn from_membership(membership: CommitteeMembership) -> Self {
        let mut by_member: HashMap<String, Vec<String>> = HashMap::new();
        for (committee_id, members) in membership {
            for member in members {
                let Some(bioguide) = member.bioguide.filter(|b| !b.is_empty()) else {
                    continue;
                };
                let committees = by_member.entry(bioguide).or_default();
                if !committees.contains(&committee_id) {
                    committees.push(committee_id.clone());
                }
            }
        }
        Self { by_member }
    }

    /// Committees for a legislator; empty when unknown.
    pub fn committees_of(&self, bioguide: &str) -> &[String] {
        self.by_member
            .get(bioguide)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of legislators with at least one assignment.
    pub fn len(&self) -> usize {
        self.by_member.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_member.is_empty()
    }
}
