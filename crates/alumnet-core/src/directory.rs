//! # Directory Module
//!
//! Read-only provider of alumni listings and the search predicates over it.
//!
//! Listings are injected by the caller (a JSON file, a fixture, a service
//! adapter); the core never owns a global list.

use crate::error::AlumnetError;
use crate::{AchievementProfile, TargetId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// =============================================================================
// RECORDS
// =============================================================================

/// A candidate identity and the thresholds required to connect with them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionTarget {
    pub id: TargetId,
    pub name: String,
    pub connection_criteria: AchievementProfile,
}

/// A directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlumniRecord {
    #[serde(flatten)]
    pub target: ConnectionTarget,
    pub company: String,
    pub position: String,
    pub college: String,
    pub graduation_year: u16,
    #[serde(default)]
    pub expertise: Vec<String>,
    #[serde(default)]
    pub is_verified: bool,
    /// Percentage of requests answered (0-100).
    #[serde(default)]
    pub response_rate: u8,
    #[serde(default)]
    pub total_connections: u32,
}

impl AlumniRecord {
    /// Listing id.
    #[must_use]
    pub fn id(&self) -> &TargetId {
        &self.target.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.target.name
    }

    /// Thresholds required to connect.
    #[must_use]
    pub fn criteria(&self) -> &AchievementProfile {
        &self.target.connection_criteria
    }
}

// =============================================================================
// DIRECTORY TRAIT
// =============================================================================

/// Read-only source of listings.
pub trait Directory {
    /// All listings, in listing order.
    fn listings(&self) -> &[AlumniRecord];

    /// Find a listing by id.
    fn find(&self, id: &TargetId) -> Option<&AlumniRecord> {
        self.listings().iter().find(|r| r.id() == id)
    }
}

/// Directory backed by an owned vector.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    records: Vec<AlumniRecord>,
}

impl StaticDirectory {
    /// Build from records. Rejects duplicate ids.
    pub fn new(records: Vec<AlumniRecord>) -> Result<Self, AlumnetError> {
        let mut seen = BTreeSet::new();
        for record in &records {
            if !seen.insert(record.id()) {
                return Err(AlumnetError::DuplicateTarget(record.id().to_string()));
            }
        }
        Ok(Self { records })
    }

    /// Build from a JSON array of listings.
    pub fn from_json_str(json: &str) -> Result<Self, AlumnetError> {
        let records: Vec<AlumniRecord> = serde_json::from_str(json)?;
        Self::new(records)
    }

    /// Number of listings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the directory has no listings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Directory for StaticDirectory {
    fn listings(&self) -> &[AlumniRecord] {
        &self.records
    }
}

// =============================================================================
// SEARCH
// =============================================================================

/// Search parameters.
///
/// `text` is matched case-insensitively as a substring of the name, company,
/// college, or any expertise entry. An empty `text` matches every listing.
/// `company`, when set, must equal the listing's company exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryQuery {
    pub text: String,
    pub company: Option<String>,
}

impl DirectoryQuery {
    /// Query matching every listing.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Query on free text.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            company: None,
        }
    }

    /// Restrict to one company.
    #[must_use]
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    /// Whether `record` satisfies both the text and the company filter.
    #[must_use]
    pub fn matches(&self, record: &AlumniRecord) -> bool {
        let needle = self.text.to_lowercase();
        self.matches_text(&needle, record) && self.matches_company(record)
    }

    fn matches_text(&self, needle: &str, record: &AlumniRecord) -> bool {
        let contains = |haystack: &str| haystack.to_lowercase().contains(needle);

        contains(record.name())
            || contains(&record.company)
            || contains(&record.college)
            || record.expertise.iter().any(|e| contains(e))
    }

    fn matches_company(&self, record: &AlumniRecord) -> bool {
        self.company
            .as_deref()
            .is_none_or(|company| record.company == company)
    }
}

/// Listings matching `query`, in listing order.
pub fn search<'a, D: Directory + ?Sized>(
    directory: &'a D,
    query: &DirectoryQuery,
) -> Vec<&'a AlumniRecord> {
    let needle = query.text.to_lowercase();
    directory
        .listings()
        .iter()
        .filter(|r| query.matches_text(&needle, r) && query.matches_company(r))
        .collect()
}

/// Distinct companies in order of first appearance.
pub fn companies<D: Directory + ?Sized>(directory: &D) -> Vec<&str> {
    let mut seen = BTreeSet::new();
    directory
        .listings()
        .iter()
        .map(|r| r.company.as_str())
        .filter(|c| seen.insert(*c))
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
