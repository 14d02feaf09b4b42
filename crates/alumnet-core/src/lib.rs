//! # Alumnet Core
//!
//! The deterministic connection-gating engine for Alumnet.
//!
//! A student carries an [`AchievementProfile`]; every alumni listing carries a
//! threshold profile. The core answers three questions:
//!
//! - Is the student eligible to connect? ([`CriteriaEvaluator::is_eligible`])
//! - How close are they on each dimension? ([`CriteriaEvaluator::report`])
//! - Was this request already sent? ([`ConnectionLedger`], [`LedgerStore`])
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐    listings    ┌───────────────────┐
//! │  Directory   │ ─────────────► │ CriteriaEvaluator │
//! │ (injected)   │                └─────────┬─────────┘
//! └──────────────┘                          │ eligible?
//!                                           ▼
//!                                 ┌───────────────────┐
//!                                 │   LedgerStore     │
//!                                 │ memory | shared | │
//!                                 │ redb              │
//!                                 └───────────────────┘
//! ```
//!
//! All collections are `BTreeMap`/`BTreeSet` and all arithmetic is integer,
//! so every operation is reproducible bit for bit.

pub mod colleges;
pub mod criteria;
pub mod directory;
pub mod error;
pub mod formats;
pub mod ledger;
pub mod outcome;
pub mod primitives;
pub mod storage;

pub use colleges::{College, CollegeCatalog};
pub use criteria::{CriteriaEvaluator, CriteriaReport, DimensionProgress, Percent};
pub use directory::{AlumniRecord, ConnectionTarget, Directory, DirectoryQuery, StaticDirectory};
pub use error::AlumnetError;
pub use ledger::{ConnectionLedger, LedgerStore, SharedLedger, attempt_connect};
pub use outcome::{Notice, NoticeLevel, OutcomeKind};
pub use storage::RedbLedger;

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Identifier of a connection target (an alumni listing).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetId(pub String);

impl TargetId {
    /// Create a new target id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TargetId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

// =============================================================================
// ACHIEVEMENTS
// =============================================================================

/// One measurable achievement dimension.
///
/// The declaration order is the canonical reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    GithubContributions,
    CodechefRating,
    Projects,
    LeetcodeSolved,
}

impl Dimension {
    /// All dimensions in canonical order.
    pub const ALL: [Dimension; 4] = [
        Dimension::GithubContributions,
        Dimension::CodechefRating,
        Dimension::Projects,
        Dimension::LeetcodeSolved,
    ];

    /// Short human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Dimension::GithubContributions => "GitHub",
            Dimension::CodechefRating => "CodeChef",
            Dimension::Projects => "Projects",
            Dimension::LeetcodeSolved => "LeetCode",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A measurable set of accomplishments.
///
/// Used both for an actor's own standing and, on a listing, as the minimum
/// thresholds required to connect. No relationship between fields is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementProfile {
    pub github_contributions: u32,
    pub codechef_rating: u32,
    pub projects: u32,
    pub leetcode_solved: u32,
}

impl AchievementProfile {
    /// Create a profile from the four dimension values, in canonical order.
    #[must_use]
    pub const fn new(
        github_contributions: u32,
        codechef_rating: u32,
        projects: u32,
        leetcode_solved: u32,
    ) -> Self {
        Self {
            github_contributions,
            codechef_rating,
            projects,
            leetcode_solved,
        }
    }

    /// Value of a single dimension.
    #[must_use]
    pub fn get(&self, dimension: Dimension) -> u32 {
        match dimension {
            Dimension::GithubContributions => self.github_contributions,
            Dimension::CodechefRating => self.codechef_rating,
            Dimension::Projects => self.projects,
            Dimension::LeetcodeSolved => self.leetcode_solved,
        }
    }

    /// Iterate `(dimension, value)` pairs in canonical order.
    pub fn dimensions(&self) -> impl Iterator<Item = (Dimension, u32)> + '_ {
        Dimension::ALL.into_iter().map(|d| (d, self.get(d)))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_get_matches_fields() {
        let profile = AchievementProfile::new(450, 1650, 6, 280);
        assert_eq!(profile.get(Dimension::GithubContributions), 450);
        assert_eq!(profile.get(Dimension::CodechefRating), 1650);
        assert_eq!(profile.get(Dimension::Projects), 6);
        assert_eq!(profile.get(Dimension::LeetcodeSolved), 280);
    }

    #[test]
    fn dimensions_iterate_in_canonical_order() {
        let profile = AchievementProfile::new(1, 2, 3, 4);
        let values: Vec<_> = profile.dimensions().map(|(_, v)| v).collect();
        assert_eq!(values, vec![1, 2, 3, 4]);
    }

    #[test]
    fn profile_json_uses_camel_case() {
        let json = r#"{"githubContributions":500,"codechefRating":1800,"projects":5,"leetcodeSolved":300}"#;
        let profile: Result<AchievementProfile, _> = serde_json::from_str(json);
        assert_eq!(
            profile.ok(),
            Some(AchievementProfile::new(500, 1800, 5, 300))
        );
    }

    #[test]
    fn target_id_displays_raw_string() {
        assert_eq!(TargetId::new("42").to_string(), "42");
    }
}
