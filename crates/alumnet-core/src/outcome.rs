//! # Outcome Module
//!
//! Classification of connection attempts and the notices shown for them.
//!
//! Only the three-way classification is load-bearing; message wording is a
//! presentation detail.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of a connection attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    /// The actor does not meet the target's thresholds.
    Ineligible,
    /// A request to this target was already recorded. Not an error.
    AlreadyRequested,
    /// A new request was recorded.
    Requested,
}

impl OutcomeKind {
    /// Notification category for this outcome.
    #[must_use]
    pub fn level(self) -> NoticeLevel {
        match self {
            OutcomeKind::Ineligible => NoticeLevel::Error,
            OutcomeKind::AlreadyRequested => NoticeLevel::Info,
            OutcomeKind::Requested => NoticeLevel::Success,
        }
    }
}

/// Notification category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Error,
    Info,
    Success,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NoticeLevel::Error => "error",
            NoticeLevel::Info => "info",
            NoticeLevel::Success => "success",
        };
        f.write_str(s)
    }
}

/// A user-facing notification for one connection attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub outcome: OutcomeKind,
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    /// Build the notice for `outcome` against the target named `display_name`.
    #[must_use]
    pub fn for_outcome(outcome: OutcomeKind, display_name: &str) -> Self {
        let message = match outcome {
            OutcomeKind::Ineligible => {
                format!("You haven't met the criteria to connect with {display_name}")
            }
            OutcomeKind::AlreadyRequested => {
                format!("You're already connected with {display_name}")
            }
            OutcomeKind::Requested => format!("Connection request sent to {display_name}!"),
        };

        Self {
            outcome,
            level: outcome.level(),
            message,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcomes_map_to_three_levels() {
        assert_eq!(OutcomeKind::Ineligible.level(), NoticeLevel::Error);
        assert_eq!(OutcomeKind::AlreadyRequested.level(), NoticeLevel::Info);
        assert_eq!(OutcomeKind::Requested.level(), NoticeLevel::Success);
    }

    #[test]
    fn notice_mentions_target_name() {
        for outcome in [
            OutcomeKind::Ineligible,
            OutcomeKind::AlreadyRequested,
            OutcomeKind::Requested,
        ] {
            let notice = Notice::for_outcome(outcome, "Priya Sharma");
            assert!(notice.message.contains("Priya Sharma"));
            assert_eq!(notice.level, outcome.level());
        }
    }

    #[test]
    fn notice_display_prefixes_level() {
        let notice = Notice::for_outcome(OutcomeKind::Requested, "Kavya Menon");
        assert_eq!(
            notice.to_string(),
            "[success] Connection request sent to Kavya Menon!"
        );
    }
}
