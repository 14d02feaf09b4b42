//! # Ledger Module
//!
//! At-most-once tracking of connection requests.
//!
//! The ledger is a grow-only set of [`TargetId`]s. Every store implements
//! [`LedgerStore`]; [`attempt_connect`] applies the gating order over any of
//! them:
//!
//! 1. eligibility (always re-checked, even for recorded targets)
//! 2. membership
//! 3. record

use crate::criteria::CriteriaEvaluator;
use crate::error::AlumnetError;
use crate::outcome::OutcomeKind;
use crate::{AchievementProfile, TargetId};
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard};

// =============================================================================
// LEDGERSTORE TRAIT
// =============================================================================

/// Storage contract for the set of requested targets.
///
/// Implementations must make `record_request` an atomic check-and-insert:
/// concurrent calls with the same id report `true` exactly once.
pub trait LedgerStore {
    /// Whether a request to `target` was recorded.
    fn has_requested(&self, target: &TargetId) -> Result<bool, AlumnetError>;

    /// Record a request. Returns `true` if the id was newly inserted,
    /// `false` if it was already present (the set is unchanged).
    fn record_request(&mut self, target: &TargetId) -> Result<bool, AlumnetError>;

    /// All recorded ids in sorted order.
    fn requested(&self) -> Result<Vec<TargetId>, AlumnetError>;

    /// Number of recorded ids.
    fn len(&self) -> Result<usize, AlumnetError> {
        Ok(self.requested()?.len())
    }

    /// Whether nothing was recorded yet.
    fn is_empty(&self) -> Result<bool, AlumnetError> {
        Ok(self.len()? == 0)
    }
}

/// Gate a connection attempt against any store.
///
/// Eligibility is checked before membership so that an actor who no longer
/// meets the thresholds is reported `Ineligible` even for a recorded target.
pub fn attempt_connect<S: LedgerStore + ?Sized>(
    store: &mut S,
    target: &TargetId,
    actual: &AchievementProfile,
    required: &AchievementProfile,
) -> Result<OutcomeKind, AlumnetError> {
    if !CriteriaEvaluator::is_eligible(actual, required) {
        return Ok(OutcomeKind::Ineligible);
    }

    if store.record_request(target)? {
        Ok(OutcomeKind::Requested)
    } else {
        Ok(OutcomeKind::AlreadyRequested)
    }
}

// =============================================================================
// IN-MEMORY LEDGER
// =============================================================================

/// Session-scoped ledger.
///
/// Uses `BTreeSet` so iteration order is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionLedger {
    requested: BTreeSet<TargetId>,
}

impl ConnectionLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a request to `target` was recorded.
    #[must_use]
    pub fn has_requested(&self, target: &TargetId) -> bool {
        self.requested.contains(target)
    }

    /// Record a request. Idempotent; returns `true` on first insert.
    pub fn record_request(&mut self, target: &TargetId) -> bool {
        if self.requested.contains(target) {
            return false;
        }
        self.requested.insert(target.clone())
    }

    /// Gate a connection attempt. See [`attempt_connect`].
    pub fn attempt_connect(
        &mut self,
        target: &TargetId,
        actual: &AchievementProfile,
        required: &AchievementProfile,
    ) -> OutcomeKind {
        if !CriteriaEvaluator::is_eligible(actual, required) {
            OutcomeKind::Ineligible
        } else if self.has_requested(target) {
            OutcomeKind::AlreadyRequested
        } else {
            self.record_request(target);
            OutcomeKind::Requested
        }
    }

    /// Recorded ids in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &TargetId> {
        self.requested.iter()
    }

    /// Number of recorded ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.requested.len()
    }

    /// Whether nothing was recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requested.is_empty()
    }
}

impl FromIterator<TargetId> for ConnectionLedger {
    fn from_iter<I: IntoIterator<Item = TargetId>>(iter: I) -> Self {
        Self {
            requested: iter.into_iter().collect(),
        }
    }
}

impl LedgerStore for ConnectionLedger {
    fn has_requested(&self, target: &TargetId) -> Result<bool, AlumnetError> {
        Ok(ConnectionLedger::has_requested(self, target))
    }

    fn record_request(&mut self, target: &TargetId) -> Result<bool, AlumnetError> {
        Ok(ConnectionLedger::record_request(self, target))
    }

    fn requested(&self) -> Result<Vec<TargetId>, AlumnetError> {
        Ok(self.requested.iter().cloned().collect())
    }

    fn len(&self) -> Result<usize, AlumnetError> {
        Ok(self.requested.len())
    }
}

// =============================================================================
// SHARED LEDGER
// =============================================================================

/// Thread-shared ledger for multi-actor hosts.
///
/// Cloning yields another handle to the same set. Check-and-insert happens
/// under a single lock acquisition.
#[derive(Debug, Clone, Default)]
pub struct SharedLedger {
    inner: Arc<Mutex<ConnectionLedger>>,
}

impl SharedLedger {
    /// Create an empty shared ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing ledger.
    #[must_use]
    pub fn from_ledger(ledger: ConnectionLedger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, ConnectionLedger>, AlumnetError> {
        self.inner.lock().map_err(|_| AlumnetError::LockPoisoned)
    }

    /// Gate a connection attempt through `&self`, for use from many threads.
    pub fn attempt_connect(
        &self,
        target: &TargetId,
        actual: &AchievementProfile,
        required: &AchievementProfile,
    ) -> Result<OutcomeKind, AlumnetError> {
        Ok(self.lock()?.attempt_connect(target, actual, required))
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> Result<ConnectionLedger, AlumnetError> {
        Ok(self.lock()?.clone())
    }
}

impl LedgerStore for SharedLedger {
    fn has_requested(&self, target: &TargetId) -> Result<bool, AlumnetError> {
        Ok(self.lock()?.has_requested(target))
    }

    fn record_request(&mut self, target: &TargetId) -> Result<bool, AlumnetError> {
        Ok(self.lock()?.record_request(target))
    }

    fn requested(&self) -> Result<Vec<TargetId>, AlumnetError> {
        Ok(self.lock()?.iter().cloned().collect())
    }

    fn len(&self) -> Result<usize, AlumnetError> {
        Ok(self.lock()?.len())
    }
}

// =============================================================================
// TESTS
// =============================================================================
