//! redb-backed ledger.
//!
//! One table maps target id to the logical sequence number of the request
//! (1 for the first request ever recorded, 2 for the next, ...). A metadata
//! table holds the sequence counter.

use crate::error::AlumnetError;
use crate::ledger::{ConnectionLedger, LedgerStore};
use crate::TargetId;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use std::path::Path;

const REQUESTED: TableDefinition<&str, u64> = TableDefinition::new("requested");
const METADATA: TableDefinition<&str, u64> = TableDefinition::new("metadata");
const NEXT_SEQUENCE_KEY: &str = "next_sequence";

/// Durable ledger stored in a redb database file.
pub struct RedbLedger {
    db: Database,
}

impl std::fmt::Debug for RedbLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbLedger").finish_non_exhaustive()
    }
}

impl RedbLedger {
    /// Open the database at `path`, creating it (and its tables) if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AlumnetError> {
        let db = Database::create(path.as_ref()).map_err(redb::Error::from)?;

        let txn = db.begin_write().map_err(redb::Error::from)?;
        {
            txn.open_table(REQUESTED).map_err(redb::Error::from)?;
            txn.open_table(METADATA).map_err(redb::Error::from)?;
        }
        txn.commit().map_err(redb::Error::from)?;

        Ok(Self { db })
    }

    /// Sequence number under which `target` was recorded, if any.
    pub fn sequence_of(&self, target: &TargetId) -> Result<Option<u64>, AlumnetError> {
        let txn = self.db.begin_read().map_err(redb::Error::from)?;
        let table = txn.open_table(REQUESTED).map_err(redb::Error::from)?;
        let seq = table
            .get(target.as_str())
            .map_err(redb::Error::from)?
            .map(|guard| guard.value());
        Ok(seq)
    }

    /// Load every entry into an in-memory ledger.
    pub fn to_ledger(&self) -> Result<ConnectionLedger, AlumnetError> {
        Ok(self.requested()?.into_iter().collect())
    }

    /// Record every entry of `ledger`. Returns how many were new.
    pub fn import(&mut self, ledger: &ConnectionLedger) -> Result<usize, AlumnetError> {
        let mut inserted = 0usize;
        for target in ledger.iter() {
            if self.record_request(target)? {
                inserted = inserted.saturating_add(1);
            }
        }
        Ok(inserted)
    }
}

impl LedgerStore for RedbLedger {
    fn has_requested(&self, target: &TargetId) -> Result<bool, AlumnetError> {
        Ok(self.sequence_of(target)?.is_some())
    }

    fn record_request(&mut self, target: &TargetId) -> Result<bool, AlumnetError> {
        // Writers are serialized by redb, so the lookup and the insert below
        // cannot interleave with another recorder.
        let txn = self.db.begin_write().map_err(redb::Error::from)?;
        let inserted = {
            let mut requested = txn.open_table(REQUESTED).map_err(redb::Error::from)?;
            let exists = requested
                .get(target.as_str())
                .map_err(redb::Error::from)?
                .is_some();

            if exists {
                false
            } else {
                let mut metadata = txn.open_table(METADATA).map_err(redb::Error::from)?;
                let next = metadata
                    .get(NEXT_SEQUENCE_KEY)
                    .map_err(redb::Error::from)?
                    .map(|guard| guard.value())
                    .unwrap_or(1);

                requested
                    .insert(target.as_str(), next)
                    .map_err(redb::Error::from)?;
                metadata
                    .insert(NEXT_SEQUENCE_KEY, next.saturating_add(1))
                    .map_err(redb::Error::from)?;
                true
            }
        };

        if inserted {
            txn.commit().map_err(redb::Error::from)?;
        } else {
            txn.abort().map_err(redb::Error::from)?;
        }

        Ok(inserted)
    }

    fn requested(&self) -> Result<Vec<TargetId>, AlumnetError> {
        let txn = self.db.begin_read().map_err(redb::Error::from)?;
        let table = txn.open_table(REQUESTED).map_err(redb::Error::from)?;

        let mut ids = Vec::new();
        for entry in table.iter().map_err(redb::Error::from)? {
            let (key, _seq) = entry.map_err(redb::Error::from)?;
            ids.push(TargetId::new(key.value()));
        }
        Ok(ids)
    }
}

// =============================================================================
// TESTS
// =============================================================================
