//! Binary ledger snapshots.
//!
//! Layout:
//!
//! ```text
//! ┌──────────────┬─────────┬──────────────────────────────┐
//! │ "ALUMLDGR"   │ version │ postcard(LedgerSnapshot)     │
//! │ 8 bytes      │ 1 byte  │ ids in sorted order          │
//! └──────────────┴─────────┴──────────────────────────────┘
//! ```
//!
//! Export is deterministic: equal ledgers give identical bytes.

use crate::error::AlumnetError;
use crate::ledger::ConnectionLedger;
use crate::primitives::{LEDGER_FORMAT_VERSION, LEDGER_MAGIC};
use crate::TargetId;
use serde::{Deserialize, Serialize};

/// Serializable form of a ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub requested: Vec<TargetId>,
}

impl From<&ConnectionLedger> for LedgerSnapshot {
    fn from(ledger: &ConnectionLedger) -> Self {
        Self {
            requested: ledger.iter().cloned().collect(),
        }
    }
}

impl From<LedgerSnapshot> for ConnectionLedger {
    fn from(snapshot: LedgerSnapshot) -> Self {
        snapshot.requested.into_iter().collect()
    }
}

const HEADER_LEN: usize = LEDGER_MAGIC.len() + 1;

/// Encode a ledger as a versioned binary snapshot.
pub fn export_ledger(ledger: &ConnectionLedger) -> Result<Vec<u8>, AlumnetError> {
    let payload = postcard::to_stdvec(&LedgerSnapshot::from(ledger))?;

    let mut out = Vec::with_capacity(HEADER_LEN + payload.len());
    out.extend_from_slice(LEDGER_MAGIC);
    out.push(LEDGER_FORMAT_VERSION);
    out.extend_from_slice(&payload);
    Ok(out)
}

/// Decode a snapshot produced by [`export_ledger`].
pub fn import_ledger(data: &[u8]) -> Result<ConnectionLedger, AlumnetError> {
    if data.len() < HEADER_LEN {
        return Err(AlumnetError::InvalidFormat(format!(
            "ledger snapshot too short: {} bytes",
            data.len()
        )));
    }

    let (magic, rest) = data.split_at(LEDGER_MAGIC.len());
    if magic != LEDGER_MAGIC {
        return Err(AlumnetError::InvalidFormat(
            "not a ledger snapshot (bad magic)".to_string(),
        ));
    }

    let version = rest[0];
    if version != LEDGER_FORMAT_VERSION {
        return Err(AlumnetError::InvalidFormat(format!(
            "unsupported ledger format version {version}"
        )));
    }

    let snapshot: LedgerSnapshot = postcard::from_bytes(&rest[1..])?;
    Ok(snapshot.into())
}

// =============================================================================
// TESTS
// =============================================================================
