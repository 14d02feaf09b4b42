//! # Primitives
//!
//! Fixed constants shared across the core.

/// Progress ratios are stored in hundredths of a percent.
/// `FULL_PROGRESS` is 100.00%.
pub const FULL_PROGRESS: u32 = 10_000;

/// Default number of college suggestions returned for one query.
pub const MAX_SUGGESTIONS: usize = 8;

/// Magic bytes at the start of a ledger snapshot.
pub const LEDGER_MAGIC: &[u8; 8] = b"ALUMLDGR";

/// Current ledger snapshot format version.
pub const LEDGER_FORMAT_VERSION: u8 = 1;

/// Column holding the college code in the raw catalog dump.
pub const CATALOG_CODE_COLUMN: &str = "ALL COLLEGE";

/// Column holding the college name; its header row carries the literal "Name".
pub const CATALOG_NAME_COLUMN: &str = "Column2";

/// Column holding the state.
pub const CATALOG_STATE_COLUMN: &str = "Column3";

/// Column holding the district.
pub const CATALOG_DISTRICT_COLUMN: &str = "Column4";
