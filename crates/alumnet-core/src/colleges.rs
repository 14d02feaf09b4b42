//! # Colleges Module
//!
//! The college list behind the registration autocomplete.
//!
//! The raw list is a spreadsheet dump exported to JSON. Rows carry generic
//! column names (`Column2`, `Column3`, ...), the first data row repeats the
//! header, and some exports omit the surrounding array brackets. Parsing is
//! lenient about all of that.

use crate::error::AlumnetError;
use crate::primitives::{
    CATALOG_CODE_COLUMN, CATALOG_DISTRICT_COLUMN, CATALOG_NAME_COLUMN, CATALOG_STATE_COLUMN,
    MAX_SUGGESTIONS,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One college entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct College {
    pub code: String,
    pub name: String,
    pub state: String,
    pub district: String,
}

/// Parsed college list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollegeCatalog {
    colleges: Vec<College>,
}

impl CollegeCatalog {
    /// Create a catalog from already-parsed entries.
    #[must_use]
    pub fn new(colleges: Vec<College>) -> Self {
        Self { colleges }
    }

    /// Parse a raw catalog dump.
    ///
    /// Accepts a JSON array or a bare comma-separated run of objects (with an
    /// optional trailing comma), with or without a leading byte-order mark.
    /// Blank input gives an empty catalog.
    pub fn parse(raw: &str) -> Result<Self, AlumnetError> {
        let trimmed = raw.trim().trim_start_matches('\u{feff}').trim_start();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        let rows: Vec<Map<String, Value>> = if trimmed.starts_with('[') {
            serde_json::from_str(trimmed)?
        } else {
            let body = trimmed.trim_end().trim_end_matches(',');
            serde_json::from_str(&format!("[{body}]"))?
        };

        let colleges = rows.iter().filter_map(college_from_row).collect();
        Ok(Self { colleges })
    }

    /// All entries, in catalog order.
    #[must_use]
    pub fn colleges(&self) -> &[College] {
        &self.colleges
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colleges.len()
    }

    /// Whether the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colleges.is_empty()
    }

    /// Up to `limit` colleges whose name, state, or district contains `query`.
    ///
    /// Case-insensitive; a blank query suggests nothing.
    #[must_use]
    pub fn suggest(&self, query: &str, limit: usize) -> Vec<&College> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.colleges
            .iter()
            .filter(|c| {
                c.name.to_lowercase().contains(&needle)
                    || c.state.to_lowercase().contains(&needle)
                    || c.district.to_lowercase().contains(&needle)
            })
            .take(limit)
            .collect()
    }

    /// [`Self::suggest`] with the default limit.
    #[must_use]
    pub fn suggest_default(&self, query: &str) -> Vec<&College> {
        self.suggest(query, MAX_SUGGESTIONS)
    }
}

fn column<'a>(row: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    row.get(key).and_then(Value::as_str)
}

fn college_from_row(row: &Map<String, Value>) -> Option<College> {
    let raw_name = column(row, CATALOG_NAME_COLUMN)?;
    // The header row is exported as data.
    if raw_name.is_empty() || raw_name == "Name" {
        return None;
    }

    let name = raw_name.trim();
    if name.is_empty() {
        return None;
    }

    let field = |key: &str| column(row, key).map(str::trim).unwrap_or("").to_string();

    Some(College {
        code: field(CATALOG_CODE_COLUMN),
        name: name.to_string(),
        state: field(CATALOG_STATE_COLUMN),
        district: field(CATALOG_DISTRICT_COLUMN),
    })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const DUMP: &str = r#"[
        {"ALL COLLEGE": "Code", "Column2": "Name", "Column3": "State", "Column4": "District"},
        {"ALL COLLEGE": " C-001 ", "Column2": " Indian Institute of Technology Delhi ", "Column3": "Delhi", "Column4": "New Delhi"},
        {"ALL COLLEGE": "C-002", "Column2": "Birla Institute of Technology", "Column3": "Rajasthan", "Column4": "Jhunjhunu"},
        {"ALL COLLEGE": "C-003", "Column3": "Nowhere"},
        {"ALL COLLEGE": "C-004", "Column2": "   ", "Column3": "Blank"},
        {"ALL COLLEGE": "C-005", "Column2": "National Institute of Technology", "Column3": "Tamil Nadu", "Column4": "Tiruchirappalli"}
    ]"#;

    fn catalog() -> CollegeCatalog {
        CollegeCatalog::parse(DUMP).unwrap_or_default()
    }

    #[test]
    fn parse_drops_header_and_nameless_rows() {
        let catalog = catalog();
        let codes: Vec<_> = catalog.colleges().iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["C-001", "C-002", "C-005"]);
    }

    #[test]
    fn parse_trims_fields() {
        let catalog = catalog();
        let first = &catalog.colleges()[0];
        assert_eq!(first.name, "Indian Institute of Technology Delhi");
        assert_eq!(first.code, "C-001");
    }

    #[test]
    fn parse_bare_objects_with_bom_and_trailing_comma() {
        let raw = "\u{feff}{\"Column2\": \"College A\", \"Column3\": \"Kerala\"},\n{\"Column2\": \"College B\"},\n";
        let catalog = CollegeCatalog::parse(raw).unwrap_or_default();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.colleges()[1].state, "");
    }

    #[test]
    fn parse_blank_is_empty() {
        assert_eq!(CollegeCatalog::parse("  \n").ok(), Some(CollegeCatalog::default()));
    }

    #[test]
    fn parse_malformed_is_error() {
        assert!(CollegeCatalog::parse("[{\"Column2\": ").is_err());
    }

    #[test]
    fn suggest_matches_name_state_district() {
        let catalog = catalog();
        assert_eq!(catalog.suggest("delhi", 8).len(), 1);
        assert_eq!(catalog.suggest("RAJASTHAN", 8).len(), 1);
        assert_eq!(catalog.suggest("tiruchi", 8).len(), 1);
        assert_eq!(catalog.suggest("technology", 8).len(), 3);
    }

    #[test]
    fn suggest_respects_limit_and_order() {
        let catalog = catalog();
        let names: Vec<_> = catalog
            .suggest("institute", 2)
            .into_iter()
            .map(|c| c.code.as_str())
            .collect();
        assert_eq!(names, vec!["C-001", "C-002"]);
    }

    #[test]
    fn suggest_blank_query_is_empty() {
        assert!(catalog().suggest("   ", 8).is_empty());
    }

    #[test]
    fn suggest_default_caps_at_eight() {
        let colleges = (0..20)
            .map(|i| College {
                code: i.to_string(),
                name: format!("College {i}"),
                state: String::new(),
                district: String::new(),
            })
            .collect();
        let catalog = CollegeCatalog::new(colleges);
        assert_eq!(catalog.suggest_default("college").len(), MAX_SUGGESTIONS);
    }
}
