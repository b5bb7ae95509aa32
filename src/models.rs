//! Core data models used throughout arkaudit.
//!
//! These types represent the inventory rows, classification categories, and
//! accumulated results that flow from the archive database to the report.

/// One row of the archive's `_SignatureCount` aggregate view.
///
/// `puid` is `None` when the identification tooling could not identify the
/// format at all. `signature` is the human-readable description of the
/// detected type. Rows arrive pre-sorted by descending `count`.
#[derive(Debug, Clone)]
pub struct InventoryRow {
    pub puid: Option<String>,
    pub signature: String,
    pub count: i64,
}

/// One file from the archive's `Files` table, as returned by the sampling
/// query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub uuid: String,
    pub relative_path: String,
}

/// The classification a row lands in. Every inventory row maps to exactly
/// one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Unidentified,
    Handled,
    Ignored,
    ManualConversion,
    Extract,
    Symphovert,
    Unhandled,
}

/// One line of an itemized report section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatEntry {
    pub puid: String,
    pub count: i64,
    pub signature: String,
}

/// Accumulated result of classifying a full inventory.
///
/// The three totals count files; the four lists carry one entry per distinct
/// format, in the order the rows were classified (descending count when the
/// database supplies that order).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationResult {
    pub unidentified: i64,
    pub handled: i64,
    pub ignored: i64,
    pub unhandled: Vec<FormatEntry>,
    pub manual: Vec<FormatEntry>,
    pub extract: Vec<FormatEntry>,
    pub symphovert: Vec<FormatEntry>,
}

impl ClassificationResult {
    /// Sum of file counts across every bucket. Must equal the sum of `count`
    /// over all input rows; no row is dropped or double-counted.
    pub fn total_files(&self) -> i64 {
        let list_total = |entries: &[FormatEntry]| entries.iter().map(|e| e.count).sum::<i64>();

        self.unidentified
            + self.handled
            + self.ignored
            + list_total(&self.unhandled)
            + list_total(&self.manual)
            + list_total(&self.extract)
            + list_total(&self.symphovert)
    }
}
