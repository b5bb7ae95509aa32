//! Classification of inventory rows against the reference catalog.
//!
//! A pure reducer: [`classify`] maps one row to exactly one [`Category`]
//! through a fixed precedence chain, and [`tally`] folds a row sequence into
//! a [`ClassificationResult`]. No row is ever dropped or double-counted, so
//! the result's bucket totals always sum to the input's total file count.

use crate::catalog::ReferenceCatalog;
use crate::models::{Category, ClassificationResult, FormatEntry, InventoryRow};

/// Classify one row. Precedence is evaluated top to bottom, first match
/// wins:
///
/// 1. no PUID at all: `Unidentified`
/// 2. malformed row (empty PUID or negative count): `Unhandled`, preserved
///    as-is so the anomaly shows up in the report
/// 3. handled, ignored, manual, extract, symphovert, in that order
/// 4. anything left: `Unhandled`
pub fn classify(row: &InventoryRow, catalog: &ReferenceCatalog) -> Category {
    let puid = match row.puid.as_deref() {
        None => return Category::Unidentified,
        Some(puid) => puid,
    };

    if puid.is_empty() || row.count < 0 {
        return Category::Unhandled;
    }

    if catalog.is_handled(puid) {
        Category::Handled
    } else if catalog.is_ignored(puid) {
        Category::Ignored
    } else if catalog.is_manual(puid) {
        Category::ManualConversion
    } else if catalog.is_extract(puid) {
        Category::Extract
    } else if catalog.is_symphovert(puid) {
        Category::Symphovert
    } else {
        Category::Unhandled
    }
}

/// Fold rows into a [`ClassificationResult`], preserving input order in
/// every detail list. The database supplies rows sorted by descending
/// count, so the highest-volume formats lead each report section.
pub fn tally<I>(rows: I, catalog: &ReferenceCatalog) -> ClassificationResult
where
    I: IntoIterator<Item = InventoryRow>,
{
    let mut result = ClassificationResult::default();

    for row in rows {
        match classify(&row, catalog) {
            Category::Unidentified => result.unidentified += row.count,
            Category::Handled => result.handled += row.count,
            Category::Ignored => result.ignored += row.count,
            Category::ManualConversion => result.manual.push(entry(row)),
            Category::Extract => result.extract.push(entry(row)),
            Category::Symphovert => result.symphovert.push(entry(row)),
            Category::Unhandled => result.unhandled.push(entry(row)),
        }
    }

    result
}

fn entry(row: InventoryRow) -> FormatEntry {
    FormatEntry {
        // Unreachable for rows with no PUID; those land in the
        // unidentified total before any list is touched.
        puid: row.puid.unwrap_or_default(),
        count: row.count,
        signature: row.signature,
    }
}
