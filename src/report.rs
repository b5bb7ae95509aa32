//! Textual report rendering.
//!
//! Turns a [`ClassificationResult`] into the human-readable summary printed
//! to stdout. Rendering is a pure function of the result and the ruleset
//! versions: identical inputs produce byte-identical text.

use std::fmt::Write;

use crate::models::{ClassificationResult, FormatEntry};

/// Render the full report: version header, the four itemized sections, and
/// the handled/ignored/unidentified totals.
pub fn render_report(
    versions: &[(&'static str, Option<String>)],
    result: &ClassificationResult,
) -> String {
    let mut out = String::new();

    let version_list = versions
        .iter()
        .map(|(name, version)| format!("{}={}", name, version.as_deref().unwrap_or("unknown")))
        .collect::<Vec<_>>()
        .join(", ");
    let _ = writeln!(
        out,
        "Running convert unmanaged with the following version of ref. files: {}",
        version_list
    );

    section(&mut out, &result.unhandled, "unhandled file-formats");
    section(
        &mut out,
        &result.manual,
        "file-formats marked for manual conversion",
    );
    section(
        &mut out,
        &result.extract,
        "file-formats marked for extraction",
    );
    section(
        &mut out,
        &result.symphovert,
        "file-formats marked for conversion with Symphony",
    );

    let _ = writeln!(
        out,
        "There {} {} handled files.",
        was_were(result.handled),
        result.handled
    );
    let _ = writeln!(
        out,
        "There {} {} ignored files.",
        was_were(result.ignored),
        result.ignored
    );
    let _ = writeln!(
        out,
        "There {} {} unidentified files.",
        was_were(result.unidentified),
        result.unidentified
    );

    out
}

/// One itemized section: a count line, then a PUID/Count/Type table when
/// the section is non-empty.
fn section(out: &mut String, entries: &[FormatEntry], label: &str) {
    let _ = writeln!(
        out,
        "There {} {} {}{}",
        was_were(entries.len() as i64),
        entries.len(),
        label,
        if entries.is_empty() { "." } else { ":" }
    );

    if entries.is_empty() {
        return;
    }

    let _ = writeln!(out, "{:<16} | {:<10} | Type", "PUID", "Count");
    for entry in entries {
        let _ = writeln!(
            out,
            "{:<16} | {:<10} | {}",
            entry.puid, entry.count, entry.signature
        );
    }
    let _ = writeln!(out);
}

fn was_were(n: i64) -> &'static str {
    if n == 1 {
        "was"
    } else {
        "were"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(puid: &str, count: i64, signature: &str) -> FormatEntry {
        FormatEntry {
            puid: puid.to_string(),
            count,
            signature: signature.to_string(),
        }
    }

    fn versions() -> Vec<(&'static str, Option<String>)> {
        vec![
            ("to_convert", Some("1a2b3c".to_string())),
            ("to_ignore", None),
        ]
    }

    #[test]
    fn test_header_lists_versions_in_order() {
        let report = render_report(&versions(), &ClassificationResult::default());
        let header = report.lines().next().unwrap();
        assert_eq!(
            header,
            "Running convert unmanaged with the following version of ref. files: \
             to_convert=1a2b3c, to_ignore=unknown"
        );
    }

    #[test]
    fn test_empty_result_uses_periods_and_no_tables() {
        let report = render_report(&versions(), &ClassificationResult::default());
        assert!(report.contains("There were 0 unhandled file-formats."));
        assert!(report.contains("There were 0 file-formats marked for manual conversion."));
        assert!(report.contains("There were 0 file-formats marked for extraction."));
        assert!(report.contains("There were 0 file-formats marked for conversion with Symphony."));
        assert!(report.contains("There were 0 handled files."));
        assert!(report.contains("There were 0 ignored files."));
        assert!(report.contains("There were 0 unidentified files."));
        assert!(!report.contains("PUID"));
    }

    #[test]
    fn test_singular_phrasing() {
        let result = ClassificationResult {
            unidentified: 1,
            handled: 1,
            ignored: 1,
            unhandled: vec![entry("fmt/9", 1, "Sig D")],
            ..Default::default()
        };
        let report = render_report(&versions(), &result);
        assert!(report.contains("There was 1 unhandled file-formats:"));
        assert!(report.contains("There was 1 handled files."));
        assert!(report.contains("There was 1 ignored files."));
        assert!(report.contains("There was 1 unidentified files."));
    }

    #[test]
    fn test_scenario_a_report() {
        let result = ClassificationResult {
            handled: 10,
            ignored: 5,
            unidentified: 2,
            unhandled: vec![entry("fmt/9", 1, "Sig D")],
            ..Default::default()
        };
        let report = render_report(&versions(), &result);

        assert!(report.contains("There was 1 unhandled file-formats:"));
        assert!(report.contains("PUID             | Count      | Type"));
        assert!(report.contains("fmt/9            | 1          | Sig D"));
        assert!(report.contains("There were 10 handled files."));
        assert!(report.contains("There were 5 ignored files."));
        assert!(report.contains("There were 2 unidentified files."));
    }

    #[test]
    fn test_table_preserves_entry_order() {
        let result = ClassificationResult {
            unhandled: vec![
                entry("fmt/100", 30, "big"),
                entry("fmt/200", 20, "mid"),
                entry("fmt/300", 10, "small"),
            ],
            ..Default::default()
        };
        let report = render_report(&versions(), &result);
        let big = report.find("fmt/100").unwrap();
        let mid = report.find("fmt/200").unwrap();
        let small = report.find("fmt/300").unwrap();
        assert!(big < mid && mid < small);
    }

    #[test]
    fn test_byte_identical_rendering() {
        let result = ClassificationResult {
            handled: 3,
            unhandled: vec![entry("fmt/9", 2, "Sig")],
            manual: vec![entry("fmt/40", 1, "Doc")],
            ..Default::default()
        };
        assert_eq!(
            render_report(&versions(), &result),
            render_report(&versions(), &result)
        );
    }
}
