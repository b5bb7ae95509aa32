//! Example extraction for unhandled formats.
//!
//! For every unhandled PUID the sampler pulls a bounded random selection of
//! files from the archive and stages copies under a per-PUID directory, so
//! a human can inspect what the format actually looks like. A copy that
//! fails (missing source, unwritable destination) is reported on the status
//! line and skipped; sampling never aborts the run.

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};

use crate::db;
use crate::models::{FileEntry, FormatEntry};

/// Copy tally for one PUID's staging pass.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SampleOutcome {
    pub copied: u32,
    pub failed: u32,
}

/// Destination path for one staged example:
/// `<examples_dir>/<puid with '/' replaced by '_'>/<uuid><original extension>`.
pub fn example_dest(examples_dir: &Path, puid: &str, entry: &FileEntry) -> PathBuf {
    let dir = examples_dir.join(puid.replace('/', "_"));
    let file_name = match Path::new(&entry.relative_path).extension() {
        Some(ext) => format!("{}.{}", entry.uuid, ext.to_string_lossy()),
        None => entry.uuid.clone(),
    };
    dir.join(file_name)
}

/// Stage the given entries for one PUID. Copy failures are tallied, not
/// raised: an uncreatable output directory fails the whole PUID's entries,
/// and sampling moves on to the next format.
pub fn stage_examples(
    source_root: &Path,
    examples_dir: &Path,
    puid: &str,
    entries: &[FileEntry],
) -> SampleOutcome {
    let output_dir = examples_dir.join(puid.replace('/', "_"));
    if let Err(err) = std::fs::create_dir_all(&output_dir) {
        eprintln!(
            "  warning: could not create {}: {}",
            output_dir.display(),
            err
        );
        return SampleOutcome {
            copied: 0,
            failed: entries.len() as u32,
        };
    }

    let mut outcome = SampleOutcome::default();
    for entry in entries {
        let source = source_root.join(&entry.relative_path);
        let dest = example_dest(examples_dir, puid, entry);
        match std::fs::copy(&source, &dest) {
            Ok(_) => outcome.copied += 1,
            Err(err) => {
                eprintln!("  warning: could not copy {}: {}", source.display(), err);
                outcome.failed += 1;
            }
        }
    }

    outcome
}

/// Sample and stage up to `limit` files for every unhandled format.
///
/// Original files live relative to the archive root, two levels above the
/// database file. Does nothing when `limit` is 0 or no formats are
/// unhandled.
pub async fn run_sampling(
    pool: &SqlitePool,
    db_path: &Path,
    examples_dir: &Path,
    unhandled: &[FormatEntry],
    limit: u32,
) -> Result<()> {
    if limit == 0 || unhandled.is_empty() {
        return Ok(());
    }

    let source_root = db_path
        .parent()
        .and_then(|p| p.parent())
        .with_context(|| format!("Cannot determine archive root from {}", db_path.display()))?;

    std::fs::create_dir_all(examples_dir).with_context(|| {
        format!("Failed to create examples directory: {}", examples_dir.display())
    })?;

    println!(
        "Extracting up to {} example(s) per unhandled format to {}",
        limit,
        examples_dir.display()
    );

    for format in unhandled {
        let entries = db::fetch_examples(pool, &format.puid, limit).await?;
        let outcome = stage_examples(source_root, examples_dir, &format.puid, &entries);
        println!(
            "  {}: copied {}, failed {}",
            format.puid, outcome.copied, outcome.failed
        );
    }
    println!();

    Ok(())
}
