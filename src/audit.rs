//! Audit orchestration.
//!
//! Runs the full pass over one archive: load the rulesets, build the merged
//! catalog, classify every aggregate row from the inventory, print the
//! report, and optionally stage example files for the unhandled formats.
//! Ruleset and database failures abort before any report text is printed;
//! sampling problems only affect the sampling status lines.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::catalog::ReferenceCatalog;
use crate::classify;
use crate::config::Config;
use crate::db;
use crate::report;
use crate::rulesets;
use crate::sample;

pub async fn run_report(
    config: &Config,
    file: &Path,
    examples: u32,
    examples_dir: Option<PathBuf>,
) -> Result<()> {
    // A complete catalog is required before touching the inventory:
    // classifying against a partial one would misreport formats as
    // unhandled.
    let bundle = rulesets::load_rulesets(config).await?;
    let catalog = ReferenceCatalog::from_bundle(&bundle);

    let pool = db::connect_readonly(file).await?;
    let rows = db::fetch_signature_counts(&pool).await?;
    let result = classify::tally(rows, &catalog);

    print!("{}", report::render_report(catalog.versions(), &result));

    let limit = examples.min(config.sampling.max_examples);
    if limit > 0 && !result.unhandled.is_empty() {
        let examples_dir = match examples_dir {
            Some(dir) => dir,
            None => file
                .parent()
                .with_context(|| format!("Cannot resolve a directory next to {}", file.display()))?
                .join("examples"),
        };
        sample::run_sampling(&pool, file, &examples_dir, &result.unhandled, limit).await?;
    }

    pool.close().await;
    Ok(())
}
