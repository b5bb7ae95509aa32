//! Read-only access to the archive's files.db.
//!
//! The inventory is never written: the pool is opened read-only and the two
//! queries below are the only statements the tool runs. `_SignatureCount`
//! is the archive's aggregate view grouping files by (PUID, signature);
//! `Files` holds one row per archived file with its UUID and storage path.

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::path::Path;

use crate::models::{FileEntry, InventoryRow};

/// Open the inventory database read-only. A missing or unreadable file is a
/// fatal error reported with its cause.
pub async fn connect_readonly(path: &Path) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .read_only(true)
        .create_if_missing(false);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .with_context(|| format!("Error when connecting to database: {}", path.display()))?;

    Ok(pool)
}

/// Fetch the aggregate view, highest-volume formats first. The descending
/// order carries through classification into every report section.
pub async fn fetch_signature_counts(pool: &SqlitePool) -> Result<Vec<InventoryRow>> {
    let rows = sqlx::query("SELECT puid, signature, count FROM _SignatureCount ORDER BY count DESC")
        .fetch_all(pool)
        .await
        .context("Failed to query the _SignatureCount view")?;

    Ok(rows
        .iter()
        .map(|row| InventoryRow {
            puid: row.get("puid"),
            signature: row.get::<Option<String>, _>("signature").unwrap_or_default(),
            count: row.get("count"),
        })
        .collect())
}

/// Fetch up to `limit` files with the given PUID, chosen uniformly at
/// random without replacement by SQLite's RNG.
pub async fn fetch_examples(pool: &SqlitePool, puid: &str, limit: u32) -> Result<Vec<FileEntry>> {
    let rows = sqlx::query(
        "SELECT uuid, relative_path FROM Files WHERE puid = ? ORDER BY random() LIMIT ?",
    )
    .bind(puid)
    .bind(limit)
    .fetch_all(pool)
    .await
    .with_context(|| format!("Failed to query example files for {}", puid))?;

    Ok(rows
        .iter()
        .map(|row| FileEntry {
            uuid: row.get("uuid"),
            relative_path: row.get("relative_path"),
        })
        .collect())
}
