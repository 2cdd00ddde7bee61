//! CSV output for the collected batch.
//!
//! Each run replaces the file in full; nothing is appended or merged.

use super::{ArticleRow, PersistError, TIMESTAMP_FORMAT};
use crate::models::{ArticleRecord, stamp_batch};
use crate::utils::ensure_parent_dir;
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

/// What [`write_articles`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The batch was empty and no file was touched.
    Skipped,
    /// The file was replaced with the batch.
    Written {
        /// File that was written.
        path: PathBuf,
        /// Number of data rows (the header is not counted).
        count: usize,
        /// Timestamp stamped on every row, as written to the file.
        last_updated: String,
    },
}

/// Stamp the batch with `now` and write it to `path`.
///
/// An empty batch is not written at all, so a previous run's file is left in
/// place. A non-empty batch replaces the file in full, with a header row and
/// the columns `source,title,link,date,last_updated`.
///
/// # Arguments
///
/// * `records` - The aggregated batch; stamped in place when written
/// * `path` - Destination CSV file (its parent directory is created)
/// * `now` - Run timestamp shared by every row
///
/// # Returns
///
/// [`WriteOutcome::Skipped`] for an empty batch, otherwise
/// [`WriteOutcome::Written`] describing the file.
///
/// # Errors
///
/// Returns [`PersistError`] if serialization, directory creation or the
/// write itself fails.
#[instrument(level = "info", skip_all, fields(path = %path.display(), count = records.len()))]
pub async fn write_articles(
    records: &mut [ArticleRecord],
    path: &Path,
    now: NaiveDateTime,
) -> Result<WriteOutcome, PersistError> {
    if records.is_empty() {
        info!("No articles found for the specified date");
        return Ok(WriteOutcome::Skipped);
    }

    stamp_batch(records, now);
    let body = to_csv(records)?;

    ensure_parent_dir(path).await?;
    fs::write(path, body).await?;

    let last_updated = now.format(TIMESTAMP_FORMAT).to_string();
    info!(%last_updated, "Wrote articles CSV");
    Ok(WriteOutcome::Written {
        path: path.to_path_buf(),
        count: records.len(),
        last_updated,
    })
}

fn to_csv(records: &[ArticleRecord]) -> Result<Vec<u8>, PersistError> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(ArticleRow::from(record))?;
    }
    writer.into_inner().map_err(|e| PersistError::Io(e.into_error()))
}
