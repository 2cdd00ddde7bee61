//! JSON export of the written batch.
//!
//! Produces a pretty-printed array of the same rows as the CSV file, for
//! consumers that prefer structured data.

use super::{ArticleRow, PersistError};
use crate::models::ArticleRecord;
use crate::utils::ensure_parent_dir;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Write already stamped records to `path` as a JSON array, replacing the file.
#[instrument(level = "info", skip_all, fields(path = %path.display(), count = records.len()))]
pub async fn write_articles(records: &[ArticleRecord], path: &Path) -> Result<(), PersistError> {
    let rows: Vec<ArticleRow<'_>> = records.iter().map(ArticleRow::from).collect();
    let json = serde_json::to_string_pretty(&rows)?;

    ensure_parent_dir(path).await?;
    fs::write(path, json).await?;
    info!("Wrote articles JSON");
    Ok(())
}
