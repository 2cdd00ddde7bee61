//! File system helpers shared by the output writers.

use std::io;
use std::path::Path;
use tokio::fs;
use tracing::{debug, instrument};

/// Ensure the directory that will hold `path` exists.
///
/// Paths without a parent component (a bare file name) are written to the
/// working directory and need nothing.
///
/// # Errors
///
/// Returns an error if the directory cannot be created (permission denied,
/// read-only filesystem, a file in the way, etc.).
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub async fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).await?;
            debug!(parent = %parent.display(), "Output directory ready");
            Ok(())
        }
        _ => Ok(()),
    }
}
