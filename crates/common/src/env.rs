//! Environment/runtime helpers
//!
//! Sanity checks run before a store touches the filesystem.

use std::path::Path;
use tracing::debug;

/// Ensure the directory that will hold `file` exists.
///
/// A bare file name (no parent component) needs nothing.
pub async fn ensure_parent_dir(file: &Path) -> anyhow::Result<()> {
    let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };
    if tokio::fs::metadata(parent).await.is_err() {
        debug!(dir = %parent.display(), "creating data directory");
    }
    tokio::fs::create_dir_all(parent)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    Ok(())
}
