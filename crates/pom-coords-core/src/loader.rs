//! POM loading from the filesystem.

use crate::error::{CoordsError, Result};
use std::path::Path;

/// Maximum accepted POM size in bytes (50MB).
const MAX_FILE_SIZE: u64 = 50_000_000;

/// Size above which a warning is logged.
const LARGE_FILE_SIZE: u64 = 10_000_000;

/// Reads the POM at `path` as UTF-8.
///
/// # Errors
///
/// - `CoordsError::Io` - file missing, unreadable, or not valid UTF-8
/// - `CoordsError::TooLarge` - file exceeds 50MB
pub async fn load_pom(path: &Path) -> Result<String> {
    tracing::debug!("Loading POM from disk: {:?}", path);

    let metadata = tokio::fs::metadata(path).await.map_err(|e| {
        tracing::debug!("Failed to read metadata for {:?}: {}", path, e);
        CoordsError::io(path, e)
    })?;

    let size = metadata.len();
    if size > MAX_FILE_SIZE {
        tracing::error!(
            "POM exceeds maximum size: {} bytes (limit: {} bytes)",
            size,
            MAX_FILE_SIZE
        );
        return Err(CoordsError::TooLarge {
            size,
            max: MAX_FILE_SIZE,
        });
    }
    if size > LARGE_FILE_SIZE {
        tracing::warn!("POM is very large: {} bytes", size);
    }

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| CoordsError::io(path, e))?;

    tracing::trace!("Loaded {:?} ({} bytes)", path, content.len());
    Ok(content)
}
