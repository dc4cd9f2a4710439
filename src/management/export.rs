use std::path::Path;

use serde_json::Value;

use crate::error::Result;

pub const DEFAULT_EXPORT_FILE: &str = "top_tracks.json";

/// Writes a raw API response as pretty printed JSON, replacing the file.
///
/// Missing parent directories are created.
pub async fn save_json(path: &Path, value: &Value) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        async_fs::create_dir_all(parent).await?;
    }

    let json = serde_json::to_string_pretty(value)?;
    async_fs::write(path, json).await?;
    Ok(())
}
