use crate::domain::ThemeColor;
use crate::error::{StoreError, StoreResult};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// App metadata stored in meta.json
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppMetadata {
    #[serde(default)]
    pub color: ThemeColor,
}

/// Load app metadata from meta.json file
pub fn load_metadata<P: AsRef<Path>>(path: P) -> StoreResult<AppMetadata> {
    let path = path.as_ref();

    let Some(content) = super::files::read_optional(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?
    else {
        return Ok(AppMetadata::default());
    };

    let metadata: AppMetadata = serde_json::from_str(&content)?;
    Ok(metadata)
}

/// Save app metadata to meta.json file
pub fn save_metadata<P: AsRef<Path>>(path: P, metadata: &AppMetadata) -> Result<()> {
    let json = serde_json::to_string_pretty(metadata)?;
    super::files::atomic_write(path, &json)?;
    Ok(())
}
