//! File-based PlayerStore implementation.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use combat_core::{PlayerId, PlayerRecord};

use super::{PlayerStore, Result};

/// Stores each record as `{player_id}.json` in one directory.
///
/// Writes go to a temp file that is renamed over the target, so a crash
/// mid-commit leaves either the old or the new record on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    base_dir: PathBuf,
}

impl JsonFileStore {
    /// Create the store, creating `base_dir` if needed.
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).await?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path of a player's record. Bytes outside `[A-Za-z0-9_-]` are written
    /// as `%XX`, so an id can never escape the directory and distinct ids
    /// never share a file.
    fn record_path(&self, player: &PlayerId) -> PathBuf {
        let mut file_stem = String::with_capacity(player.as_str().len());
        for byte in player.as_str().bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
                file_stem.push(char::from(byte));
            } else {
                file_stem.push_str(&format!("%{:02X}", byte));
            }
        }
        self.base_dir.join(format!("{}.json", file_stem))
    }
}

#[async_trait]
impl PlayerStore for JsonFileStore {
    async fn load(&self, player: &PlayerId) -> Result<Option<PlayerRecord>> {
        let path = self.record_path(player);
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let record = serde_json::from_slice(&bytes)?;

        tracing::debug!("Loaded record for {} from {}", player, path.display());
        Ok(Some(record))
    }

    async fn commit(&self, player: &PlayerId, record: &PlayerRecord) -> Result<()> {
        let path = self.record_path(player);
        let temp_path = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(record)?;
        fs::write(&temp_path, bytes).await?;
        fs::rename(&temp_path, &path).await?;

        tracing::debug!("Committed record for {} to {}", player, path.display());
        Ok(())
    }
}
