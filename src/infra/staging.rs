// ============================================================
// Layer 5 — Channel Staging
// ============================================================
// Gets an encoded batch from memory to where the training
// platform can read it, in two steps:
//
//   1. Write the text to a local file under the run's output
//      directory. The local copy is byte-identical to what gets
//      uploaded, and it is not cleaned up afterwards, so a
//      failed or suspicious run can be inspected offline.
//
//   2. Upload those bytes through the ObjectStore trait and
//      return the remote URI for the job's channel config.
//
// Reference: Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use std::{fs, path::{Path, PathBuf}};

use crate::domain::traits::ObjectStore;

/// Stages encoded batches into one local directory and one
/// remote bucket/prefix.
pub struct ChannelStager<'a, S: ObjectStore> {
    store:      &'a S,
    local_dir:  PathBuf,
    bucket:     String,
    key_prefix: String,
}

impl<'a, S: ObjectStore> ChannelStager<'a, S> {
    /// Create a stager. The local directory is created up front,
    /// parents included, like `mkdir -p`.
    pub fn new(
        store: &'a S,
        local_dir: impl AsRef<Path>,
        bucket: impl Into<String>,
        key_prefix: impl Into<String>,
    ) -> Result<Self> {
        let local_dir = local_dir.as_ref().to_path_buf();
        fs::create_dir_all(&local_dir)
            .with_context(|| format!("Cannot create staging directory '{}'", local_dir.display()))?;

        Ok(Self {
            store,
            local_dir,
            bucket:     bucket.into(),
            key_prefix: key_prefix.into(),
        })
    }

    /// Export `batch` locally as `name`, upload it, and return
    /// the remote URI.
    pub fn stage(&self, name: &str, batch: &str) -> Result<String> {
        let local_path = self.local_dir.join(name);
        fs::write(&local_path, batch)
            .with_context(|| format!("Cannot write '{}'", local_path.display()))?;
        tracing::debug!("Exported {} ({} bytes)", local_path.display(), batch.len());

        let key = format!("{}/{}", self.key_prefix, name);
        let uri = self
            .store
            .put(batch.as_bytes(), &self.bucket, &key)
            .with_context(|| format!("Cannot upload '{key}' to bucket '{}'", self.bucket))?;

        tracing::info!("Staged {name} -> {uri}");
        Ok(uri)
    }
}
