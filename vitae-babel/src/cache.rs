//! Change detection between runs
//!
//! The cache directory keeps one `<key>.hashsum` file per generated artifact, holding the
//! hash of the document that produced it. When the document hash is unchanged and the
//! artifact still exists, regeneration can be skipped. The PDF format reuses the same
//! directory to keep the last compiled LaTeX source next to its PDF.

use crate::error::{Result, VitaeError};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Lowercase hex SHA-256 of `content`.
pub fn content_hash(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}

/// A cache directory, created on open.
#[derive(Debug, Clone)]
pub struct Cache {
    dir: PathBuf,
}

impl Cache {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| {
            VitaeError::Io(format!(
                "cannot create cache directory '{}': {e}",
                dir.display()
            ))
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn hashsum_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.hashsum"))
    }

    /// Whether the last recorded digest for `key` equals `digest`.
    pub fn is_fresh(&self, key: &str, digest: &str) -> bool {
        let fresh = fs::read_to_string(self.hashsum_path(key))
            .map(|stored| stored.trim() == digest)
            .unwrap_or(false);
        debug!(key, fresh, "checked cache entry");
        fresh
    }

    pub fn record(&self, key: &str, digest: &str) -> Result<()> {
        let path = self.hashsum_path(key);
        fs::write(&path, digest).map_err(|e| {
            VitaeError::Io(format!("cannot write cache entry '{}': {e}", path.display()))
        })
    }
}
