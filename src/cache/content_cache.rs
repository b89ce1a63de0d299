use crate::error::Result;
use crate::identity::DocumentIdentity;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File-backed cache of the last fetched text of each document.
///
/// One flat file per identity under `dir`, named by
/// [`DocumentIdentity::cache_file_name`]. No locking and no format versioning:
/// concurrent writers for the same identity race and the last write wins.
#[derive(Debug, Clone)]
pub struct ContentCache {
    dir: PathBuf,
}

impl ContentCache {
    /// Create a cache rooted at `dir`. The directory is created lazily on first save.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Location of the cache file for `identity`
    pub fn path_for(&self, identity: &DocumentIdentity) -> PathBuf {
        self.dir.join(identity.cache_file_name())
    }

    /// Store `content` as the full cached value for `identity`, replacing any prior value.
    ///
    /// # Returns
    ///
    /// The path written
    pub fn save(&self, identity: &DocumentIdentity, content: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;

        let path = self.path_for(identity);
        std::fs::write(&path, content)?;

        log::info!("Cached content to {}", path.display());
        Ok(path)
    }

    /// Previously saved content for `identity`, or `None` if nothing was ever saved.
    pub fn load(&self, identity: &DocumentIdentity) -> Result<Option<String>> {
        let path = self.path_for(identity);

        match std::fs::read_to_string(&path) {
            Ok(content) => {
                log::info!("Retrieved cached content from {}", path.display());
                Ok(Some(content))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No cached content found for {}", identity);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}
