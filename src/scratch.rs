//! Process-scoped scratch directory.
//!
//! Holds the intermediate PDF and page images of the current document. It is
//! created before the event loop starts and removed, recursively, when the
//! guard is dropped. The path is fixed, so two instances sharing a working
//! directory would trample each other.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Default scratch location, relative to the working directory.
pub const DEFAULT_SCRATCH_DIR: &str = ".mdtmp";

/// Owns the scratch directory and wipes it on drop.
#[derive(Debug)]
pub struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    /// Create `path` (and missing parents) if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn create(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        std::fs::create_dir_all(&path)?;
        debug!(path = %path.display(), "scratch directory ready");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        match std::fs::remove_dir_all(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "scratch directory removed"),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => warn!(path = %self.path.display(), %err, "failed to remove scratch directory"),
        }
    }
}
