//! Advisory lock on a data directory.
//!
//! Every process that opens the same directory through [`Fleet::open`]
//! takes this lock before reading any store file, so admission always
//! sees the latest snapshot and no two writers interleave.
//!
//! [`Fleet::open`]: crate::Fleet::open

use std::{
    fs::{self, File, OpenOptions},
    path::{Path, PathBuf},
};

use fs4::fs_std::FileExt;
use tracing::{debug, instrument, trace};

use fleetbook_core::error::FleetResult;

use super::json::io_error;

/// Name of the lock file kept next to the store files.
pub const LOCK_FILE: &str = ".fleetbook.lock";

/// Exclusive hold on a data directory, released on drop.
#[derive(Debug)]
pub struct DirLock {
    file: File,
    path: PathBuf,
}

impl DirLock {
    /// Block until every other holder of `dir` has let go.
    ///
    /// Creates the directory and the lock file when missing. The lock file
    /// itself stays empty.
    #[instrument(skip_all, fields(dir = %dir.as_ref().display()))]
    pub fn acquire(dir: impl AsRef<Path>) -> FleetResult<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|e| io_error(dir, e))?;

        let path = dir.join(LOCK_FILE);
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|e| io_error(&path, e))?;

        debug!("Waiting for data directory lock");
        FileExt::lock_exclusive(&file).map_err(|e| io_error(&path, e))?;
        debug!("Data directory lock held");

        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for DirLock {
    fn drop(&mut self) {
        // Closing the file would release it as well.
        let _ = FileExt::unlock(&self.file);
        trace!(path = %self.path.display(), "Data directory lock released");
    }
}
