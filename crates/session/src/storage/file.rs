//! File-backed storage backend.
//!
//! Each key is stored as its own file inside a directory, with `:` in the
//! key mapped to `.` in the file name (`auth:user` → `auth.user`). Writes go
//! to a temporary sibling first and are renamed into place, so a reader
//! never sees a half-written value.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::SessionStorage;
use crate::StorageError;

/// Durable storage rooted at a directory.
///
/// The directory is created on first write. On Unix, value files are
/// created with mode `0600` since they hold bearer credentials.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create a storage rooted at `dir`. Nothing is touched until first use.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory of this storage.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, ':' | '-' | '_'));
        if !valid {
            return Err(StorageError::InvalidKey(key.to_owned()));
        }

        Ok(self.dir.join(key.replace(':', ".")))
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        let tmp = tmp_path(&path);
        let written = write_private(&tmp, value).and_then(|()| fs::rename(&tmp, &path));

        if let Err(e) = written {
            // The temporary file may hold a credential.
            if let Err(cleanup) = remove_if_exists(&tmp) {
                tracing::warn!(key, error = %cleanup, "failed to remove temporary storage file");
            }
            return Err(e.into());
        }

        tracing::trace!(key, path = %path.display(), "wrote storage key");
        Ok(())
    }

    /// Removes the value and any temporary file left by an interrupted write.
    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let stale = remove_if_exists(&tmp_path(&path));
        remove_if_exists(&path)?;
        stale.map_err(Into::into)
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

fn remove_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

fn write_private(path: &Path, value: &str) -> io::Result<()> {
    let mut file = open_private(path)?;
    file.write_all(value.as_bytes())?;
    file.sync_all()
}

#[cfg(unix)]
fn open_private(path: &Path) -> io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;

    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> io::Result<fs::File> {
    fs::File::create(path)
}
