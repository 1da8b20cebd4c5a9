//! The [`Storage`] handle: key-addressed blobs under a single sandboxed root.

use crate::builder::StorageBuilder;
use crate::error::{StorageError, StorageErrorExt};
use crate::key::BlobKey;
use crate::maintenance;
use std::fs;
use std::io::{ErrorKind, Write};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

pub(crate) const TMP_MARKER: &str = ".conciltmp.";

#[derive(Debug)]
pub struct StorageInner {
    /// Canonicalized physical root.
    pub(crate) root: PathBuf,
    /// Counter for unique temporary file names.
    pub(crate) tmp_counter: AtomicU64,
}

/// A thread-safe handle to a directory of named blobs.
///
/// Every blob is addressed by a [`BlobKey`], which can never escape the root.
/// Writes use an atomic swap (unique temp file, `fsync`, rename), so a reader
/// observes either the previous or the new contents, never a torn write.
/// Cloning is cheap: the handle is reference-counted.
///
/// ```rust
/// use concil_storage::{Storage, StorageError};
///
/// # fn main() -> Result<(), StorageError> {
/// # let tmp = tempfile::tempdir().unwrap();
/// let storage = Storage::builder().root(tmp.path().join("state")).open()?;
///
/// storage.write("conciliador-session", br#"{"version":1}"#)?;
/// assert_eq!(storage.read("conciliador-session")?, br#"{"version":1}"#);
///
/// storage.delete("conciliador-session")?;
/// assert!(storage.read_optional("conciliador-session")?.is_none());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Storage {
    pub(crate) inner: Arc<StorageInner>,
}

impl Deref for Storage {
    type Target = StorageInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Storage {
    #[must_use = "The storage engine is not initialized until you call .open()"]
    pub fn builder() -> StorageBuilder {
        StorageBuilder::new()
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a key to its physical path inside the root.
    ///
    /// # Errors
    /// Returns [`StorageError::InvalidKey`] if the key is not a legal blob name.
    pub fn resolve<K>(&self, key: K) -> Result<PathBuf, StorageError>
    where
        K: TryInto<BlobKey, Error = StorageError>,
    {
        let key = key.try_into()?;
        Ok(self.root.join(key.as_str()))
    }

    /// Reads a blob.
    ///
    /// # Errors
    /// Returns [`StorageError::FileNotFound`] if the blob does not exist.
    pub fn read<K>(&self, key: K) -> Result<Vec<u8>, StorageError>
    where
        K: TryInto<BlobKey, Error = StorageError>,
    {
        let path = self.resolve(key)?;
        match fs::read(&path) {
            Ok(data) => Ok(data),
            Err(err) if err.kind() == ErrorKind::NotFound => Err(StorageError::FileNotFound {
                message: path.display().to_string().into(),
                context: None,
            }),
            Err(err) => Err(StorageError::Io {
                source: err,
                context: Some(format!("Read failed: {}", path.display()).into()),
            }),
        }
    }

    /// Reads a blob, mapping "not found" to `None`.
    ///
    /// # Errors
    /// Returns [`StorageError::InvalidKey`] or [`StorageError::Io`] for anything but absence.
    pub fn read_optional<K>(&self, key: K) -> Result<Option<Vec<u8>>, StorageError>
    where
        K: TryInto<BlobKey, Error = StorageError>,
    {
        match self.read(key) {
            Ok(data) => Ok(Some(data)),
            Err(StorageError::FileNotFound { .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Writes a blob atomically.
    ///
    /// 1. Data is written to a unique temporary sibling (`<key>.conciltmp.<n>`).
    /// 2. The file is synced to disk.
    /// 3. The temporary file is renamed over the target.
    ///
    /// Platforms that refuse to rename over an existing file fall back to
    /// remove-then-rename.
    ///
    /// # Errors
    /// Returns [`StorageError::InvalidKey`] for illegal keys and [`StorageError::Io`] when
    /// the disk refuses the write.
    pub fn write<K>(&self, key: K, data: &[u8]) -> Result<(), StorageError>
    where
        K: TryInto<BlobKey, Error = StorageError>,
    {
        let target = self.resolve(key)?;
        let temp = unique_tmp_path(&target, &self.tmp_counter);

        {
            let mut file = fs::OpenOptions::new()
                .create_new(true)
                .write(true)
                .open(&temp)
                .context(format!("Temp creation failed: {}", temp.display()))?;
            file.write_all(data).context("Write failed")?;
            file.sync_all().context("Hardware sync failed")?;
        }

        if let Err(err) = fs::rename(&temp, &target) {
            if err.kind() != ErrorKind::AlreadyExists {
                let _ = fs::remove_file(&temp);
                return Err(StorageError::Io {
                    source: err,
                    context: Some(
                        format!("Atomic swap failed: {} -> {}", temp.display(), target.display())
                            .into(),
                    ),
                });
            }
            fs::remove_file(&target)
                .context(format!("Failed to replace existing blob: {}", target.display()))?;
            fs::rename(&temp, &target).context(format!(
                "Atomic swap failed: {} -> {}",
                temp.display(),
                target.display()
            ))?;
        }

        self.sync_root();

        debug!(path = %target.display(), bytes = data.len(), "Blob saved atomically");
        Ok(())
    }

    /// Deletes a blob.
    ///
    /// # Errors
    /// Returns [`StorageError::FileNotFound`] if there is nothing to delete.
    pub fn delete<K>(&self, key: K) -> Result<(), StorageError>
    where
        K: TryInto<BlobKey, Error = StorageError>,
    {
        let path = self.resolve(key)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "Blob deleted");
                Ok(())
            },
            Err(err) if err.kind() == ErrorKind::NotFound => Err(StorageError::FileNotFound {
                message: path.display().to_string().into(),
                context: None,
            }),
            Err(err) => Err(StorageError::Io {
                source: err,
                context: Some(format!("Failed to delete: {}", path.display()).into()),
            }),
        }
    }

    /// # Errors
    /// Returns [`StorageError::InvalidKey`] for illegal keys.
    pub fn exists<K>(&self, key: K) -> Result<bool, StorageError>
    where
        K: TryInto<BlobKey, Error = StorageError>,
    {
        Ok(self.resolve(key)?.is_file())
    }

    /// Removes temporary files older than the staleness threshold.
    pub fn purge_tmp(&self) {
        maintenance::purge_tmp(&self.root);
    }

    fn sync_root(&self) {
        match fs::File::open(&self.root) {
            Ok(dir) => {
                if let Err(err) = dir.sync_all() {
                    warn!(path = %self.root.display(), error = %err, "Directory sync failed");
                }
            },
            Err(err) => {
                warn!(path = %self.root.display(), error = %err, "Directory open failed");
            },
        }
    }
}

fn unique_tmp_path(target: &Path, counter: &AtomicU64) -> PathBuf {
    let n = counter.fetch_add(1, Ordering::Relaxed);
    let file_name = target.file_name().and_then(|s| s.to_str()).unwrap_or("blob");
    target.with_file_name(format!("{file_name}{TMP_MARKER}{}.{n}", std::process::id()))
}
