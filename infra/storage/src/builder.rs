use crate::engine::{Storage, StorageInner};
use crate::error::{StorageError, StorageErrorExt};
use crate::maintenance;
use private::Sealed;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use tracing::info;

#[derive(Debug, Default)]
pub struct NoRoot;
#[derive(Debug)]
pub struct WithRoot(PathBuf);

mod private {
    pub(super) trait Sealed {}
}
impl Sealed for NoRoot {}
impl Sealed for WithRoot {}

#[allow(private_bounds)]
#[derive(Debug)]
pub struct StorageBuilder<S: Sealed = NoRoot> {
    state: S,
    create: bool,
}

impl Default for StorageBuilder<NoRoot> {
    fn default() -> Self {
        Self { state: NoRoot, create: true }
    }
}

#[allow(private_bounds)]
impl<S: Sealed> StorageBuilder<S> {
    #[must_use = "Sets whether the storage root should be created if it does not exist"]
    pub const fn create(mut self, enable: bool) -> Self {
        self.create = enable;
        self
    }
}

impl StorageBuilder<NoRoot> {
    #[must_use = "Creates a new storage builder with default configuration"]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "Sets the root directory path for the storage engine"]
    pub fn root(self, path: impl Into<PathBuf>) -> StorageBuilder<WithRoot> {
        StorageBuilder { state: WithRoot(path.into()), create: self.create }
    }
}

impl StorageBuilder<WithRoot> {
    /// Opens the storage root.
    ///
    /// Boot sequence:
    /// 1. Creates the root directory when `create` is enabled.
    /// 2. Canonicalizes the root so every blob path is anchored to a physical location.
    /// 3. Removes stale temporary files left behind by interrupted writes.
    ///
    /// # Errors
    /// Returns [`StorageError::DirectoryNotFound`] if the root is missing and `create` is
    /// disabled, or [`StorageError::Io`] if it cannot be created or resolved.
    pub fn open(self) -> Result<Storage, StorageError> {
        let root = self.state.0;

        if self.create {
            fs::create_dir_all(&root)
                .context(format!("Failed to create storage root: {}", root.display()))?;
        } else if !root.is_dir() {
            return Err(StorageError::DirectoryNotFound {
                message: root.display().to_string().into(),
                context: Some("Storage root does not exist and creation is disabled".into()),
            });
        }

        let root = root
            .canonicalize()
            .context(format!("Failed to resolve storage root: {}", root.display()))?;

        maintenance::purge_tmp(&root);

        info!(root = %root.display(), "Storage opened");

        Ok(Storage { inner: Arc::new(StorageInner { root, tmp_counter: AtomicU64::new(0) }) })
    }
}
