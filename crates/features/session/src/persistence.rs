//! Where the signed-in user survives restarts.

use crate::error::{SessionError, SessionErrorExt};
use concil_kernel::domain::User;
use concil_storage::Storage;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use tracing::debug;

/// Backing store for the session blob.
pub trait SessionPersistence: Debug + Send + Sync {
    /// Loads the persisted user, `Ok(None)` when nobody was signed in.
    ///
    /// # Errors
    /// Implementations fail when the blob is unreadable or incompatible.
    fn load(&self) -> Result<Option<User>, SessionError>;

    /// # Errors
    /// Implementations fail when the blob cannot be written.
    fn save(&self, user: &User) -> Result<(), SessionError>;

    /// Removes the persisted blob. Removing an absent blob is not an error.
    ///
    /// # Errors
    /// Implementations fail when the blob exists but cannot be removed.
    fn clear(&self) -> Result<(), SessionError>;
}

/// On-disk layout: `{ "state": { "usuario": User }, "version": N }`.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedSession {
    state: PersistedState,
    version: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedState {
    #[serde(default)]
    usuario: Option<User>,
}

/// Persists the session as one versioned JSON blob in a [`Storage`] root.
#[derive(Debug, Clone)]
pub struct StoragePersistence {
    storage: Storage,
    key: String,
    version: u32,
}

impl StoragePersistence {
    pub fn new(storage: Storage, key: impl Into<String>, version: u32) -> Self {
        Self { storage, key: key.into(), version }
    }
}

impl SessionPersistence for StoragePersistence {
    fn load(&self) -> Result<Option<User>, SessionError> {
        let Some(raw) = self
            .storage
            .read_optional(self.key.as_str())
            .context(format!("Reading session blob '{}'", self.key))?
        else {
            debug!(key = %self.key, "No persisted session");
            return Ok(None);
        };

        let blob: PersistedSession =
            serde_json::from_slice(&raw).context("Decoding session blob")?;

        if blob.version != self.version {
            return Err(SessionError::SchemaMismatch {
                message: format!("found version {}, expected {}", blob.version, self.version)
                    .into(),
                context: Some(self.key.clone().into()),
            });
        }

        Ok(blob.state.usuario)
    }

    fn save(&self, user: &User) -> Result<(), SessionError> {
        let blob = PersistedSession {
            state: PersistedState { usuario: Some(user.clone()) },
            version: self.version,
        };
        let raw = serde_json::to_vec(&blob).context("Encoding session blob")?;
        self.storage
            .write(self.key.as_str(), &raw)
            .context(format!("Writing session blob '{}'", self.key))
    }

    fn clear(&self) -> Result<(), SessionError> {
        match self.storage.delete(self.key.as_str()) {
            Ok(()) | Err(concil_storage::StorageError::FileNotFound { .. }) => Ok(()),
            Err(err) => Err::<(), _>(err).context(format!("Removing session blob '{}'", self.key)),
        }
    }
}

/// Keeps the session in process memory only. Useful for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    user: Mutex<Option<User>>,
}

impl MemoryPersistence {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `user` already persisted, as if a previous run had signed in.
    #[must_use]
    pub fn with_user(user: User) -> Self {
        Self { user: Mutex::new(Some(user)) }
    }

    #[must_use]
    pub fn stored(&self) -> Option<User> {
        self.user.lock().clone()
    }
}

impl SessionPersistence for MemoryPersistence {
    fn load(&self) -> Result<Option<User>, SessionError> {
        Ok(self.user.lock().clone())
    }

    fn save(&self, user: &User) -> Result<(), SessionError> {
        *self.user.lock() = Some(user.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        self.user.lock().take();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use concil_kernel::domain::Permission;
    use tempfile::TempDir;

    fn storage(dir: &TempDir) -> Storage {
        Storage::builder().root(dir.path()).open().unwrap()
    }

    fn user() -> User {
        User {
            name: "Ana".to_owned(),
            email: "ana@conciliador.com.br".to_owned(),
            permissions: vec![Permission::new(1, "Bancos", 1003)],
            token: "t".to_owned(),
            ..User::default()
        }
    }

    #[test]
    fn blob_layout_matches_persisted_shape() {
        let dir = TempDir::new().unwrap();
        let persistence = StoragePersistence::new(storage(&dir), "conciliador-session", 1);
        persistence.save(&user()).unwrap();

        let raw = std::fs::read(dir.path().join("conciliador-session")).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&raw).unwrap();
        assert_eq!(json["version"], 1);
        assert_eq!(json["state"]["usuario"]["nome"], "Ana");
        assert_eq!(json["state"]["usuario"]["permissoes"][0]["tag"], 1003);
    }

    #[test]
    fn version_mismatch_is_reported() {
        let dir = TempDir::new().unwrap();
        StoragePersistence::new(storage(&dir), "conciliador-session", 1).save(&user()).unwrap();

        let upgraded = StoragePersistence::new(storage(&dir), "conciliador-session", 2);
        assert!(matches!(upgraded.load(), Err(SessionError::SchemaMismatch { .. })));
    }

    #[test]
    fn garbage_blob_is_a_serialization_error() {
        let dir = TempDir::new().unwrap();
        let storage = storage(&dir);
        storage.write("conciliador-session", b"not json").unwrap();

        let persistence = StoragePersistence::new(storage, "conciliador-session", 1);
        assert!(matches!(persistence.load(), Err(SessionError::Serialization { .. })));
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let persistence = StoragePersistence::new(storage(&dir), "conciliador-session", 1);
        persistence.save(&user()).unwrap();

        persistence.clear().unwrap();
        persistence.clear().unwrap();
        assert_eq!(persistence.load().unwrap(), None);
    }

    #[test]
    fn invalid_key_surfaces_as_storage_error() {
        let dir = TempDir::new().unwrap();
        let persistence = StoragePersistence::new(storage(&dir), "../escape", 1);
        assert!(matches!(persistence.save(&user()), Err(SessionError::Storage { .. })));
    }
}
