//! Session slice.
//!
//! Holds the single signed-in user of the back office together with their flat
//! permission-tag list, and keeps it across restarts in a versioned blob.
//!
//! ```rust
//! use concil_session::{LoginResponse, SessionState, SessionStore};
//!
//! let store = SessionStore::in_memory();
//! assert!(store.is_pending());
//! assert_eq!(store.init(), SessionState::Anonymous);
//!
//! let response: LoginResponse = serde_json::from_str(
//!     r#"{"nome":"Ana","email":"ana@example.com","permissoes":[{"id":1,"operacao":"Clientes","tag":1016}],"isSuporte":false,"token":"t"}"#,
//! ).unwrap();
//! let user = store.sign_in(response);
//! assert!(user.holds(1016.into()));
//! ```

mod dto;
mod error;
mod persistence;
mod state;
mod store;

pub use crate::dto::{Credentials, LoginResponse, PermissionPayload};
pub use crate::error::{SessionError, SessionErrorExt};
pub use crate::persistence::{MemoryPersistence, SessionPersistence, StoragePersistence};
pub use crate::state::{SessionSnapshot, SessionState};
pub use crate::store::SessionStore;

use concil_kernel::domain::config::SessionConfig;
use concil_storage::Storage;

/// Builds a store persisted under `config.storage_dir`.
///
/// The store is returned un-hydrated; call [`SessionStore::init`] before use.
///
/// # Errors
/// Returns [`SessionError::Storage`] if the storage directory cannot be opened.
pub fn open(config: &SessionConfig) -> Result<SessionStore, SessionError> {
    let storage = Storage::builder().root(&config.storage_dir).create(true).open()?;
    tracing::debug!(dir = %config.storage_dir.display(), key = %config.storage_key, "Session storage ready");

    Ok(SessionStore::new(StoragePersistence::new(
        storage,
        config.storage_key.clone(),
        config.schema_version,
    )))
}
