use crate::dto::LoginResponse;
use crate::error::SessionError;
use crate::persistence::{MemoryPersistence, SessionPersistence};
use crate::state::{SessionSnapshot, SessionState};
use concil_kernel::domain::User;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

#[derive(Debug)]
struct StoreInner {
    persistence: Box<dyn SessionPersistence>,
    published: watch::Sender<SessionSnapshot>,
    /// Serializes writers so the persisted blob and the published state agree.
    write_lock: Mutex<()>,
    anonymous: Arc<User>,
}

/// Process-wide holder of the signed-in user.
///
/// The store is an explicitly injected handle (cheap to clone) rather than ambient
/// global state. It starts [`SessionState::Pending`]; [`SessionStore::init`] hydrates it
/// from persistence, the login flow calls [`SessionStore::set_user`] or
/// [`SessionStore::sign_in`], and logout calls [`SessionStore::clear`].
///
/// Readers either take a snapshot on demand or [`subscribe`](SessionStore::subscribe)
/// to be woken on every change.
///
/// Persistence failures never reach callers: hydration degrades to `Anonymous` and
/// writes are best-effort, both with a logged warning.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<StoreInner>,
}

impl SessionStore {
    pub fn new(persistence: impl SessionPersistence + 'static) -> Self {
        let (published, _) = watch::channel(SessionSnapshot::default());
        Self {
            inner: Arc::new(StoreInner {
                persistence: Box::new(persistence),
                published,
                write_lock: Mutex::new(()),
                anonymous: Arc::new(User::default()),
            }),
        }
    }

    /// A store that forgets everything when the process exits.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryPersistence::new())
    }

    /// Hydrates the store from persistence and returns the resolved state.
    ///
    /// Calling it again reloads from persistence. Any load failure yields `Anonymous`.
    /// A blob that does not decode or was written by another schema version is also
    /// deleted; a blob that merely could not be read is left in place for the next start.
    pub fn init(&self) -> SessionState {
        let _guard = self.inner.write_lock.lock();

        let state = match self.inner.persistence.load() {
            Ok(Some(user)) if user.is_anonymous() => {
                debug!("Persisted session holds the empty user");
                SessionState::Anonymous
            },
            Ok(Some(user)) => {
                debug!(email = %user.email, "Session restored");
                SessionState::Authenticated(Arc::new(user))
            },
            Ok(None) => SessionState::Anonymous,
            Err(
                err @ (SessionError::Serialization { .. } | SessionError::SchemaMismatch { .. }),
            ) => {
                warn!(error = %err, "Discarding incompatible persisted session");
                if let Err(err) = self.inner.persistence.clear() {
                    warn!(error = %err, "Failed to remove incompatible persisted session");
                }
                SessionState::Anonymous
            },
            Err(err) => {
                warn!(error = %err, "Persisted session unreadable, keeping it");
                SessionState::Anonymous
            },
        };

        self.publish(state.clone());
        state
    }

    /// Replaces the signed-in user, persists it, and notifies subscribers.
    ///
    /// No validation is performed; the login flow is trusted to hand over a
    /// well-formed user.
    pub fn set_user(&self, user: User) {
        self.store_user(Arc::new(user));
    }

    /// Stores the user described by a successful login response.
    ///
    /// Returns the user that was stored, even if another writer replaces it right after.
    pub fn sign_in(&self, response: LoginResponse) -> Arc<User> {
        let user = Arc::new(User::from(response));
        self.store_user(Arc::clone(&user));
        user
    }

    fn store_user(&self, user: Arc<User>) {
        let _guard = self.inner.write_lock.lock();

        if let Err(err) = self.inner.persistence.save(&user) {
            warn!(error = %err, "Session kept in memory only");
        }

        info!(email = %user.email, support = user.is_support, permissions = user.permissions.len(), "User signed in");
        self.publish(SessionState::Authenticated(user));
    }

    /// Signs out: forgets the user and removes the persisted blob.
    pub fn clear(&self) {
        let _guard = self.inner.write_lock.lock();

        if let Err(err) = self.inner.persistence.clear() {
            warn!(error = %err, "Failed to remove persisted session");
        }

        info!("User signed out");
        self.publish(SessionState::Anonymous);
    }

    /// The signed-in user, or the empty sentinel user when nobody is (yet) signed in.
    #[must_use]
    pub fn user(&self) -> Arc<User> {
        self.inner
            .published
            .borrow()
            .state
            .user()
            .map_or_else(|| Arc::clone(&self.inner.anonymous), Arc::clone)
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.inner.published.borrow().state.clone()
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.published.borrow().clone()
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.inner.published.borrow().generation
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.inner.published.borrow().state.is_pending()
    }

    /// A receiver woken on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.inner.published.subscribe()
    }

    fn publish(&self, state: SessionState) {
        self.inner.published.send_modify(|snapshot| {
            snapshot.generation = snapshot.generation.wrapping_add(1);
            debug!(state = state.label(), generation = snapshot.generation, "Session state changed");
            snapshot.state = state;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SessionErrorExt;
    use concil_kernel::domain::Permission;
    use concil_storage::StorageError;
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct BrokenPersistence;

    impl SessionPersistence for BrokenPersistence {
        fn load(&self) -> Result<Option<User>, SessionError> {
            Err("disk on fire".into())
        }

        fn save(&self, _user: &User) -> Result<(), SessionError> {
            Err("disk on fire".into())
        }

        fn clear(&self) -> Result<(), SessionError> {
            Err("disk on fire".into())
        }
    }

    /// Load fails below the blob format; counts removal attempts.
    #[derive(Debug, Default)]
    struct UnreachablePersistence {
        clears: Arc<AtomicUsize>,
    }

    impl SessionPersistence for UnreachablePersistence {
        fn load(&self) -> Result<Option<User>, SessionError> {
            let offline = io::Error::new(io::ErrorKind::PermissionDenied, "volume offline");
            Err::<Option<User>, _>(StorageError::Io { source: offline, context: None })
                .context("Reading session blob")
        }

        fn save(&self, _user: &User) -> Result<(), SessionError> {
            Ok(())
        }

        fn clear(&self) -> Result<(), SessionError> {
            self.clears.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn ana() -> User {
        User {
            name: "Ana".to_owned(),
            email: "ana@conciliador.com.br".to_owned(),
            permissions: vec![Permission::new(1, "Clientes", 1016)],
            token: "t".to_owned(),
            ..User::default()
        }
    }

    #[test]
    fn starts_pending_with_sentinel_user() {
        let store = SessionStore::in_memory();
        assert!(store.is_pending());
        assert_eq!(store.generation(), 0);

        let user = store.user();
        assert!(user.is_anonymous());
        assert!(!user.is_support);
        assert!(user.permissions.is_empty());
    }

    #[test]
    fn init_restores_persisted_user() {
        let store = SessionStore::new(MemoryPersistence::with_user(ana()));
        let state = store.init();

        assert_eq!(state.user().map(|u| u.email.as_str()), Some("ana@conciliador.com.br"));
        assert_eq!(store.user().name, "Ana");
        assert_eq!(store.generation(), 1);
    }

    #[test]
    fn init_without_blob_is_anonymous() {
        let store = SessionStore::in_memory();
        assert_eq!(store.init(), SessionState::Anonymous);
        assert!(!store.is_pending());
    }

    #[test]
    fn persisted_empty_user_hydrates_anonymous() {
        let store = SessionStore::new(MemoryPersistence::with_user(User::default()));
        assert_eq!(store.init(), SessionState::Anonymous);
        assert!(store.user().is_anonymous());
    }

    #[test]
    fn set_user_then_clear() {
        let store = SessionStore::in_memory();
        store.init();

        store.set_user(ana());
        assert_eq!(store.user().permissions.len(), 1);

        store.clear();
        assert_eq!(store.state(), SessionState::Anonymous);
        assert!(store.user().is_anonymous());
        assert_eq!(store.generation(), 3);
    }

    #[test]
    fn broken_persistence_degrades_gracefully() {
        let store = SessionStore::new(BrokenPersistence);
        assert_eq!(store.init(), SessionState::Anonymous);

        store.set_user(ana());
        assert_eq!(store.user().name, "Ana", "write failures keep the user in memory");

        store.clear();
        assert_eq!(store.state(), SessionState::Anonymous);
    }

    #[test]
    fn unreadable_blob_is_kept_for_next_start() {
        let clears = Arc::new(AtomicUsize::new(0));
        let store = SessionStore::new(UnreachablePersistence { clears: Arc::clone(&clears) });

        assert_eq!(store.init(), SessionState::Anonymous);
        assert_eq!(clears.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn sign_in_returns_the_stored_user() {
        let store = SessionStore::in_memory();
        store.init();

        let response: LoginResponse = serde_json::from_value(serde_json::json!({
            "nome": "Ana",
            "email": "ana@conciliador.com.br",
            "permissoes": [{ "id": 1, "operacao": "Clientes", "tag": 1016 }],
            "isSuporte": false,
            "token": "t"
        }))
        .unwrap();

        let user = store.sign_in(response);
        assert!(Arc::ptr_eq(&user, &store.user()));
        assert_eq!(user.email, "ana@conciliador.com.br");
    }

    #[test]
    fn clones_share_state() {
        let store = SessionStore::in_memory();
        let other = store.clone();
        store.set_user(ana());
        assert_eq!(other.user().name, "Ana");
    }
}
