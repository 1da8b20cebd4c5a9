use concil_kernel::domain::config::SessionConfig;
use concil_kernel::domain::{Permission, User};
use concil_session::{LoginResponse, SessionState, SessionStore, StoragePersistence};
use concil_storage::Storage;
use std::time::Duration;
use tempfile::TempDir;

fn config(dir: &TempDir) -> SessionConfig {
    SessionConfig { storage_dir: dir.path().join("state"), ..SessionConfig::default() }
}

fn operator() -> User {
    User {
        name: "Beatriz".to_owned(),
        email: "beatriz@conciliador.com.br".to_owned(),
        permissions: vec![Permission::new(7, "Lotes", 1016), Permission::new(8, "Bancos", 1003)],
        token: "bearer".to_owned(),
        ..User::default()
    }
}

#[test]
fn session_survives_restart() {
    let dir = TempDir::new().unwrap();

    let first = concil_session::open(&config(&dir)).unwrap();
    first.init();
    first.set_user(operator());
    drop(first);

    let second = concil_session::open(&config(&dir)).unwrap();
    assert!(second.is_pending());
    let state = second.init();

    let user = state.user().expect("restored user");
    assert_eq!(user.email, "beatriz@conciliador.com.br");
    assert!(user.holds(1016.into()));
}

#[test]
fn logout_removes_blob() {
    let dir = TempDir::new().unwrap();
    let cfg = config(&dir);

    let store = concil_session::open(&cfg).unwrap();
    store.init();
    store.set_user(operator());
    assert!(cfg.storage_dir.join(&cfg.storage_key).exists());

    store.clear();
    assert!(!cfg.storage_dir.join(&cfg.storage_key).exists());

    let reopened = concil_session::open(&cfg).unwrap();
    assert_eq!(reopened.init(), SessionState::Anonymous);
}

#[test]
fn incompatible_blob_hydrates_anonymous_and_is_discarded() {
    let dir = TempDir::new().unwrap();
    let storage = Storage::builder().root(dir.path()).open().unwrap();

    let old = SessionStore::new(StoragePersistence::new(storage.clone(), "conciliador-session", 1));
    old.set_user(operator());

    let upgraded = SessionStore::new(StoragePersistence::new(storage.clone(), "conciliador-session", 2));
    assert_eq!(upgraded.init(), SessionState::Anonymous);
    assert!(!storage.exists("conciliador-session").unwrap());
}

#[test]
fn corrupt_blob_hydrates_anonymous() {
    let dir = TempDir::new().unwrap();
    let storage = Storage::builder().root(dir.path()).open().unwrap();
    storage.write("conciliador-session", b"{\"state\":").unwrap();

    let store = SessionStore::new(StoragePersistence::new(storage, "conciliador-session", 1));
    assert_eq!(store.init(), SessionState::Anonymous);
    assert!(store.user().is_anonymous());
}

#[test]
fn sign_in_maps_login_response() {
    let store = SessionStore::in_memory();
    store.init();

    let response: LoginResponse = serde_json::from_value(serde_json::json!({
        "nome": "Suporte",
        "email": "suporte@conciliador.com.br",
        "permissoes": [],
        "isSuporte": true,
        "token": "x"
    }))
    .unwrap();

    let user = store.sign_in(response);
    assert!(user.is_support);
    assert!(user.permissions.is_empty());
    assert_eq!(store.user(), user);
}

#[tokio::test]
async fn subscribers_observe_every_change() {
    let store = SessionStore::in_memory();
    let mut rx = store.subscribe();
    assert!(rx.borrow().state.is_pending());

    let writer = store.clone();
    let task = tokio::spawn(async move {
        writer.init();
        writer.set_user(operator());
    });

    tokio::time::timeout(Duration::from_secs(1), async {
        loop {
            rx.changed().await.unwrap();
            if rx.borrow_and_update().state.user().is_some() {
                break;
            }
        }
    })
    .await
    .expect("authenticated state published");

    task.await.unwrap();
    assert_eq!(rx.borrow().generation, 2);
}
