use concil::Backoffice;
use concil::access::{AccessDecision, DeviceClass, RecordingNavigator};
use concil::domain::config::{AppConfig, PendingPolicy};
use concil::domain::{Permission, User};
use concil::session::{SessionState, SessionStore};
use std::sync::Arc;
use tempfile::TempDir;

fn config(dir: &TempDir) -> AppConfig {
    let mut config = AppConfig::default();
    config.session.storage_dir = dir.path().join("session");
    config
}

fn operator() -> User {
    User {
        name: "Operador".to_owned(),
        email: "operador@conciliador.com.br".to_owned(),
        permissions: vec![Permission::new(1, "Lotes", 1016)],
        token: "t".to_owned(),
        ..User::default()
    }
}

#[test]
fn open_hydrates_and_survives_restart() {
    let dir = TempDir::new().unwrap();
    let navigator = Arc::new(RecordingNavigator::new());

    let first = Backoffice::open(config(&dir), navigator.clone()).unwrap();
    assert_eq!(first.session().state(), SessionState::Anonymous);
    first.session().set_user(operator());
    drop(first);

    let second = Backoffice::open(config(&dir), navigator).unwrap();
    assert_eq!(second.session().user().email, "operador@conciliador.com.br");
    assert_eq!(second.decide(1016), AccessDecision::Allowed);
}

#[test]
fn menu_follows_session_changes() {
    let dir = TempDir::new().unwrap();
    let backoffice = Backoffice::open(config(&dir), Arc::new(RecordingNavigator::new())).unwrap();

    assert_eq!(backoffice.menu(DeviceClass::Desktop).len(), 1);

    backoffice.session().set_user(operator());
    let labels: Vec<_> = backoffice.menu(DeviceClass::Desktop).into_iter().map(|i| i.label).collect();
    assert_eq!(labels, ["Dashboard", "Processamento"]);

    backoffice.session().clear();
    assert_eq!(backoffice.menu(DeviceClass::Desktop).len(), 1);
}

#[test]
fn configured_denied_route_and_agents_are_used() {
    let dir = TempDir::new().unwrap();
    let mut config = config(&dir);
    config.navigation.access_denied_route = "/sem-acesso".to_owned();
    config.navigation.mobile_agents = vec!["KaiOS".to_owned()];
    config.navigation.pending_policy = PendingPolicy::Deny;

    let navigator = Arc::new(RecordingNavigator::new());
    let store = SessionStore::in_memory();
    let backoffice = Backoffice::with_session(config, store.clone(), navigator.clone()).unwrap();

    assert!(!backoffice.check(1008, true));
    assert!(navigator.visits().is_empty());

    store.init();
    assert!(!backoffice.check(1008, true));
    assert_eq!(navigator.visits(), ["/sem-acesso"]);

    assert_eq!(backoffice.device(Some("KaiOS/2.5")), DeviceClass::Mobile);
    assert_eq!(backoffice.device(Some("iPhone")), DeviceClass::Desktop);
}

#[test]
fn missing_menu_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let mut config = config(&dir);
    config.navigation.menu_path = Some(dir.path().join("menu.json"));

    let result = Backoffice::open(config, Arc::new(RecordingNavigator::new()));
    assert!(matches!(result, Err(concil::BackofficeError::Catalog { .. })));
}
