use concil_kernel::config::{ConfigError, load_config};
use concil_kernel::domain::config::{AppConfig, PendingPolicy};
use std::fs;
use tempfile::tempdir;

#[test]
fn loads_toml_file_over_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("conciliador.toml");
    fs::write(
        &path,
        r#"
[session]
storage_dir = "/tmp/conciliador-state"

[navigation]
pending_policy = "deny"
mobile_agents = ["Android", "KaiOS"]
"#,
    )
    .unwrap();

    let cfg: AppConfig = load_config(Some(&path)).unwrap();
    assert_eq!(cfg.session.storage_dir, std::path::PathBuf::from("/tmp/conciliador-state"));
    assert_eq!(cfg.session.storage_key, "conciliador-session");
    assert_eq!(cfg.navigation.pending_policy, PendingPolicy::Deny);
    assert_eq!(cfg.navigation.mobile_agents, vec!["Android".to_owned(), "KaiOS".to_owned()]);
    assert_eq!(cfg.navigation.access_denied_route, "/acesso-negado");
}

#[test]
fn explicit_missing_file_is_an_error() {
    let dir = tempdir().unwrap();
    let result: Result<AppConfig, ConfigError> = load_config(Some(dir.path().join("nope.toml")));
    assert!(matches!(result, Err(ConfigError::Config { .. })));
}
