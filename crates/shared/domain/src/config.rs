use crate::constants::{
    ACCESS_DENIED_ROUTE, LOG_MAX_FILES, MOBILE_USER_AGENTS, SESSION_SCHEMA_VERSION,
    SESSION_STORAGE_KEY,
};
use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level application configuration.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfigInner {
    pub session: SessionConfig,
    pub navigation: NavigationConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(flatten, default)]
    inner: Arc<AppConfigInner>,
}

impl Deref for AppConfig {
    type Target = AppConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for AppConfig {
    fn deref_mut(&mut self) -> &mut AppConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Where and how the signed-in session is persisted.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub storage_dir: PathBuf,
    pub storage_key: String,
    pub schema_version: u32,
}

/// Answer given by boolean permission checks while the session is still loading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PendingPolicy {
    /// Fail open: behave as if access were granted.
    #[default]
    Allow,
    /// Fail closed: behave as if access were denied.
    Deny,
}

/// Menu and page-guard settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub access_denied_route: String,
    pub mobile_agents: Vec<String>,
    pub pending_policy: PendingPolicy,
    /// Optional JSON menu definition replacing the built-in catalog.
    pub menu_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub filter: Option<String>,
    pub directory: Option<PathBuf>,
    pub json: bool,
    /// File rotation period: `minutely`, `hourly`, `daily` or `never`.
    pub rotation: String,
    pub max_files: usize,
}

// --- Default ---

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(".conciliador"),
            storage_key: SESSION_STORAGE_KEY.to_owned(),
            schema_version: SESSION_SCHEMA_VERSION,
        }
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            access_denied_route: ACCESS_DENIED_ROUTE.to_owned(),
            mobile_agents: MOBILE_USER_AGENTS.iter().map(|&agent| agent.to_owned()).collect(),
            pending_policy: PendingPolicy::default(),
            menu_path: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            filter: None,
            directory: None,
            json: false,
            rotation: "daily".to_owned(),
            max_files: LOG_MAX_FILES,
        }
    }
}
