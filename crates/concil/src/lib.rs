//! Facade crate for the Conciliador navigation core.
//! Re-exports the shared and feature crates and wires them into one [`Backoffice`] context.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Load an [`AppConfig`](domain::config::AppConfig) with [`kernel::config::load_config`].
//! - Call [`Backoffice::open`] with a [`Navigator`](access::Navigator) for access-denied redirects.
//! - Ask it for the menu, or to check pages and actions; it always reads the live session.

mod error;

pub use concil_access as access;
pub use concil_domain as domain;
pub use concil_kernel as kernel;
pub use concil_session as session;

pub use crate::error::{BackofficeError, BackofficeErrorExt};

use concil_access::{AccessDecision, AccessPolicy, DeviceClass, MenuCatalog, Navigator, PageGuard};
use concil_domain::config::AppConfig;
use concil_domain::{MenuItem, Tag};
use concil_session::SessionStore;
use std::sync::Arc;
use tracing::info;

/// Everything a screen needs to decide what the signed-in user may see.
#[derive(Debug, Clone)]
pub struct Backoffice {
    config: AppConfig,
    guard: PageGuard,
    catalog: Arc<MenuCatalog>,
}

impl Backoffice {
    /// Opens the persisted session, loads the menu catalog and hydrates the session.
    ///
    /// # Errors
    /// Returns an error if the session storage directory cannot be opened or a configured
    /// menu file cannot be loaded. An unreadable session is not an error; it yields an
    /// anonymous session.
    pub fn open(config: AppConfig, navigator: Arc<dyn Navigator>) -> Result<Self, BackofficeError> {
        let session = concil_session::open(&config.session).context("Opening session storage")?;
        let backoffice = Self::with_session(config, session, navigator)?;
        backoffice.session().init();
        Ok(backoffice)
    }

    /// Builds the context around an existing store, leaving its lifecycle to the caller.
    ///
    /// # Errors
    /// Returns [`BackofficeError::Catalog`] if a configured menu file cannot be loaded.
    pub fn with_session(
        config: AppConfig,
        session: SessionStore,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, BackofficeError> {
        let catalog = match &config.navigation.menu_path {
            Some(path) => MenuCatalog::from_path(path)?,
            None => MenuCatalog::default(),
        };

        let policy = AccessPolicy::new(session, config.navigation.pending_policy);
        let guard = PageGuard::new(policy, navigator, config.navigation.access_denied_route.as_str());

        info!(
            entries = catalog.len(),
            restricted_tags = catalog.restricted_tags().len(),
            pending_policy = ?config.navigation.pending_policy,
            "Backoffice ready"
        );

        Ok(Self { config, guard, catalog: Arc::new(catalog) })
    }

    /// Gates a page (`is_full_page_guard`, redirects on denial) or an action.
    pub fn check(&self, tag: impl Into<Tag>, is_full_page_guard: bool) -> bool {
        self.guard.check(tag, is_full_page_guard)
    }

    #[must_use]
    pub fn decide(&self, tag: impl Into<Tag>) -> AccessDecision {
        self.guard.policy().decide(tag)
    }

    /// Classifies a user agent with the configured mobile identifiers.
    #[must_use]
    pub fn device(&self, user_agent: Option<&str>) -> DeviceClass {
        DeviceClass::from_user_agent_with(user_agent, self.config.navigation.mobile_agents.as_slice())
    }

    /// The menu the current user may see on `device`.
    #[must_use]
    pub fn menu(&self, device: DeviceClass) -> Vec<MenuItem> {
        concil_access::build_menu(&self.catalog, &self.session().user(), device)
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        self.guard.policy().session()
    }

    #[must_use]
    pub const fn guard(&self) -> &PageGuard {
        &self.guard
    }

    #[must_use]
    pub fn catalog(&self) -> &MenuCatalog {
        &self.catalog
    }

    #[must_use]
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }
}
