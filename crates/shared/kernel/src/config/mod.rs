use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Base name of the configuration file looked up when no path is given
/// (`conciliador.toml`, `conciliador.json`, ...).
pub const DEFAULT_CONFIG_NAME: &str = "conciliador";

/// Prefix of environment overrides (`CONCIL__SESSION__STORAGE_DIR`).
pub const ENV_PREFIX: &str = "CONCIL";

#[concil_derive::concil_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads a configuration structure from a file plus environment overrides.
///
/// Layering:
/// 1. **Base file**: the given path (required), or `conciliador.*` in the working directory
///    (optional; all defaults apply when it is absent).
/// 2. **Environment**: variables prefixed with `CONCIL__`, nested with double underscores
///    (`CONCIL__NAVIGATION__PENDING_POLICY=deny` maps to `navigation.pending_policy`).
///
/// # Errors
/// Returns [`ConfigError::Config`] if an explicitly requested file is missing, a source
/// cannot be parsed, or the merged values do not fit `T`.
///
/// # Example
/// ```rust
/// use concil_kernel::config::load_config;
/// use concil_kernel::domain::config::AppConfig;
///
/// let cfg: AppConfig = load_config(None::<&str>).unwrap_or_default();
/// assert_eq!(cfg.session.storage_key, "conciliador-session");
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let (effective_path, required) = path.map_or_else(
        || (PathBuf::from(DEFAULT_CONFIG_NAME), false),
        |p| (p.as_ref().to_path_buf(), true),
    );

    info!(path = %effective_path.display(), required, "Loading config");

    Config::builder()
        .add_source(File::from(effective_path.as_path()).required(required))
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__").try_parsing(true))
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")
}
