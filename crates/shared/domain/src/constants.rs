/// Storage key of the persisted session blob.
pub const SESSION_STORAGE_KEY: &str = "conciliador-session";

/// Schema version written into the persisted session blob.
pub const SESSION_SCHEMA_VERSION: u32 = 1;

/// Route shown when a page guard denies access.
pub const ACCESS_DENIED_ROUTE: &str = "/acesso-negado";

/// Platform identifiers that classify a user agent as mobile.
pub const MOBILE_USER_AGENTS: &[&str] =
    &["Android", "webOS", "iPhone", "iPad", "iPod", "BlackBerry", "IEMobile", "Opera Mini"];

/// Rotated log files kept when file logging is enabled.
pub const LOG_MAX_FILES: usize = 10;
