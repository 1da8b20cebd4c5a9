use std::borrow::Cow;

/// A specialized [`SessionError`] enum of this crate.
#[concil_derive::concil_error]
pub enum SessionError {
    /// The persisted blob could not be read, written or removed.
    #[error("Session storage error{}: {source}", format_context(.context))]
    Storage { source: concil_storage::StorageError, context: Option<Cow<'static, str>> },

    /// The persisted blob is not valid JSON for the expected layout.
    #[error("Session serialization error{}: {source}", format_context(.context))]
    Serialization { source: serde_json::Error, context: Option<Cow<'static, str>> },

    /// The persisted blob was written by an incompatible schema version.
    #[error("Session schema mismatch{}: {message}", format_context(.context))]
    SchemaMismatch { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal session error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
