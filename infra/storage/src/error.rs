use std::borrow::Cow;

/// A specialized [`StorageError`] enum of this crate.
#[concil_derive::concil_error]
pub enum StorageError {
    #[error("Storage root not found{}: {message}", format_context(.context))]
    DirectoryNotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Blob not found{}: {message}", format_context(.context))]
    FileNotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Invalid blob key{}: {message}", format_context(.context))]
    InvalidKey { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Hardware I/O failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },
}
