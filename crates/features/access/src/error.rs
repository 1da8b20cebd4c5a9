use std::borrow::Cow;

/// A specialized [`CatalogError`] enum of this crate.
#[concil_derive::concil_error]
pub enum CatalogError {
    #[error("Menu catalog I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    /// The file is not a JSON array of menu items.
    #[error("Menu catalog parse error{}: {source}", format_context(.context))]
    Parse { source: serde_json::Error, context: Option<Cow<'static, str>> },
}
