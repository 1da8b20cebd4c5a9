#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Attribute macros shared by every crate of the workspace.
//!
//! * [`macro@concil_error`] turns a plain enum into a context-aware error type.
//! * [`macro@api_model`] stamps the serde policy used by every DTO exchanged with the backend.
//!
//! Examples are `ignore`d because a proc-macro crate cannot use its own macros in doctests.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemStruct, parse_macro_input};

/// Attribute macro defining a standard data transfer object.
///
/// # Injected Behaviors
///
/// * **Derives**: adds `Debug`, `Serialize` and `Deserialize` when missing.
/// * **Serde Policy**: `rename_all = "camelCase"` and `deny_unknown_fields` by default.
///
/// # Arguments
///
/// * `rename_all = "..."` - overrides the rename policy.
/// * `deny_unknown_fields = false` - accepts unknown fields (useful for backend payloads
///   that grow over time).
///
/// # Example
///
/// ```rust,ignore
/// use concil_derive::api_model;
///
/// #[api_model(deny_unknown_fields = false)]
/// pub struct LoginResponse {
///     pub nome: String,
///     pub is_suporte: bool,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Attribute macro for domain-specific error enums.
///
/// # Features
///
/// * **Automatic Derives**: injects `#[derive(Debug, thiserror::Error)]`.
/// * **Context Support**: generates a companion `<Name>Ext` trait adding `.context(...)`
///   to `Result<T, Name>` and to `Result<T, Source>` for each wrapped source error.
/// * **Conversions**: `From<Source>` for variants with a `source` field, so `?` works.
/// * **Internal Fallback**: `From<&'static str>` and `From<String>` when an `Internal`
///   variant exists.
/// * **Formatting**: a private `format_context` helper for the `#[error(...)]` strings.
///
/// # Requirements
///
/// 1. Only enums are accepted, and every variant must use named fields.
/// 2. A context field must be typed `Option<Cow<'static, str>>`.
/// 3. A variant wrapping a source error must also carry a context field.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[concil_derive::concil_error]
/// pub enum StorageError {
///     #[error("I/O failure{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn load() -> Result<Vec<u8>, StorageError> {
///     std::fs::read("blob.json").context("Reading session blob")
/// }
/// ```
#[proc_macro_attribute]
pub fn concil_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}
