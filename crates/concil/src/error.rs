use std::borrow::Cow;

#[concil_derive::concil_error]
pub enum BackofficeError {
    #[error("Session setup failed{}: {source}", format_context(.context))]
    Session { source: concil_session::SessionError, context: Option<Cow<'static, str>> },

    #[error("Menu catalog unavailable{}: {source}", format_context(.context))]
    Catalog { source: concil_access::CatalogError, context: Option<Cow<'static, str>> },
}
