use concil_derive::concil_error;
use std::borrow::Cow;

#[concil_error]
pub enum DemoError {
    #[error("I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read_missing() -> Result<Vec<u8>, DemoError> {
    std::fs::read("/definitely/not/here").context("reading blob")
}

fn main() {
    let err = read_missing().unwrap_err();
    assert!(err.to_string().starts_with("I/O error (reading blob): "));

    let internal: Result<(), DemoError> = Err("boom".into());
    let internal = internal.context("step one").unwrap_err();
    assert_eq!(internal.to_string(), "Internal error (step one): boom");

    let owned = DemoError::from(String::from("owned"));
    assert_eq!(owned.to_string(), "Internal error: owned");
}
