use super::Error;
use std::fmt::Display;

pub const UNEXPECTED_TOKEN: &str = "unexpected token";
pub const UNEXPECTED_TAG: &str = "unexpected tag";
pub const UNEXPECTED_EOF: &str = "unexpected eof";
pub const INVALID_SYNTAX: &str = "invalid syntax";
pub const INVALID_EXTENDS: &str = "invalid extends";
pub const MISSING_TEMPLATE: &str = "missing template";
pub const MISSING_VALUE: &str = "missing value";

/// Return an [`Error`] explaining that the end of source was not expected.
pub fn error_eof(source: &str) -> Error {
    let source_len = source.len();
    Error::build(UNEXPECTED_EOF)
        .with_pointer(source, source_len..source_len)
        .with_help("expected additional tokens, did you close all expressions and tags?")
}

/// Return an [`Error`] explaining that the write operation failed.
///
/// This is likely caused by a failure during a `write!` macro operation.
pub fn error_write() -> Error {
    Error::build("write failure")
        .with_help("failed to write result of render, are you low on memory?")
}

/// Return an [`Error`] describing a template that could not be resolved.
pub fn error_missing_template(name: &str) -> Error {
    Error::build(MISSING_TEMPLATE).with_help(format!(
        "template `{}` could not be resolved, does the engine resolver recognize that name?",
        name
    ))
}

/// Return an [`Error`] describing a value missing from the store.
pub fn error_missing_value(name: &str) -> Error {
    Error::build(MISSING_VALUE).with_help(format!(
        "store does not contain `{}`, add it with `.insert_must`",
        name
    ))
}

/// Return a string describing an unexpected keyword.
pub fn expected_keyword<T>(received: T) -> String
where
    T: Display,
{
    format!(
        "expected keyword like `block`, `endblock` or `extends`, found `{}`",
        received
    )
}
