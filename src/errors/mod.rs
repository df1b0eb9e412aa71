use thiserror::Error;

/// Errors raised while attaching or addressing a pager.
///
/// Fetch failures are not represented here: they are recovered inside the
/// pager and never reach the caller.
#[derive(Debug, Error, PartialEq)]
pub enum PagerError {
    #[error("container is missing the `{0}` attribute")]
    MissingPageAttribute(&'static str),

    #[error("container attribute `{name}` is not a page number: {value:?}")]
    InvalidPageAttribute { name: &'static str, value: String },

    #[error("invalid page range: current page {current} of {total}")]
    InvalidPageRange { current: u32, total: u32 },

    #[error("invalid option `{name}`: {reason}")]
    InvalidOption { name: &'static str, reason: String },

    #[error("no pager is attached to container `{0}`")]
    NotAttached(String),

    #[error("no container registered as `{0}`")]
    UnknownContainer(String),

    #[error("unknown pager command `{0}` (expected `load` or `retry`)")]
    UnknownCommand(String),
}

/// Add context to fetch errors
pub fn fetch_context(url: &str) -> String {
    format!("Failed to fetch from: {}", url)
}

/// Add context to options file errors
pub fn options_context(path: &str) -> String {
    format!("Failed to read pager options from: {}", path)
}
