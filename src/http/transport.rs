use std::future::Future;
use thiserror::Error;

use crate::dom::Fragment;

/// A page request that did not produce content.
///
/// Network errors and error statuses are handled the same way by the pager;
/// the variants only exist for logging.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FetchFailed {
    #[error("request failed: {0}")]
    Network(String),

    #[error("server responded with status {status}")]
    Status {
        status: u16,
        payload: Option<Fragment>,
    },
}

impl FetchFailed {
    pub fn payload(&self) -> Option<&Fragment> {
        match self {
            FetchFailed::Network(_) => None,
            FetchFailed::Status { payload, .. } => payload.as_ref(),
        }
    }

    pub fn into_payload(self) -> Option<Fragment> {
        match self {
            FetchFailed::Network(_) => None,
            FetchFailed::Status { payload, .. } => payload,
        }
    }
}

/// Fetches one page of content: `GET {url}?page={page}`.
///
/// Futures run on the pager's single-threaded event loop and need not be `Send`.
pub trait Transport {
    fn fetch(&self, url: &str, page: u32) -> impl Future<Output = Result<Fragment, FetchFailed>>;
}
