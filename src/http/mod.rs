pub mod client;
pub mod transport;

pub use client::HttpTransport;
pub use transport::{FetchFailed, Transport};
