//! Remote assistant client over HTTP.

pub mod http;
pub mod types;

pub use http::HttpAssistantClient;
