//! HTTP client for the SearXNG search API.

mod client;
mod error;

pub use client::SearxClient;
pub use error::{Result, SearxError};
