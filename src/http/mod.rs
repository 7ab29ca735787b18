//! HTTP transport module
//!
//! Provides the authenticated GET used for every provider call and the
//! [`PageSource`] seam the pagination drivers fetch through.
//!
//! # Features
//!
//! - **Bearer Authentication**: Every request carries `Authorization: Bearer <token>`
//! - **Status Classification**: Non-2xx responses become [`crate::Error::HttpStatus`]
//! - **No Retries**: Failures propagate to the caller unchanged

mod client;
mod source;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use source::PageSource;

#[cfg(test)]
mod tests;
