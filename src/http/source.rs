//! Single-page fetching
//!
//! [`PageSource`] is the one network primitive the pagination drivers use:
//! a GET against a locator with a parameter bag, returning the decoded body.

use super::client::{HttpClient, RequestConfig};
use crate::error::Result;
use crate::resource::ResourcePath;
use crate::types::{JsonValue, StringMap};
use async_trait::async_trait;

/// Something that can fetch one page of provider results
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Issue exactly one request and return the decoded body verbatim
    async fn fetch(&self, path: &ResourcePath, params: &StringMap) -> Result<JsonValue>;
}

#[async_trait]
impl PageSource for HttpClient {
    async fn fetch(&self, path: &ResourcePath, params: &StringMap) -> Result<JsonValue> {
        self.get_json(path.as_str(), RequestConfig::with_params(params))
            .await
    }
}
