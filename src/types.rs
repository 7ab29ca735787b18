//! Common types used throughout the search client
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Wire parameter bag: parameter name to a single string value
pub type StringMap = HashMap<String, String>;

// ============================================================================
// Search Endpoint
// ============================================================================

/// Which search window a request targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchEndpoint {
    /// The recent window (last seven days), `.../recent`
    #[default]
    Recent,
    /// The full archive, `.../all`
    Archive,
}

impl SearchEndpoint {
    /// Final path segment used by both search and counts endpoints
    pub fn segment(self) -> &'static str {
        match self {
            Self::Recent => "recent",
            Self::Archive => "all",
        }
    }
}

// ============================================================================
// Sort Order
// ============================================================================

/// Result ordering requested from the search endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Most relevant first
    Relevancy,
    /// Most recent first
    Recency,
}

impl SortOrder {
    /// Wire value
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Relevancy => "relevancy",
            Self::Recency => "recency",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "relevancy" => Ok(Self::Relevancy),
            "recency" => Ok(Self::Recency),
            other => Err(Error::unknown_variant("sort order", other)),
        }
    }
}

// ============================================================================
// Granularity
// ============================================================================

/// Bucket size for the counts endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Minute,
    Hour,
    #[default]
    Day,
}

impl Granularity {
    /// Wire value
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
        }
    }
}

impl FromStr for Granularity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "minute" => Ok(Self::Minute),
            "hour" => Ok(Self::Hour),
            "day" => Ok(Self::Day),
            other => Err(Error::unknown_variant("granularity", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_segment() {
        assert_eq!(SearchEndpoint::Recent.segment(), "recent");
        assert_eq!(SearchEndpoint::Archive.segment(), "all");
        assert_eq!(SearchEndpoint::default(), SearchEndpoint::Recent);
    }

    #[test]
    fn test_sort_order_parse() {
        assert_eq!("recency".parse::<SortOrder>().unwrap(), SortOrder::Recency);
        assert_eq!(SortOrder::Relevancy.to_string(), "relevancy");
        assert!("newest".parse::<SortOrder>().is_err());
    }

    #[test]
    fn test_granularity_serde() {
        let g: Granularity = serde_json::from_str("\"hour\"").unwrap();
        assert_eq!(g, Granularity::Hour);
        assert_eq!(Granularity::default().as_str(), "day");
        assert_eq!(serde_json::to_string(&Granularity::Minute).unwrap(), "\"minute\"");
    }
}
