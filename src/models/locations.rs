//! Upstream listing types
//!
//! Paged location listing as served by the upstream API.

use serde::{Deserialize, Serialize};

/// Relative target of the first location page.
pub const FIRST_LOCATION_PAGE: &str = "location?offset=0&limit=20";

/// A named upstream resource reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

/// One page of the location listing.
///
/// `next` and `previous` are absolute URLs to pass back for paging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationPage {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<NamedResource>,
}
