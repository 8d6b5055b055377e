//! Request and Response models for the fetch cache API
//!
//! This module defines the DTOs used for HTTP query strings and JSON bodies,
//! plus the upstream listing types the fetch layer decodes.

pub mod locations;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use locations::{LocationPage, NamedResource, FIRST_LOCATION_PAGE};
pub use requests::{FetchQuery, KeyQuery, LocationsQuery};
pub use responses::{ErrorResponse, HealthResponse, StatsResponse};
