//! API Module
//!
//! HTTP handlers and routing for the fetch cache service.
//!
//! # Endpoints
//! - `GET /cache?key=` - Read a cached payload
//! - `GET /fetch?url=` - Fetch through the cache
//! - `GET /locations` - Paged location listing through the cache
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
