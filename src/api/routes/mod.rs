//! Route handlers for the REST API
//!
//! Handlers are organized by domain:
//! - [`convert`] - Clip conversion and its CORS preflight
//! - [`system`] - Health and OpenAPI

mod convert;
mod system;

// Re-export all handlers so `routes::function_name` works from the router
pub use convert::*;
pub use system::*;
