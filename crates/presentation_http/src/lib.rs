//! HTTP presentation layer
//!
//! Exposes the aggregate services as a REST API under `/v1`, with payload
//! validation at the boundary, OpenAPI documentation, and JSON error
//! responses that distinguish not-found from uniqueness conflicts.

pub mod error;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use routes::create_router;
pub use state::AppState;
