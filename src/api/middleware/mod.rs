//! HTTP middleware for request processing.
//!
//! Provides the request time budget, CORS, request ids, panic recovery and
//! observability.

pub mod budget;
pub mod cors;
pub mod recovery;
pub mod request_id;
pub mod tracing;
