//! Helpers shared across layers.
//!
//! - [`code_generator`] - Random short name generation
//! - [`client_ip`] - Caller address extraction from requests
//! - [`db_error`] - PostgreSQL error classification

pub mod client_ip;
pub mod code_generator;
pub mod db_error;
