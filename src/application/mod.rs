//! Application layer services implementing business logic.
//!
//! Services consume repository traits and expose a transport-agnostic API to
//! the HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Link management, listing and redirects

pub mod services;
