//! Repository trait definitions for the domain layer.
//!
//! Traits define the storage contract; PostgreSQL implementations live in
//! `crate::infrastructure::persistence`. Mocks are generated with `mockall`
//! for unit tests.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Link CRUD and ordered listing
//! - [`LinkVisitRepository`] - Visit inserts and ordered listing
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod link_repository;
pub mod link_visit_repository;

pub use link_repository::LinkRepository;
pub use link_visit_repository::LinkVisitRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use link_visit_repository::MockLinkVisitRepository;
