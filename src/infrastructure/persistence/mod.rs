//! PostgreSQL repository implementations.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Link storage and ordered listing
//! - [`PgLinkVisitRepository`] - Visit inserts and ordered listing
//!
//! Both share the ordering contract in [`order_by`].

pub mod order_by;
pub mod pg_link_repository;
pub mod pg_link_visit_repository;

pub use pg_link_repository::PgLinkRepository;
pub use pg_link_visit_repository::PgLinkVisitRepository;
