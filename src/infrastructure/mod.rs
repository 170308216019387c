//! Infrastructure layer implementing the domain's storage contracts.
//!
//! - [`persistence`] - PostgreSQL repository implementations

pub mod persistence;
