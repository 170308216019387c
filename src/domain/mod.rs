//! Domain layer: entities, validation rules, the list query model and
//! repository contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures
//! - [`validation`] - Field rules for URLs and short names
//! - [`query`] - Sort and range model
//! - [`repositories`] - Storage trait definitions
//!
//! The domain layer has no dependency on infrastructure or HTTP. Business
//! orchestration lives in [`crate::application::services`].

pub mod entities;
pub mod query;
pub mod repositories;
pub mod validation;
