//! Core domain entities.
//!
//! - [`Link`] - a short name mapped to a target URL
//! - [`LinkVisit`] - one resolved redirect
//!
//! Insert-side inputs live next to them as `NewLink` and `NewLinkVisit`.

pub mod link;
pub mod link_visit;

pub use link::{Link, NewLink};
pub use link_visit::{LinkVisit, NewLinkVisit, VisitMeta};
