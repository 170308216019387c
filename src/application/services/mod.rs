//! Business logic services for the application layer.

pub mod link_service;

pub use link_service::{
    AUTO_SHORT_NAME_ATTEMPTS, DirectoryStats, DynLinkService, LinkService,
    REDIRECT_STATUS_FOUND, RedirectTarget,
};
