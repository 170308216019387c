//! Shared state injected into every handler.

use std::sync::Arc;

use crate::application::services::DynLinkService;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<DynLinkService>,
    /// Public origin used to render `short_url`, without a trailing slash.
    pub base_url: Arc<str>,
    /// Read the client IP from proxy headers instead of the socket peer.
    pub behind_proxy: bool,
}

impl AppState {
    pub fn new(link_service: Arc<DynLinkService>, base_url: &str, behind_proxy: bool) -> Self {
        Self {
            link_service,
            base_url: Arc::from(base_url.trim_end_matches('/')),
            behind_proxy,
        }
    }
}
