//! Link entity mapping a short name to its target URL.

use chrono::{DateTime, Utc};

/// A stored short link.
///
/// `short_name` is unique across live links and matches `^[A-Za-z0-9]{4,32}$`.
/// `original_url` is an absolute `http` or `https` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub original_url: String,
    pub short_name: String,
    pub created_at: DateTime<Utc>,
}

impl Link {
    pub fn new(
        id: i64,
        original_url: String,
        short_name: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            original_url,
            short_name,
            created_at,
        }
    }

    /// Public short URL for this link under `base_url`.
    pub fn short_url(&self, base_url: &str) -> String {
        format!("{}/r/{}", base_url.trim_end_matches('/'), self.short_name)
    }
}

/// Already validated input for inserting or rewriting a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub original_url: String,
    pub short_name: String,
}
