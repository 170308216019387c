//! Visit record written on every successful redirect.

use chrono::{DateTime, Utc};

/// A single resolved redirect. Never mutated after insert.
///
/// `link_id` is not enforced by a foreign key and may dangle after the
/// link is deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkVisit {
    pub id: i64,
    pub link_id: i64,
    pub created_at: DateTime<Utc>,
    pub ip: String,
    pub user_agent: String,
    pub referer: String,
    pub status: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLinkVisit {
    pub link_id: i64,
    pub created_at: DateTime<Utc>,
    pub ip: String,
    pub user_agent: String,
    pub referer: String,
    pub status: i32,
}

/// Caller metadata captured by the edge at redirect time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitMeta {
    pub ip: String,
    pub user_agent: String,
    pub referer: String,
}

impl NewLinkVisit {
    pub fn new(link_id: i64, meta: VisitMeta, status: i32, created_at: DateTime<Utc>) -> Self {
        Self {
            link_id,
            created_at,
            ip: meta.ip,
            user_agent: meta.user_agent,
            referer: meta.referer,
            status,
        }
    }
}
