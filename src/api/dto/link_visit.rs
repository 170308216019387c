//! DTOs for visit listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::LinkVisit;

#[derive(Debug, Serialize, Deserialize)]
pub struct LinkVisitResponse {
    pub id: i64,
    pub link_id: i64,
    pub created_at: DateTime<Utc>,
    pub ip: String,
    pub user_agent: String,
    pub referer: String,
    pub status: i32,
}

impl From<LinkVisit> for LinkVisitResponse {
    fn from(visit: LinkVisit) -> Self {
        Self {
            id: visit.id,
            link_id: visit.link_id,
            created_at: visit.created_at,
            ip: visit.ip,
            user_agent: visit.user_agent,
            referer: visit.referer,
            status: visit.status,
        }
    }
}
