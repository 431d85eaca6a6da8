pub mod applications;
pub mod bookings;
pub mod gigs;
pub mod messages;
pub mod offers;
pub mod post_votes;
pub mod posts;
pub mod reviews;
pub mod thread_participants;
pub mod threads;
pub mod users;
pub mod verification;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl PaginationQuery {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(20).min(100)
    }
}
