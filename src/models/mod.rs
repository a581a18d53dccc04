pub mod jobs;
pub mod projects;
pub mod workers;

pub use jobs::{Bid, BidStatus, JobListing, JobStatus};
pub use projects::{
    Message, Milestone, MilestoneStatus, NewMessage, Project, TeamMember, UpdateMilestoneStatus,
};
pub use workers::{Availability, PortfolioItem, Review, Skill, SkillLevel, Worker};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, de};

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// `?page&limit` parameters. Both are optional; the backend owns the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PaginationQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }

    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    /// Index range of the requested page within a collection of `len` items.
    pub fn window(&self, len: usize) -> std::ops::Range<usize> {
        let limit = self.limit() as usize;
        let start = (self.page() as usize - 1).saturating_mul(limit).min(len);
        let end = start.saturating_add(limit).min(len);
        start..end
    }
}

/// Calendar dates arrive as `YYYY-MM-DD` or as a full ISO-8601 timestamp;
/// both keep only the date.
pub(crate) fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).ok_or_else(|| de::Error::custom(format!("invalid date `{raw}`")))
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|at| at.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|at| at.date())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_accept_plain_and_timestamp_forms() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1);
        assert_eq!(parse_date("2024-03-01"), expected);
        assert_eq!(parse_date("2024-03-01T10:00:00Z"), expected);
        assert_eq!(parse_date("2024-03-01T10:00:00.250+02:00"), expected);
        assert_eq!(parse_date("2024-03-01T10:00:00"), expected);
        assert_eq!(parse_date("March 1st"), None);
    }

    #[test]
    fn defaults_apply_when_unset() {
        let query = PaginationQuery::default();
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn window_past_the_end_is_empty() {
        assert_eq!(PaginationQuery::new(1, 10).window(4), 0..4);
        assert_eq!(PaginationQuery::new(2, 10).window(4), 4..4);
        assert_eq!(PaginationQuery::new(2, 3).window(4), 3..4);
    }

    #[test]
    fn limit_is_clamped() {
        assert_eq!(PaginationQuery::new(0, 0).limit(), 1);
        assert_eq!(PaginationQuery::new(0, 500).limit(), MAX_PAGE_SIZE);
        assert_eq!(PaginationQuery::new(0, 5).page(), 1);
    }
}
