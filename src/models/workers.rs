use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Expert,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub level: SkillLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub rating: f32,
    pub comment: String,
    pub author_name: String,
    #[serde(deserialize_with = "crate::models::deserialize_date")]
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Available,
    Busy,
    Unavailable,
    #[serde(other)]
    Unknown,
}

/// A labourer's public profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    pub id: String,
    pub name: String,
    pub title: String,
    pub avatar: String,
    pub hourly_rate: f64,
    /// 0.0 to 5.0
    pub rating: f32,
    pub review_count: u32,
    pub skills: Vec<Skill>,
    pub availability: Availability,
    pub bio: String,
    pub location: String,
    pub completed_projects: u32,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl Worker {
    /// Case-insensitive substring match against the worker's skill names.
    pub fn has_skill_matching(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.skills
            .iter()
            .any(|s| s.name.to_lowercase().contains(&needle))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}
