//! Review types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of characters shown by [`Review::content_partial`]
pub const CONTENT_PREVIEW_CHARS: usize = 20;

/// Channel a review was collected from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct SocialChannel {
    pub id: i64,
    pub name: String,
}

impl fmt::Display for SocialChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialChannelInput {
    pub name: String,
}

/// A restaurant review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Review {
    pub id: i64,
    pub restaurant_id: i64,
    pub social_channel_id: Option<i64>,
    pub title: String,
    pub author: String,
    pub profile_image: Option<String>,
    pub content: String,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    /// Leading characters of the content, for list views
    pub fn content_partial(&self) -> String {
        self.content.chars().take(CONTENT_PREVIEW_CHARS).collect()
    }
}

impl fmt::Display for Review {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.author, self.title)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewInput {
    pub title: String,
    pub author: String,
    pub profile_image: Option<String>,
    pub content: String,
    pub rating: i32,
    pub social_channel_id: Option<i64>,
}

/// Row of the review list view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewListing {
    pub id: i64,
    pub restaurant_name: String,
    pub author: String,
    pub rating: i32,
    pub content_partial: String,
}

/// Review with its images inlined
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewDetail {
    #[serde(flatten)]
    pub review: Review,
    pub restaurant_name: String,
    pub images: Vec<ReviewImage>,
}

/// Picture attached to a review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ReviewImage {
    pub id: i64,
    pub review_id: i64,
    pub name: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Display for ReviewImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.id, self.image)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewImageInput {
    pub name: String,
    pub image: String,
}
