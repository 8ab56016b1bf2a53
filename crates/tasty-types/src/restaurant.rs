//! Restaurant catalog types
//!
//! Relations are plain ids. Joined views (`RestaurantDetail`) are assembled
//! by the storage layer.

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of cuisine a category belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CuisineType {
    pub id: i64,
    pub name: String,
}

impl fmt::Display for CuisineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CuisineTypeInput {
    pub name: String,
}

/// Restaurant category, optionally grouped under a cuisine type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct RestaurantCategory {
    pub id: i64,
    pub name: String,
    pub cuisine_type_id: Option<i64>,
}

impl fmt::Display for RestaurantCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryInput {
    pub name: String,
    pub cuisine_type_id: Option<i64>,
}

/// Administrative region; the triple is unique
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Region {
    pub id: i64,
    pub sido: String,
    pub sigungu: String,
    pub eupmyeondong: String,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.sido, self.sigungu, self.eupmyeondong)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionInput {
    pub sido: String,
    pub sigungu: String,
    pub eupmyeondong: String,
}

/// Free-form tag; names are unique
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagInput {
    pub name: String,
}

/// A restaurant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    pub branch_name: Option<String>,
    pub description: Option<String>,
    pub address: String,
    pub feature: String,
    pub is_closed: bool,
    pub latitude: f64,
    pub longitude: f64,
    pub phone: Option<String>,
    pub rating: f64,
    pub rating_count: u32,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub last_order_time: Option<NaiveTime>,
    pub category_id: Option<i64>,
    pub region_id: Option<i64>,
    #[cfg_attr(feature = "db", sqlx(skip))]
    pub tag_ids: Vec<i64>,
}

impl Restaurant {
    /// Name with the branch appended when there is one
    pub fn display_name(&self) -> String {
        match &self.branch_name {
            Some(branch) => format!("{} {}", self.name, branch),
            None => self.name.clone(),
        }
    }
}

impl fmt::Display for Restaurant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

/// Create / full-update payload for a restaurant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantInput {
    pub name: String,
    pub branch_name: Option<String>,
    pub description: Option<String>,
    pub address: String,
    pub feature: String,
    #[serde(default)]
    pub is_closed: bool,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    pub phone: Option<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub rating_count: u32,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub last_order_time: Option<NaiveTime>,
    pub category_id: Option<i64>,
    pub region_id: Option<i64>,
    #[serde(default)]
    pub tag_ids: Vec<i64>,
}

/// Restaurant with its relations and inline children resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantDetail {
    #[serde(flatten)]
    pub restaurant: Restaurant,
    pub display_name: String,
    pub category: Option<RestaurantCategory>,
    pub region: Option<Region>,
    pub tags: Vec<Tag>,
    pub menus: Vec<RestaurantMenu>,
    pub images: Vec<RestaurantImage>,
}

/// Restaurant photo. At most one per restaurant is representative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct RestaurantImage {
    pub id: i64,
    pub restaurant_id: i64,
    pub is_representative: bool,
    #[cfg_attr(feature = "db", sqlx(rename = "sort_order"))]
    pub order: Option<u32>,
    pub name: Option<String>,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Display for RestaurantImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.id, self.image)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantImageInput {
    #[serde(default)]
    pub is_representative: bool,
    pub order: Option<u32>,
    pub name: Option<String>,
    pub image: String,
}

/// Menu entry of a restaurant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct RestaurantMenu {
    pub id: i64,
    pub restaurant_id: i64,
    pub name: String,
    pub price: u32,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Display for RestaurantMenu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantMenuInput {
    pub name: String,
    #[serde(default)]
    pub price: u32,
    pub image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn restaurant(branch: Option<&str>) -> Restaurant {
        Restaurant {
            id: 1,
            name: "김밥천국".to_string(),
            branch_name: branch.map(str::to_string),
            description: None,
            address: "서울 강남구 테헤란로 123".to_string(),
            feature: "24h".to_string(),
            is_closed: false,
            latitude: 37.501274,
            longitude: 127.039585,
            phone: None,
            rating: 4.2,
            rating_count: 120,
            start_time: None,
            end_time: None,
            last_order_time: None,
            category_id: None,
            region_id: None,
            tag_ids: vec![],
        }
    }

    #[test]
    fn test_display_name_with_branch() {
        assert_eq!(restaurant(Some("강남점")).to_string(), "김밥천국 강남점");
        assert_eq!(restaurant(None).to_string(), "김밥천국");
    }

    #[test]
    fn test_region_label() {
        let region = Region {
            id: 3,
            sido: "서울특별시".to_string(),
            sigungu: "강남구".to_string(),
            eupmyeondong: "역삼동".to_string(),
        };
        assert_eq!(region.to_string(), "서울특별시 강남구 역삼동");
    }

    #[test]
    fn test_input_defaults() {
        let input: RestaurantInput = serde_json::from_str(
            r#"{"name":"돈까스하우스","address":"서울 강남구 선릉로 77",
                "feature":"수제","start_time":"11:00:00"}"#,
        )
        .unwrap();
        assert!(!input.is_closed);
        assert_eq!(input.rating_count, 0);
        assert!(input.tag_ids.is_empty());
        assert_eq!(input.start_time, NaiveTime::from_hms_opt(11, 0, 0));
    }
}
