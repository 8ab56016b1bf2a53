//! Payloads of the small HTTP demos (search, cookies, sign-up, info)

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Search demo response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub limit: usize,
    pub offset: usize,
    pub results: Vec<String>,
    pub message: String,
}

/// Cookie echo response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdsCookie {
    pub ads_id: Option<String>,
}

/// Sign-up form fields
#[derive(Debug, Clone, Deserialize)]
pub struct SignupForm {
    pub username: String,
    pub password: String,
}

/// Identity behind a session cookie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdentity {
    pub username: String,
}

/// Fixed service information body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub service: String,
    pub description: String,
    pub status: String,
}

/// Seeded restaurant summary served by `/restaurants/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantSummary {
    pub name: String,
    pub branch_name: String,
    pub description: String,
    pub address: String,
    pub feature: String,
    pub is_closed: bool,
    pub latitude: f64,
    pub longitude: f64,
    pub phone: String,
    pub rating: f64,
    pub rating_count: u32,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub last_order_time: NaiveTime,
    pub category: i64,
    pub tags: Vec<String>,
}
