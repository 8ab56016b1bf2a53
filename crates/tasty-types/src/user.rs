//! User types for the database-backed account API

use serde::{Deserialize, Serialize};

/// User account as returned to clients. The password hash never leaves storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub email: String,
    pub is_active: bool,
    #[cfg_attr(feature = "db", sqlx(skip))]
    pub items: Vec<OwnedItem>,
}

/// User registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    pub email: String,
    pub password: String,
}

/// Item owned by a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OwnedItem {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub owner_id: i64,
}

/// Owned item creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnedItemCreate {
    pub title: String,
    pub description: Option<String>,
}
