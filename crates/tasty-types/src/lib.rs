//! Tasty Types - pure data definitions
//!
//! Wire and storage types shared by the core rules and the HTTP server.
//! No runtime or database dependencies live here.

pub mod article;
pub mod demo;
pub mod item;
pub mod restaurant;
pub mod review;
pub mod user;

pub use article::*;
pub use demo::*;
pub use item::*;
pub use restaurant::*;
pub use review::*;
pub use user::*;

use serde::{Deserialize, Serialize};

/// Body of a successful delete on the restaurant API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deleted {
    pub id: i64,
}

/// Generic message response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
