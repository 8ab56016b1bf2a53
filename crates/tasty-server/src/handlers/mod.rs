//! HTTP handlers

pub mod articles;
pub mod auth;
pub mod catalog;
pub mod cookies;
pub mod fruits;
pub mod health;
pub mod info;
pub mod inventory;
pub mod items;
pub mod listings;
pub mod restaurants;
pub mod reviews;
pub mod search;
pub mod users;
pub mod ws;

pub use health::health;
