//! Storage layer
//!
//! SQLite (embedded) holds the catalog and the account tables. DashMap and
//! plain in-memory collections back the demo endpoints.

pub mod accounts;
pub mod articles;
pub mod catalog;
pub mod db;
pub mod memory;
pub mod restaurants;
pub mod reviews;

pub use db::Database;
pub use memory::{seeded_restaurants, FruitShelf, Inventory, MemberDirectory, MemoryItemStore};
