//! Tasty Core Library
//!
//! Error taxonomy, validation rules, pagination and storage ports for the
//! Tasty service.

// Re-export pure types from tasty-types
pub use tasty_types::*;

pub mod error;
pub mod pagination;
pub mod ports;
pub mod search;
pub mod validation;

pub use error::{Result, TastyError};
pub use pagination::{CommonQuery, Page};
pub use validation::Validate;
