//! Request extractors

pub mod cookies;
pub mod db;
pub mod query;
pub mod session;

pub use db::DbConn;
pub use query::{ApiForm, ApiJson, ApiPath, ApiQuery, CommonList};
pub use session::SessionUser;
