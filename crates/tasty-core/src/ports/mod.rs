//! Ports implemented by the storage layer

pub mod items;

pub use items::ItemRepository;
