//! Item types for the in-memory stores

use serde::{Deserialize, Serialize};

/// Item kept in the positional list (`/items/`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub tax: Option<f64>,
}

/// Response of a positional delete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletedItem {
    pub deleted_item: Item,
}

/// Entry of the keyed inventory (`/inventory/{item_id}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockItem {
    pub name: String,
    pub size: i64,
}

/// Result of an inventory upsert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockResponse {
    pub message: String,
    pub item: StockItem,
}

/// Fruit lookup result (`/fruits/{name}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FruitResponse {
    pub item: String,
}
