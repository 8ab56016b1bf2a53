use crate::error::ApiResult;
use crate::extractors::{ApiPath, ApiQuery};
use crate::storage::memory::Upsert;
use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tasty_core::{StockItem, StockResponse, TastyError};

pub async fn get(
    State(state): State<AppState>,
    ApiPath(item_id): ApiPath<String>,
) -> ApiResult<Json<StockItem>> {
    state
        .inventory
        .get(&item_id)
        .map(Json)
        .ok_or_else(|| TastyError::not_found("Item not found").into())
}

/// Insert (201) or replace (200) the entry under `item_id`
pub async fn upsert(
    State(state): State<AppState>,
    ApiPath(item_id): ApiPath<String>,
    ApiQuery(item): ApiQuery<StockItem>,
) -> (StatusCode, Json<StockResponse>) {
    let (status, message) = match state.inventory.upsert(&item_id, item.clone()) {
        Upsert::Created => (StatusCode::CREATED, "Item created"),
        Upsert::Updated => (StatusCode::OK, "Item updated"),
    };
    (
        status,
        Json(StockResponse {
            message: message.to_string(),
            item,
        }),
    )
}
