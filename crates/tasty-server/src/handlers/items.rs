//! Positional item CRUD over the injected [`ItemRepository`]
//!
//! [`ItemRepository`]: tasty_core::ports::ItemRepository

use crate::error::ApiResult;
use crate::extractors::{ApiJson, ApiPath, ApiQuery};
use crate::AppState;
use axum::extract::State;
use axum::Json;
use tasty_core::pagination::{PageParams, DEFAULT_LIMIT};
use tasty_core::{DeletedItem, Item, Page};
use tracing::info;

pub async fn list(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> ApiResult<Json<Vec<Item>>> {
    let page = Page::from_params(params.skip, params.limit, DEFAULT_LIMIT)?;
    Ok(Json(state.items.list(page).await))
}

pub async fn create(State(state): State<AppState>, ApiJson(item): ApiJson<Item>) -> Json<Item> {
    let item = state.items.create(item).await;
    info!("Item created: {}", item.name);
    Json(item)
}

pub async fn get(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Item>> {
    Ok(Json(state.items.get(id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(item): ApiJson<Item>,
) -> ApiResult<Json<Item>> {
    Ok(Json(state.items.replace(id, item).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<DeletedItem>> {
    let deleted_item = state.items.remove(id).await?;
    info!("Item {} deleted: {}", id, deleted_item.name);
    Ok(Json(DeletedItem { deleted_item }))
}

#[cfg(test)]
mod tests {
    use crate::testing::{self, send};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_crud_by_position() {
        let app = testing::app().await;
        for name in ["a", "b", "c"] {
            let res = send(
                &app,
                testing::json(Method::POST, "/items/", json!({"name": name, "price": 2.5})),
            )
            .await;
            assert_eq!(res.status, StatusCode::OK);
        }

        let res = send(&app, testing::get("/items/?skip=1&limit=10")).await;
        assert_eq!(res.body.as_array().unwrap().len(), 2);
        assert_eq!(res.body[0]["name"], "b");

        let res = send(&app, testing::delete("/items/2")).await;
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body["deleted_item"]["name"], "b");

        let res = send(&app, testing::get("/items/3")).await;
        assert_eq!(res.status, StatusCode::NOT_FOUND);
        assert_eq!(res.body["detail"], "Item not found");

        let res = send(
            &app,
            testing::json(Method::PUT, "/items/2", json!({"name": "z", "price": 1.0, "tax": 0.1})),
        )
        .await;
        assert_eq!(res.body["name"], "z");
        assert_eq!(send(&app, testing::get("/items/2")).await.body["tax"], 0.1);
    }

    #[tokio::test]
    async fn test_negative_skip_is_unprocessable() {
        let app = testing::app().await;
        let res = send(&app, testing::get("/items/?skip=-1")).await;
        assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_missing_price_is_unprocessable() {
        let app = testing::app().await;
        let res = send(&app, testing::json(Method::POST, "/items/", json!({"name": "a"}))).await;
        assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(res.body["detail"].is_string());
    }

    #[tokio::test]
    async fn test_non_numeric_position_is_unprocessable() {
        let app = testing::app().await;
        let res = send(&app, testing::get("/items/abc")).await;
        assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(res.body["detail"].as_str().unwrap().contains("abc"));
    }
}
