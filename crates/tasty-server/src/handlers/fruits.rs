use crate::error::{ApiError, ApiResult};
use crate::extractors::ApiPath;
use crate::AppState;
use axum::extract::State;
use axum::Json;
use tasty_core::{FruitResponse, TastyError};

/// Fruit description; misses carry an `X-Error` header
pub async fn get(
    State(state): State<AppState>,
    ApiPath(name): ApiPath<String>,
) -> ApiResult<Json<FruitResponse>> {
    match state.fruits.describe(&name) {
        Some(description) => Ok(Json(FruitResponse {
            item: description.to_string(),
        })),
        None => Err(ApiError::from(TastyError::not_found("Item not found"))
            .with_header("x-error", "There goes my error")),
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::{self, send};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_known_and_unknown_fruit() {
        let app = testing::app().await;
        let res = send(&app, testing::get("/fruits/apple")).await;
        assert_eq!(res.body["item"], "This is an apple");

        let res = send(&app, testing::get("/fruits/durian")).await;
        assert_eq!(res.status, StatusCode::NOT_FOUND);
        assert_eq!(res.headers["x-error"], "There goes my error");
    }
}
