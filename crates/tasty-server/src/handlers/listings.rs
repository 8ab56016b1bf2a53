use crate::error::ApiResult;
use crate::extractors::ApiQuery;
use crate::AppState;
use axum::extract::State;
use axum::Json;
use tasty_core::pagination::{PageParams, DEFAULT_LIMIT};
use tasty_core::{Page, RestaurantSummary};

/// Slice of the seeded restaurant listing
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> ApiResult<Json<Vec<RestaurantSummary>>> {
    let page = Page::from_params(params.skip, params.limit, DEFAULT_LIMIT)?;
    Ok(Json(page.slice(&state.listings).to_vec()))
}
