//! Review handlers under `/api/v1`

use crate::error::ApiResult;
use crate::extractors::{ApiJson, ApiPath, ApiQuery, DbConn};
use crate::storage::reviews;
use axum::http::StatusCode;
use axum::Json;
use tasty_core::pagination::{PageParams, DEFAULT_LIMIT};
use tasty_core::{
    Deleted, Page, Review, ReviewDetail, ReviewImage, ReviewImageInput, ReviewInput, ReviewListing,
    Validate,
};
use tracing::info;

pub async fn list_for_restaurant(
    mut conn: DbConn,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> ApiResult<Json<Vec<Review>>> {
    let page = Page::from_params(params.skip, params.limit, DEFAULT_LIMIT)?;
    Ok(Json(reviews::list_for_restaurant(&mut conn, id, page).await?))
}

pub async fn create(
    mut conn: DbConn,
    ApiPath(id): ApiPath<i64>,
    ApiJson(input): ApiJson<ReviewInput>,
) -> ApiResult<(StatusCode, Json<Review>)> {
    input.validate()?;
    let review = reviews::create(&mut conn, id, &input).await?;
    info!("Review {} posted for restaurant {}: {}", review.id, id, review);
    Ok((StatusCode::CREATED, Json(review)))
}

/// Admin listing: newest first, content shortened
pub async fn list(
    mut conn: DbConn,
    ApiQuery(params): ApiQuery<PageParams>,
) -> ApiResult<Json<Vec<ReviewListing>>> {
    let page = Page::from_params(params.skip, params.limit, DEFAULT_LIMIT)?;
    Ok(Json(reviews::list(&mut conn, page).await?))
}

pub async fn get(mut conn: DbConn, ApiPath(id): ApiPath<i64>) -> ApiResult<Json<ReviewDetail>> {
    Ok(Json(reviews::detail(&mut conn, id).await?))
}

pub async fn delete(mut conn: DbConn, ApiPath(id): ApiPath<i64>) -> ApiResult<Json<Deleted>> {
    reviews::delete(&mut conn, id).await?;
    info!("Review {} deleted", id);
    Ok(Json(Deleted { id }))
}

pub async fn add_image(
    mut conn: DbConn,
    ApiPath(id): ApiPath<i64>,
    ApiJson(input): ApiJson<ReviewImageInput>,
) -> ApiResult<(StatusCode, Json<ReviewImage>)> {
    input.validate()?;
    let image = reviews::add_image(&mut conn, id, &input).await?;
    Ok((StatusCode::CREATED, Json(image)))
}
