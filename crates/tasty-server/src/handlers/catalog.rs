//! Lookup table handlers under `/api/v1`

use crate::error::ApiResult;
use crate::extractors::{ApiJson, ApiPath, CommonList, DbConn};
use crate::storage::catalog;
use axum::http::StatusCode;
use axum::Json;
use tasty_core::{
    CategoryInput, CuisineType, CuisineTypeInput, Deleted, Region, RegionInput, RestaurantCategory,
    SocialChannel, SocialChannelInput, Tag, TagInput, Validate,
};
use tracing::info;

pub async fn list_cuisine_types(
    mut conn: DbConn,
    CommonList(query): CommonList,
) -> ApiResult<Json<Vec<CuisineType>>> {
    Ok(Json(catalog::list_cuisine_types(&mut conn, &query).await?))
}

pub async fn create_cuisine_type(
    mut conn: DbConn,
    ApiJson(input): ApiJson<CuisineTypeInput>,
) -> ApiResult<(StatusCode, Json<CuisineType>)> {
    input.validate()?;
    let created = catalog::create_cuisine_type(&mut conn, &input).await?;
    info!("Cuisine type created: {}", created);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn delete_cuisine_type(
    mut conn: DbConn,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Deleted>> {
    catalog::delete_cuisine_type(&mut conn, id).await?;
    info!("Cuisine type {} deleted", id);
    Ok(Json(Deleted { id }))
}

pub async fn list_categories(
    mut conn: DbConn,
    CommonList(query): CommonList,
) -> ApiResult<Json<Vec<RestaurantCategory>>> {
    Ok(Json(catalog::list_categories(&mut conn, &query).await?))
}

pub async fn create_category(
    mut conn: DbConn,
    ApiJson(input): ApiJson<CategoryInput>,
) -> ApiResult<(StatusCode, Json<RestaurantCategory>)> {
    input.validate()?;
    let created = catalog::create_category(&mut conn, &input).await?;
    info!("Category created: {}", created);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn delete_category(
    mut conn: DbConn,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Deleted>> {
    catalog::delete_category(&mut conn, id).await?;
    info!("Category {} deleted", id);
    Ok(Json(Deleted { id }))
}

pub async fn list_regions(
    mut conn: DbConn,
    CommonList(query): CommonList,
) -> ApiResult<Json<Vec<Region>>> {
    Ok(Json(catalog::list_regions(&mut conn, &query).await?))
}

pub async fn create_region(
    mut conn: DbConn,
    ApiJson(input): ApiJson<RegionInput>,
) -> ApiResult<(StatusCode, Json<Region>)> {
    input.validate()?;
    let created = catalog::create_region(&mut conn, &input).await?;
    info!("Region created: {}", created);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn delete_region(
    mut conn: DbConn,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Deleted>> {
    catalog::delete_region(&mut conn, id).await?;
    info!("Region {} deleted", id);
    Ok(Json(Deleted { id }))
}

pub async fn list_tags(
    mut conn: DbConn,
    CommonList(query): CommonList,
) -> ApiResult<Json<Vec<Tag>>> {
    Ok(Json(catalog::list_tags(&mut conn, &query).await?))
}

pub async fn create_tag(
    mut conn: DbConn,
    ApiJson(input): ApiJson<TagInput>,
) -> ApiResult<(StatusCode, Json<Tag>)> {
    input.validate()?;
    let created = catalog::create_tag(&mut conn, &input).await?;
    info!("Tag created: {}", created);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn delete_tag(mut conn: DbConn, ApiPath(id): ApiPath<i64>) -> ApiResult<Json<Deleted>> {
    catalog::delete_tag(&mut conn, id).await?;
    info!("Tag {} deleted", id);
    Ok(Json(Deleted { id }))
}

pub async fn list_social_channels(
    mut conn: DbConn,
    CommonList(query): CommonList,
) -> ApiResult<Json<Vec<SocialChannel>>> {
    Ok(Json(catalog::list_social_channels(&mut conn, &query).await?))
}

pub async fn create_social_channel(
    mut conn: DbConn,
    ApiJson(input): ApiJson<SocialChannelInput>,
) -> ApiResult<(StatusCode, Json<SocialChannel>)> {
    input.validate()?;
    let created = catalog::create_social_channel(&mut conn, &input).await?;
    info!("Social channel created: {}", created);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn delete_social_channel(
    mut conn: DbConn,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Deleted>> {
    catalog::delete_social_channel(&mut conn, id).await?;
    info!("Social channel {} deleted", id);
    Ok(Json(Deleted { id }))
}
