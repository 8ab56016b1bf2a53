//! Database-backed users and their items (`/db`)

use crate::error::ApiResult;
use crate::extractors::{ApiJson, ApiPath, ApiQuery, DbConn};
use crate::storage::accounts;
use crate::AppState;
use axum::extract::State;
use axum::Json;
use tasty_core::pagination::{PageParams, DEFAULT_LIMIT};
use tasty_core::{OwnedItem, OwnedItemCreate, Page, TastyError, User, UserCreate, Validate};
use tracing::{info, warn};

pub async fn create(
    State(state): State<AppState>,
    mut conn: DbConn,
    ApiJson(input): ApiJson<UserCreate>,
) -> ApiResult<Json<User>> {
    input.validate()?;

    if accounts::find_user_by_email(&mut conn, &input.email).await?.is_some() {
        warn!("Registration rejected, email exists: {}", input.email);
        return Err(TastyError::conflict("Email already registered").into());
    }

    let hashed_password = state.auth_service.hash_password(&input.password).await?;
    let user = accounts::create_user(&mut conn, &input.email, &hashed_password).await?;
    info!("User {} registered: {}", user.id, user.email);
    Ok(Json(user))
}

pub async fn list(
    mut conn: DbConn,
    ApiQuery(params): ApiQuery<PageParams>,
) -> ApiResult<Json<Vec<User>>> {
    let page = Page::from_params(params.skip, params.limit, DEFAULT_LIMIT)?;
    Ok(Json(accounts::list_users(&mut conn, page).await?))
}

pub async fn get(mut conn: DbConn, ApiPath(id): ApiPath<i64>) -> ApiResult<Json<User>> {
    Ok(Json(accounts::get_user(&mut conn, id).await?))
}

pub async fn create_item(
    mut conn: DbConn,
    ApiPath(id): ApiPath<i64>,
    ApiJson(input): ApiJson<OwnedItemCreate>,
) -> ApiResult<Json<OwnedItem>> {
    input.validate()?;
    let item = accounts::create_user_item(&mut conn, id, &input).await?;
    info!("Item {} created for user {}", item.id, id);
    Ok(Json(item))
}

pub async fn list_items(
    mut conn: DbConn,
    ApiQuery(params): ApiQuery<PageParams>,
) -> ApiResult<Json<Vec<OwnedItem>>> {
    let page = Page::from_params(params.skip, params.limit, DEFAULT_LIMIT)?;
    Ok(Json(accounts::list_items(&mut conn, page).await?))
}
