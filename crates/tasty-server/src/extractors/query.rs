//! Path, query and body extractors that answer with the API error body

use crate::error::ApiError;
use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
    Form, Json,
};
use serde::de::DeserializeOwned;
use tasty_core::pagination::{CommonParams, DEFAULT_LIMIT};
use tasty_core::{CommonQuery, TastyError};

/// `Query<T>` whose parse failures become a 422 `{"detail": ...}`
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(TastyError::validation(rejection.body_text()).into()),
        }
    }
}

/// `Path<T>` whose parse failures become a 422 `{"detail": ...}`
pub struct ApiPath<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => Err(TastyError::validation(rejection.body_text()).into()),
        }
    }
}

/// Shared `q` / `skip` / `limit` list parameters
pub struct CommonList(pub CommonQuery);

#[async_trait]
impl<S> FromRequestParts<S> for CommonList
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let ApiQuery(params) = ApiQuery::<CommonParams>::from_request_parts(parts, state).await?;
        Ok(Self(CommonQuery::from_params(params, DEFAULT_LIMIT)?))
    }
}

/// `Json<T>` whose rejections become a 422 `{"detail": ...}`
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(TastyError::validation(rejection.body_text()).into()),
        }
    }
}

/// Url-encoded form body, rejected the same way as [`ApiJson`]
pub struct ApiForm<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Form::<T>::from_request(req, state).await {
            Ok(Form(value)) => Ok(Self(value)),
            Err(rejection) => Err(TastyError::validation(rejection.body_text()).into()),
        }
    }
}
