//! Session cookie extractor

use crate::error::ApiError;
use crate::extractors::cookies::read_cookie;
use crate::AppState;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tasty_core::TastyError;
use tracing::warn;

pub const SESSION_COOKIE: &str = "sessionid";

/// Username behind a valid `sessionid` cookie
#[derive(Clone, Debug)]
pub struct SessionUser {
    pub username: String,
}

#[async_trait]
impl FromRequestParts<AppState> for SessionUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = read_cookie(&parts.headers, SESSION_COOKIE)
            .ok_or_else(|| TastyError::Unauthorized("Not signed in".to_string()))?;

        let username = state.auth_service.validate_session(&token).map_err(|e| {
            warn!("Rejected session cookie: {}", e);
            e
        })?;

        // Token outlived its account (e.g. after a restart)
        if !state.members.contains(&username) {
            return Err(TastyError::Unauthorized("Unknown user".to_string()).into());
        }

        Ok(Self { username })
    }
}
