//! Sign-up and session handlers

use crate::error::ApiResult;
use crate::extractors::session::SESSION_COOKIE;
use crate::extractors::{ApiForm, SessionUser};
use crate::storage::memory::Member;
use crate::AppState;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use tasty_core::{MessageResponse, SessionIdentity, SignupForm, TastyError};
use tracing::{info, warn};

pub async fn signup(
    State(state): State<AppState>,
    ApiForm(form): ApiForm<SignupForm>,
) -> ApiResult<impl IntoResponse> {
    info!("Sign-up attempt for: {}", form.username);

    if state.members.contains(&form.username) {
        warn!("Sign-up rejected, user exists: {}", form.username);
        return Err(TastyError::conflict("User already exists").into());
    }

    let hashed_password = state.auth_service.hash_password(&form.password).await?;
    state.members.insert_new(Member {
        username: form.username.clone(),
        hashed_password,
    })?;

    let token = state.auth_service.issue_session(&form.username)?;
    let cookie = format!(
        "{}={}; HttpOnly; Max-Age={}; Path=/",
        SESSION_COOKIE,
        token,
        state.auth_service.session_ttl_secs()
    );

    info!("Sign-up successful for: {}", form.username);
    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(MessageResponse::new(format!("{}, sign-up complete.", form.username))),
    ))
}

pub async fn me(user: SessionUser) -> Json<SessionIdentity> {
    Json(SessionIdentity {
        username: user.username,
    })
}
