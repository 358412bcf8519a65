//! Auth extractors for console routes

use crate::services::require_admin;
use crate::AppState;
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
    response::{IntoResponse, Response},
};
use lime_types::User;
use std::convert::Infallible;

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "session";

/// Read the session token from the request cookies
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

/// The signed-in user, if any
#[derive(Clone, Debug)]
pub struct CurrentUser(pub Option<User>);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers);
        Ok(CurrentUser(
            state.auth_service.current_user(token.as_deref()).await,
        ))
    }
}

/// A signed-in admin. Anyone else is sent to the login page.
#[derive(Clone, Debug)]
pub struct AdminUser(pub User);

/// Rejection for [`AdminUser`]: a bare 302 to `/login`
pub struct AdminRedirect;

impl IntoResponse for AdminRedirect {
    fn into_response(self) -> Response {
        crate::views::found("/login")
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AdminRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = match CurrentUser::from_request_parts(parts, state).await {
            Ok(user) => user,
            Err(never) => match never {},
        };

        match user {
            Some(user) if require_admin(Some(&user)) => Ok(AdminUser(user)),
            _ => {
                tracing::debug!("Non-admin access to {}, redirecting", parts.uri.path());
                Err(AdminRedirect)
            }
        }
    }
}
