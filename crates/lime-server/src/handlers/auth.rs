//! Login and logout

use crate::extractors::auth::SESSION_COOKIE;
use crate::extractors::{session_token, CurrentUser, FormFields};
use crate::views;
use crate::AppState;
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};

#[derive(Debug, Default)]
pub struct LoginForm {
    mail: String,
    password: String,
}

impl From<FormFields> for LoginForm {
    fn from(mut fields: FormFields) -> Self {
        Self {
            mail: fields.take("mail"),
            password: fields.take("password"),
        }
    }
}

pub async fn login_form(CurrentUser(user): CurrentUser) -> Html<String> {
    views::login(None, user.as_ref())
}

pub async fn login(State(state): State<AppState>, fields: FormFields) -> Response {
    let form = LoginForm::from(fields);
    match state.auth_service.login(&form.mail, &form.password).await {
        Some(token) => (
            StatusCode::FOUND,
            [
                (
                    header::SET_COOKIE,
                    format!("{}={}; HttpOnly", SESSION_COOKIE, token),
                ),
                (header::LOCATION, "/".to_string()),
            ],
        )
            .into_response(),
        None => views::login(Some("Invalid credentials"), None).into_response(),
    }
}

pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = session_token(&headers) {
        state.auth_service.logout(&token);
    }

    (
        StatusCode::FOUND,
        [
            (header::SET_COOKIE, format!("{}=; Max-Age=0", SESSION_COOKIE)),
            (header::LOCATION, "/".to_string()),
        ],
    )
        .into_response()
}
