//! Static pages

use crate::extractors::{AdminUser, CurrentUser};
use crate::views;
use axum::response::Html;

pub async fn home(CurrentUser(user): CurrentUser) -> Html<String> {
    views::home(user.as_ref())
}

pub async fn connections(AdminUser(admin): AdminUser) -> Html<String> {
    views::connections(&admin)
}
