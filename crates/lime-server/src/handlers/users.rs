//! User management handlers (admin only)

use crate::extractors::{AdminUser, FormFields};
use crate::views;
use crate::AppState;
use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
};
use lime_types::{Role, User};
use tracing::{error, info};

/// Fields of the add and update forms. `origMail` is only sent by update.
#[derive(Debug, Default)]
pub struct UserForm {
    name: String,
    surname: String,
    mail: String,
    password: String,
    role: String,
    orig_mail: String,
}

impl From<FormFields> for UserForm {
    fn from(mut fields: FormFields) -> Self {
        Self {
            name: fields.take("name"),
            surname: fields.take("surname"),
            mail: fields.take("mail"),
            password: fields.take("password"),
            role: fields.take("type"),
            orig_mail: fields.take("origMail"),
        }
    }
}

impl UserForm {
    fn into_user(self) -> User {
        User {
            name: self.name,
            surname: self.surname,
            email: self.mail,
            password: self.password,
            role: Role::from_form(&self.role),
        }
    }
}

#[derive(Debug, Default)]
pub struct DeleteForm {
    mail: String,
}

impl From<FormFields> for DeleteForm {
    fn from(mut fields: FormFields) -> Self {
        Self {
            mail: fields.take("mail"),
        }
    }
}

#[derive(Debug, Default)]
pub struct EditForm {
    orig_mail: String,
}

impl From<FormFields> for EditForm {
    fn from(mut fields: FormFields) -> Self {
        Self {
            orig_mail: fields.take("origMail"),
        }
    }
}

/// Write the roster and send the admin back to the list
async fn save_roster(state: &AppState, users: &[User], admin: &User) -> Response {
    match state.roster.save(users).await {
        Ok(()) => views::found("/users"),
        Err(e) => {
            error!(
                "Failed to save roster to {}: {}",
                state.roster.path().display(),
                e
            );
            views::error_page("Could not save users.", Some(admin)).into_response()
        }
    }
}

pub async fn list(State(state): State<AppState>, AdminUser(admin): AdminUser) -> Html<String> {
    let users = state.roster.load().await;
    views::users(&users, &admin)
}

pub async fn add(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    fields: FormFields,
) -> Response {
    let form = UserForm::from(fields);
    let mut users = state.roster.load().await;
    if users.iter().any(|u| u.email == form.mail) {
        return views::error_page("User already exists.", Some(&admin)).into_response();
    }

    let user = form.into_user();
    info!("{} adding user {} ({})", admin.email, user.email, user.role);
    users.push(user);
    save_roster(&state, &users, &admin).await
}

pub async fn delete(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    fields: FormFields,
) -> Response {
    let form = DeleteForm::from(fields);
    let mut users = state.roster.load().await;
    let before = users.len();
    users.retain(|u| u.email != form.mail);
    info!(
        "{} deleting user {} ({} removed)",
        admin.email,
        form.mail,
        before - users.len()
    );
    save_roster(&state, &users, &admin).await
}

pub async fn edit(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    fields: FormFields,
) -> Html<String> {
    let form = EditForm::from(fields);
    match state.roster.find_by_email(&form.orig_mail).await {
        Some(target) => views::edit_user(&target, &admin),
        None => views::error_page("User not found.", Some(&admin)),
    }
}

/// Replace the record matched by `origMail` with the submitted fields.
///
/// The new email is not checked against the rest of the roster.
pub async fn update(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    fields: FormFields,
) -> Response {
    let form = UserForm::from(fields);
    let mut users = state.roster.load().await;
    let Some(idx) = users.iter().position(|u| u.email == form.orig_mail) else {
        return views::error_page("User not found.", Some(&admin)).into_response();
    };

    info!("{} updating user {}", admin.email, form.orig_mail);
    users[idx] = form.into_user();
    save_roster(&state, &users, &admin).await
}
