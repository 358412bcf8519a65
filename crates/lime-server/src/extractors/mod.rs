//! Request extractors

pub mod auth;
pub mod form;

pub use auth::{session_token, AdminUser, CurrentUser};
pub use form::FormFields;
