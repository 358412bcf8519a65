//! Business logic services

pub mod auth;

pub use auth::{require_admin, AuthService};
