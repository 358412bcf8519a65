//! Lime Types - Pure type definitions shared by the console
//!
//! This crate contains only plain data types with no runtime dependencies.

pub mod user;

pub use user::*;
