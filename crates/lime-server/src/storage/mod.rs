//! Storage layer
//!
//! The roster is a flat JSON file; sessions live in a DashMap and die with
//! the process.

pub mod roster;
pub mod sessions;

pub use roster::RosterStore;
pub use sessions::SessionTable;
