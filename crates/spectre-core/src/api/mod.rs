//! Ghost admin API (v0.1) client: configuration, token endpoints, users,
//! posts and settings.

mod client;
mod error;
pub mod types;

pub use client::{ApiResponse, GhostApi};
pub use error::ApiError;
