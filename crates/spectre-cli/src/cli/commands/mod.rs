//! CLI command handlers. Each command group is in its own file.

mod auth;
mod info;
mod posts;
mod resolve;

pub use auth::{run_login, run_logout};
pub use info::{run_about, run_configuration, run_settings, run_whoami};
pub use posts::run_posts;
pub use resolve::run_resolve;

use anyhow::{Context, Result};
use spectre_core::api::ApiError;

/// Runs a blocking API call on the blocking pool.
async fn blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    let value = tokio::task::spawn_blocking(f)
        .await
        .context("API task join")??;
    Ok(value)
}
