pub mod config;
pub mod logging;

pub mod api;
pub mod blog_url;
pub mod http;
