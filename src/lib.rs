//! Web front-end that turns TikTok, Instagram, Douyin, Facebook, TeraBox and
//! YouTube links into direct download links by delegating to third-party
//! downloader APIs.

pub mod client;
pub mod config;
pub mod error;
pub mod media;
pub mod platform;
pub mod providers;
pub mod render;
pub mod routes;
pub mod server;

pub use config::{AppConfig, CorsConfig};
pub use server::{AppState, build_router, run};
