//! Banner Service - feature/tag banner delivery with an in-memory TTL cache
//!
//! User lookups are answered from a short-lived cache in front of the banner
//! store; admin management always goes straight to the store.

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use service::{AccountService, BannerService};
pub use tasks::{spawn_cleanup_task, SweepHandle};
