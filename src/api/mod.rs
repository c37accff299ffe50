//! API Module
//!
//! HTTP handlers, the admin guard and routing for the banner service.
//!
//! # Endpoints
//! - `POST /register` - Create an account
//! - `POST /login` - Log in and receive the token cookie
//! - `GET /user_banner` - Resolve the banner for a tag and feature
//! - `GET|POST /banner` - List or create banners (admin)
//! - `PUT|DELETE /banner/:id` - Update or delete a banner (admin)
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
