//! API Routes
//!
//! Configures the Axum router with all banner service endpoints.

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_banner_handler, delete_banner_handler, health_handler, list_banners_handler,
    login_handler, register_handler, stats_handler, update_banner_handler, user_banner_handler,
    AppState,
};
use super::middleware::require_admin;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /register` - Create an account
/// - `POST /login` - Exchange credentials for a token cookie
/// - `GET /user_banner` - Banner for a tag and feature (any valid token)
/// - `GET /banner` - Filtered banner list (admin)
/// - `POST /banner` - Create a banner (admin)
/// - `PUT /banner/:id` - Update a banner (admin)
/// - `DELETE /banner/:id` - Delete a banner (admin)
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let admin = Router::new()
        .route(
            "/banner",
            get(list_banners_handler).post(create_banner_handler),
        )
        .route(
            "/banner/:id",
            put(update_banner_handler).delete(delete_banner_handler),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .route("/user_banner", get(user_banner_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .merge(admin)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
