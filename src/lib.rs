pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    http::HeaderValue,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::database::store::TodoStore;

/// Shared per-process state: immutable config plus the persistence gateway.
/// Cheap to clone; axum hands a copy to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<TodoStore>,
}

/// Build the full router: public routes, the token-gated /secure subtree,
/// and the global CORS + trace layers.
pub fn app(state: AppState) -> Router {
    let protected = Router::new()
        .route("/secure/todos", get(handlers::todos::list_secure))
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware::jwt_auth_middleware,
        ));

    Router::new()
        // Public
        .route("/health", get(handlers::health::health))
        .route(
            "/todos",
            get(handlers::todos::list).post(handlers::todos::create),
        )
        .route("/auth/token", post(handlers::token::issue))
        // Protected
        .merge(protected)
        // Global middleware
        .layer(cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Fixed allow-list of local development origins; any header, any method.
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
