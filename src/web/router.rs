//! Router configuration for the Web API.

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    create_user, delete_mail, ensure_user, get_by_address, get_mail, list_mail, list_users,
    mark_read, me, restore_mail, save_draft, send_mail, AppState,
};
use super::middleware::{create_cors_layer, jwt_auth, JwtState};

/// Create the main API router.
pub fn create_router(
    app_state: Arc<AppState>,
    jwt_state: Arc<JwtState>,
    cors_origins: &[String],
) -> Router {
    let mail_routes = Router::new()
        .route("/", get(list_mail).post(send_mail))
        .route("/draft", put(save_draft))
        .route("/:id", get(get_mail).delete(delete_mail))
        .route("/:id/restore", post(restore_mail))
        .route("/:id/read", post(mark_read));

    let user_routes = Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/ensure", post(ensure_user))
        .route("/me", get(me))
        .route("/:username/:domain", get(get_by_address));

    let api_routes = Router::new()
        .nest("/mail", mail_routes)
        .nest("/users", user_routes);

    // Clone jwt_state for the middleware closure
    let jwt_state_for_middleware = jwt_state.clone();

    Router::new()
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn(move |req, next| {
                    let state = jwt_state_for_middleware.clone();
                    jwt_auth(state, req, next)
                })),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
