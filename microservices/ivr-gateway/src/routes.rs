//! Router configuration for the IVR Gateway

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::{self, Next},
    response::Response,
    routing::{any, get, post},
    Router,
};

use crate::handlers;
use crate::AppState;

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Outbound call trigger
        .route("/trigger-call", post(handlers::trigger_call))
        // IVR call flow
        .nest("/ivr", ivr_router())
        // Health
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .layer(middleware::from_fn(tunnel_compat_header))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

fn ivr_router() -> Router<AppState> {
    Router::new()
        .route("/welcome", any(handlers::ivr_welcome))
        .route("/language-handler", post(handlers::ivr_language_handler))
        .route("/menu-english", any(handlers::ivr_menu_english))
        .route("/menu-spanish", any(handlers::ivr_menu_spanish))
        .route("/english-handler", post(handlers::ivr_english_handler))
        .route("/spanish-handler", post(handlers::ivr_spanish_handler))
        .route("/hangup", any(handlers::ivr_hangup))
}

/// Tunnel-compatibility header applied to every response
async fn tunnel_compat_header(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    response
        .headers_mut()
        .insert("ngrok-skip-browser-warning", HeaderValue::from_static("true"));
    response
}

/// Per-request logging: method, path, response status
async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    tracing::info!(%method, %path, status = %response.status(), "request");
    response
}
