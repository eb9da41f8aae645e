use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::block_session::block_session;
use super::handlers::create_user::create_user;
use super::handlers::login_user::login_user;
use super::handlers::renew_access_token::renew_access_token;
use super::handlers::update_user::update_user;
use crate::app::AppState;

/// Builds the REST surface. Protected handlers take an
/// `AuthenticatedUser`, so there is no separate auth middleware.
pub fn create_router(state: AppState) -> Router {
    let user_routes = Router::new()
        .route("/api/users", post(create_user))
        .route("/api/users/login", post(login_user))
        .route("/api/users/:username", patch(update_user));

    let session_routes = Router::new()
        .route("/api/tokens/renew_access", post(renew_access_token))
        .route("/api/sessions/:session_id/block", post(block_session));

    // Headers stay out of the span; they carry bearer tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(user_routes)
        .merge(session_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
