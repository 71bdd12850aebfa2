use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::validate_token::validate_token;
use crate::domain::user::service::AuthService;
use crate::outbound::store::InMemoryUserStore;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService<InMemoryUserStore>>,
}

pub fn create_router(auth_service: Arc<AuthService<InMemoryUserStore>>) -> Router {
    let state = AppState { auth_service };

    let auth_routes = Router::new()
        .route("/api/Auth/Register", post(register))
        .route("/api/Auth/Login", post(login))
        .route("/api/Auth/ValidateToken", get(validate_token));

    // The span records no header values; Authorization carries credentials
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
        .merge(auth_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
