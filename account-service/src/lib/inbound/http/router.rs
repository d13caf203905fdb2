use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::InvalidHeaderValue;
use axum::http::HeaderValue;
use axum::http::Method;
use axum::http::Request;
use axum::http::Response;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::delete_user::delete_user;
use super::handlers::find_user_by_email::find_user_by_email;
use super::handlers::get_user::get_user;
use super::handlers::list_users::list_users;
use super::handlers::login::login;
use super::handlers::register_user::register_user;
use super::handlers::update_user::update_user;
use crate::config::CorsConfig;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
}

/// Build the CORS layer for the configured browser origin.
///
/// Without an origin every origin is allowed.
pub fn cors_layer(config: &CorsConfig) -> Result<CorsLayer, InvalidHeaderValue> {
    let Some(origin) = config.origin.as_deref() else {
        return Ok(CorsLayer::permissive());
    };

    Ok(CorsLayer::new()
        .allow_origin(origin.parse::<HeaderValue>()?)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any))
}

pub fn create_router(user_service: Arc<dyn UserServicePort>, cors: CorsLayer) -> Router {
    let state = AppState { user_service };

    let user_routes = Router::new()
        .route("/api/users", post(register_user).get(list_users))
        .route("/api/users/byemail", post(find_user_by_email))
        .route(
            "/api/users/:user_id",
            get(get_user).put(update_user).delete(delete_user),
        );

    let auth_routes = Router::new().route("/api/auth/login", post(login));

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
        .merge(auth_routes)
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
