//! Route definitions for the UserHub HTTP API.
//!
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor. Routes whose configured role set is non-empty get a
//! role gate as a route layer; the others are public.

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{MethodRouter, delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use userhub_auth::jwt::JwtDecoder;
use userhub_auth::rbac::RoleSet;

use crate::handlers;
use crate::middleware;
use crate::middleware::RoleGate;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_bytes;
    let gates = Arc::clone(&state.gates);
    let decoder = &Arc::clone(&state.jwt_decoder);

    Router::new()
        .route(
            "/register",
            gated(post(handlers::auth::register), &gates.register, decoder),
        )
        .route("/login", post(handlers::auth::login))
        .route(
            "/users",
            gated(get(handlers::account::list_accounts), &gates.list, decoder),
        )
        .route(
            "/users/{id}",
            gated(get(handlers::account::get_account), &gates.list, decoder),
        )
        .route(
            "/update/{id}",
            gated(put(handlers::account::update_account), &gates.update, decoder),
        )
        .route(
            "/delete/{id}",
            gated(
                delete(handlers::account::delete_account),
                &gates.delete,
                decoder,
            ),
        )
        .route("/health", get(handlers::health::health))
        .layer(DefaultBodyLimit::max(max_body))
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(middleware::request_logging))
        .with_state(state)
}

/// Wraps `route` in a role gate unless `roles` is empty.
pub fn gated(
    route: MethodRouter<AppState>,
    roles: &RoleSet,
    decoder: &Arc<JwtDecoder>,
) -> MethodRouter<AppState> {
    if roles.is_public() {
        return route;
    }
    let gate = Arc::new(RoleGate::new(roles.clone(), Arc::clone(decoder)));
    route.route_layer(axum_middleware::from_fn_with_state(
        gate,
        middleware::require_roles,
    ))
}
