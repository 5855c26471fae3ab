//! Web server setup and configuration

use crate::{middleware::session_guard, routes::build_routes, state::AppState};
use axum::Router;
use caredesk_core::{Config, Result};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the complete web application with all routes, state, and the
/// session guard
///
/// # Errors
///
/// Returns an error if the backend HTTP client cannot be built.
pub fn build_app(config: Config) -> Result<Router> {
    let state = Arc::new(AppState::new(config)?);

    Ok(build_routes()
        .layer(axum::middleware::from_fn_with_state(
            Arc::clone(&state),
            session_guard,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}
