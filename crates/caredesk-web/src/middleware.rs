//! Session guard middleware
//!
//! Gates every dashboard route behind a signed-in admin session. A missing,
//! unknown, or expired session cookie all behave identically: redirect to
//! the login form. Valid sessions are inserted into request extensions for
//! handlers to use.

use crate::{session, state::AppState};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tracing::debug;

/// Paths reachable without a session
const EXEMPT_PREFIXES: &[&str] = &["/login", "/health", "/assets"];

/// Whether a request path bypasses the session guard
#[must_use]
pub fn is_exempt(path: &str) -> bool {
    EXEMPT_PREFIXES
        .iter()
        .any(|prefix| path == *prefix || path.starts_with(&format!("{prefix}/")))
}

/// Session guard: authenticated requests pass, everything else redirects
pub async fn session_guard(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path();
    if is_exempt(path) {
        return next.run(request).await;
    }

    let session = session::cookie_from_headers(request.headers(), &state.config.auth.cookie_name)
        .and_then(|id| state.sessions.get(&id));

    let Some(session) = session else {
        debug!(path = %path, "unauthenticated request, redirecting to login");
        return Redirect::to("/login").into_response();
    };

    request.extensions_mut().insert(session);
    next.run(request).await
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use crate::session::AdminSession;
    use axum::http::HeaderValue;
    use axum::{Router, body::Body, http::StatusCode, middleware::from_fn_with_state, routing::get};
    use caredesk_core::Config;
    use tower::ServiceExt;

    fn test_app() -> (Router, Arc<AppState>) {
        let state = Arc::new(AppState::new(Config::default()).unwrap());
        let app = Router::new()
            .route("/login", get(|| async { "login" }))
            .route("/dashboard", get(|| async { "dashboard" }))
            .layer(from_fn_with_state(Arc::clone(&state), session_guard));
        (app, state)
    }

    #[test]
    fn test_exempt_paths() {
        assert!(is_exempt("/login"));
        assert!(is_exempt("/health"));
        assert!(is_exempt("/assets/app.css"));
        assert!(!is_exempt("/dashboard"));
        assert!(!is_exempt("/dashboard/users"));
        assert!(!is_exempt("/loginish"));
    }

    #[tokio::test]
    async fn test_missing_cookie_redirects_to_login() {
        let (app, _state) = test_app();

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/dashboard")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get("location").unwrap(),
            &HeaderValue::from_static("/login")
        );
    }

    #[tokio::test]
    async fn test_unknown_session_redirects_to_login() {
        let (app, _state) = test_app();

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/dashboard")
                    .header("Cookie", "caredesk_session=not-a-session")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn test_valid_session_passes() {
        let (app, state) = test_app();

        let id = state.sessions.create(AdminSession {
            access_token: "jwt".to_string(),
            user_id: "u-1".to_string(),
            email: "admin@example.com".to_string(),
            created_at: chrono::Utc::now(),
        });

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/dashboard")
                    .header("Cookie", format!("caredesk_session={id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_expired_session_redirects_to_login() {
        let (app, state) = test_app();

        let id = state.sessions.create(AdminSession {
            access_token: "jwt".to_string(),
            user_id: "u-1".to_string(),
            email: "admin@example.com".to_string(),
            created_at: chrono::Utc::now() - chrono::Duration::days(2),
        });

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/dashboard")
                    .header("Cookie", format!("caredesk_session={id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn test_login_is_reachable_without_session() {
        let (app, _state) = test_app();

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/login")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
