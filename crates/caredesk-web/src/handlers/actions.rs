//! Mutation handlers
//!
//! Destructive actions are confirm-gated: the first post renders a
//! confirmation page, and only a re-post carrying `confirmed=true` issues
//! the remote write. A declined confirmation never reaches the backend.
//! Failures redirect back with an error banner and never roll back prior
//! writes; the partial state of a failed two-step transition is surfaced
//! verbatim.

use crate::handlers::pages::palette_for;
use crate::layout;
use crate::session::{self, AdminSession};
use crate::state::AppState;
use crate::theme::{self, ThemePreference};
use axum::{
    Form,
    extract::{Query, State},
    http::{HeaderMap, header},
    response::{Html, IntoResponse, Redirect, Response},
};
use caredesk_core::Error;
use caredesk_core::types::Subscription;
use caredesk_remote::{
    Query as RemoteQuery, cancel_subscription, cancel_subscription_payment,
    verify_subscription_payment,
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Login form fields
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    /// Admin email
    pub email: String,
    /// Admin password
    pub password: String,
}

/// Explicit confirmation carried by destructive posts
#[derive(Debug, Default, Deserialize)]
pub struct ConfirmForm {
    /// True only when the operator confirmed the action
    #[serde(default)]
    pub confirmed: bool,
}

/// Single-record action parameters
#[derive(Debug, Deserialize)]
pub struct IdParams {
    /// Target record id
    pub id: Uuid,
}

/// Two-step transition parameters
#[derive(Debug, Deserialize)]
pub struct PaymentParams {
    /// The subscription payment
    pub id: Uuid,
    /// Its linked subscription
    pub subscription_id: Uuid,
}

fn redirect_with(path: &str, kind: &str, message: &str) -> Redirect {
    Redirect::to(&format!("{path}?{kind}={}", urlencoding::encode(message)))
}

fn none_if_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Sign in against the hosted auth service
pub async fn sign_in(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Response {
    let palette = palette_for(&headers);

    match state.auth.sign_in(&form.email, &form.password).await {
        Ok(auth_session) => {
            info!(email = %auth_session.email, "admin signed in");
            let id = state.sessions.create(AdminSession {
                access_token: auth_session.access_token,
                user_id: auth_session.user_id,
                email: auth_session.email,
                created_at: Utc::now(),
            });
            let cookie = session::session_cookie(&state.config.auth, &id);
            ([(header::SET_COOKIE, cookie)], Redirect::to("/dashboard")).into_response()
        }
        Err(Error::Authentication(message)) => {
            warn!(email = %form.email, "sign-in rejected: {message}");
            Html(layout::login_page(palette, Some(&message))).into_response()
        }
        Err(e) => {
            error!("sign-in failed: {e}");
            Html(layout::login_page(palette, Some("Failed to sign in"))).into_response()
        }
    }
}

/// Sign out: revoke the backend token, drop the session, clear the cookie
pub async fn sign_out(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if let Some(id) = session::cookie_from_headers(&headers, &state.config.auth.cookie_name) {
        if let Some(admin) = state.sessions.get(&id) {
            if let Err(e) = state.auth.sign_out(&admin.access_token).await {
                error!("token revocation failed: {e}");
            }
            info!(email = %admin.email, "admin signed out");
        }
        state.sessions.remove(&id);
    }

    let cookie = session::clear_session_cookie(&state.config.auth);
    ([(header::SET_COOKIE, cookie)], Redirect::to("/login")).into_response()
}

/// Confirm-gated delete against one collection
async fn delete_record(
    state: &AppState,
    headers: &HeaderMap,
    confirmed: bool,
    collection: &'static str,
    id: Uuid,
    prompt: &str,
    action_base: &str,
    back: &'static str,
    entity: &'static str,
) -> Response {
    if !confirmed {
        let palette = palette_for(headers);
        return Html(layout::confirm_page(
            palette,
            prompt,
            &format!("{action_base}?id={id}"),
            back,
        ))
        .into_response();
    }

    match state
        .remote
        .delete(&RemoteQuery::new(collection).eq("id", id))
        .await
    {
        Ok(()) => {
            info!(collection, id = %id, "record deleted");
            redirect_with(back, "notice", &format!("{entity} deleted successfully")).into_response()
        }
        Err(e) => {
            error!("Failed to delete from {collection}: {e}");
            redirect_with(back, "error", &format!("Failed to delete {entity}")).into_response()
        }
    }
}

/// Delete a user account
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<IdParams>,
    Form(form): Form<ConfirmForm>,
) -> Response {
    delete_record(
        &state,
        &headers,
        form.confirmed,
        "users",
        params.id,
        "Are you sure you want to delete this user?",
        "/dashboard/users/delete",
        "/dashboard/users",
        "User",
    )
    .await
}

/// Delete a doctor profile
pub async fn delete_doctor(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<IdParams>,
    Form(form): Form<ConfirmForm>,
) -> Response {
    delete_record(
        &state,
        &headers,
        form.confirmed,
        "doctors",
        params.id,
        "Are you sure you want to delete this doctor profile?",
        "/dashboard/doctors/delete",
        "/dashboard/doctors",
        "Doctor profile",
    )
    .await
}

/// Delete a rating
pub async fn delete_rating(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<IdParams>,
    Form(form): Form<ConfirmForm>,
) -> Response {
    delete_record(
        &state,
        &headers,
        form.confirmed,
        "ratings",
        params.id,
        "Are you sure you want to delete this rating?",
        "/dashboard/ratings/delete",
        "/dashboard/ratings",
        "Rating",
    )
    .await
}

/// Delete a notification
pub async fn delete_notification(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<IdParams>,
    Form(form): Form<ConfirmForm>,
) -> Response {
    delete_record(
        &state,
        &headers,
        form.confirmed,
        "notifications",
        params.id,
        "Are you sure you want to delete this notification?",
        "/dashboard/notifications/delete",
        "/dashboard/notifications",
        "Notification",
    )
    .await
}

/// Mark a notification as read
pub async fn mark_notification_read(
    State(state): State<Arc<AppState>>,
    Query(params): Query<IdParams>,
) -> Response {
    match state
        .remote
        .update(
            &RemoteQuery::new("notifications").eq("id", params.id),
            &json!({ "read": true }),
        )
        .await
    {
        Ok(()) => Redirect::to("/dashboard/notifications").into_response(),
        Err(e) => {
            error!("Failed to mark notification read: {e}");
            redirect_with(
                "/dashboard/notifications",
                "error",
                "Failed to mark notification read",
            )
            .into_response()
        }
    }
}

/// Doctor profile form fields
#[derive(Debug, Deserialize)]
pub struct ProfileForm {
    /// Owning user, present on creation
    pub user_id: Option<Uuid>,
    /// Existing profile id, present on update
    pub id: Option<Uuid>,
    /// Medical council registration number
    pub registration_number: String,
    /// Medical specialization
    pub specialization: String,
    /// Qualification summary
    pub qualification: Option<String>,
    /// Per-consultation fee
    pub consultation_fee: String,
    /// Free-form biography
    pub bio: Option<String>,
}

/// Create a doctor profile for a profile-less doctor-role user
pub async fn create_profile(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ProfileForm>,
) -> Response {
    let Some(user_id) = form.user_id else {
        return redirect_with("/dashboard/doctors", "error", "Missing user for profile")
            .into_response();
    };
    let Ok(fee) = form.consultation_fee.parse::<Decimal>() else {
        return redirect_with("/dashboard/doctors", "error", "Invalid consultation fee")
            .into_response();
    };

    let record = json!({
        "user_id": user_id,
        "registration_number": form.registration_number,
        "specialization": form.specialization,
        "qualification": none_if_empty(form.qualification),
        "consultation_fee": fee,
        "bio": none_if_empty(form.bio),
    });

    match state.remote.insert("doctors", &record).await {
        Ok(()) => {
            info!(user_id = %user_id, "doctor profile created");
            redirect_with("/dashboard/doctors", "notice", "Doctor profile created").into_response()
        }
        Err(e) => {
            error!("Failed to create doctor profile: {e}");
            redirect_with("/dashboard/doctors", "error", "Failed to create doctor profile")
                .into_response()
        }
    }
}

/// Update an existing doctor profile
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ProfileForm>,
) -> Response {
    let Some(id) = form.id else {
        return redirect_with("/dashboard/doctors", "error", "Missing profile id").into_response();
    };
    let Ok(fee) = form.consultation_fee.parse::<Decimal>() else {
        return redirect_with("/dashboard/doctors", "error", "Invalid consultation fee")
            .into_response();
    };

    let patch = json!({
        "registration_number": form.registration_number,
        "specialization": form.specialization,
        "qualification": none_if_empty(form.qualification),
        "consultation_fee": fee,
        "bio": none_if_empty(form.bio),
    });

    match state
        .remote
        .update(&RemoteQuery::new("doctors").eq("id", id), &patch)
        .await
    {
        Ok(()) => {
            info!(id = %id, "doctor profile updated");
            redirect_with("/dashboard/doctors", "notice", "Doctor profile updated").into_response()
        }
        Err(e) => {
            error!("Failed to update doctor profile: {e}");
            redirect_with("/dashboard/doctors", "error", "Failed to update doctor profile")
                .into_response()
        }
    }
}

/// Verify a subscription payment: payment completed, then subscription active
pub async fn verify_payment(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<PaymentParams>,
    Form(form): Form<ConfirmForm>,
) -> Response {
    if !form.confirmed {
        let palette = palette_for(&headers);
        return Html(layout::confirm_page(
            palette,
            "Verify this payment and activate its subscription?",
            &format!(
                "/dashboard/subscription-payments/verify?id={}&subscription_id={}",
                params.id, params.subscription_id
            ),
            "/dashboard/subscription-payments",
        ))
        .into_response();
    }

    match verify_subscription_payment(&state.remote, params.id, params.subscription_id).await {
        Ok(()) => redirect_with(
            "/dashboard/subscription-payments",
            "notice",
            "Payment verified and subscription activated",
        )
        .into_response(),
        Err(e @ Error::PartialTransition { .. }) => {
            // The inconsistent state is reported verbatim, never hidden
            redirect_with("/dashboard/subscription-payments", "error", &e.to_string())
                .into_response()
        }
        Err(e) => {
            error!("Failed to verify payment {}: {e}", params.id);
            redirect_with(
                "/dashboard/subscription-payments",
                "error",
                "Failed to verify payment",
            )
            .into_response()
        }
    }
}

/// Cancel a subscription payment: payment failed, then subscription cancelled
pub async fn cancel_payment(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<PaymentParams>,
    Form(form): Form<ConfirmForm>,
) -> Response {
    if !form.confirmed {
        let palette = palette_for(&headers);
        return Html(layout::confirm_page(
            palette,
            "Cancel this payment and its subscription?",
            &format!(
                "/dashboard/subscription-payments/cancel?id={}&subscription_id={}",
                params.id, params.subscription_id
            ),
            "/dashboard/subscription-payments",
        ))
        .into_response();
    }

    match cancel_subscription_payment(&state.remote, params.id, params.subscription_id).await {
        Ok(()) => redirect_with(
            "/dashboard/subscription-payments",
            "notice",
            "Payment and subscription cancelled",
        )
        .into_response(),
        Err(e @ Error::PartialTransition { .. }) => {
            redirect_with("/dashboard/subscription-payments", "error", &e.to_string())
                .into_response()
        }
        Err(e) => {
            error!("Failed to cancel payment {}: {e}", params.id);
            redirect_with(
                "/dashboard/subscription-payments",
                "error",
                "Failed to cancel payment",
            )
            .into_response()
        }
    }
}

/// Cancel a subscription; already-cancelled subscriptions are a no-op
pub async fn cancel_subscription_action(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<IdParams>,
    Form(form): Form<ConfirmForm>,
) -> Response {
    if !form.confirmed {
        let palette = palette_for(&headers);
        return Html(layout::confirm_page(
            palette,
            "Cancel this subscription?",
            &format!("/dashboard/subscriptions/cancel?id={}", params.id),
            "/dashboard/subscriptions",
        ))
        .into_response();
    }

    let query = RemoteQuery::new("subscriptions").eq("id", params.id);
    let subscription = match state.remote.fetch::<Subscription>(&query).await {
        Ok(mut rows) if !rows.is_empty() => rows.remove(0),
        Ok(_) => {
            return redirect_with("/dashboard/subscriptions", "error", "Subscription not found")
                .into_response();
        }
        Err(e) => {
            error!("Failed to load subscription {}: {e}", params.id);
            return redirect_with(
                "/dashboard/subscriptions",
                "error",
                "Failed to load subscription",
            )
            .into_response();
        }
    };

    match cancel_subscription(&state.remote, &subscription).await {
        Ok(true) => redirect_with(
            "/dashboard/subscriptions",
            "notice",
            "Subscription cancelled",
        )
        .into_response(),
        Ok(false) => redirect_with(
            "/dashboard/subscriptions",
            "notice",
            "Subscription is already cancelled",
        )
        .into_response(),
        Err(e) => {
            error!("Failed to cancel subscription {}: {e}", params.id);
            redirect_with(
                "/dashboard/subscriptions",
                "error",
                "Failed to cancel subscription",
            )
            .into_response()
        }
    }
}

/// Toggle the persisted theme preference
pub async fn toggle_theme(headers: HeaderMap) -> Response {
    let current = ThemePreference::from_cookie(
        session::cookie_from_headers(&headers, theme::THEME_COOKIE).as_deref(),
    );
    let next = current.toggled();

    let cookie = format!(
        "{}={}; Path=/; SameSite=Lax; Max-Age=31536000",
        theme::THEME_COOKIE,
        next.as_str()
    );
    (
        [(header::SET_COOKIE, cookie)],
        Redirect::to("/dashboard/settings"),
    )
        .into_response()
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn confirm_form(body: &str) -> ConfirmForm {
        // Form bodies are urlencoded key/value pairs; reuse serde_json via
        // an intermediate map for the simple flat forms used here.
        let map: serde_json::Map<String, serde_json::Value> = body
            .split('&')
            .filter(|pair| !pair.is_empty())
            .filter_map(|pair| {
                let (key, value) = pair.split_once('=')?;
                let parsed = match value {
                    "true" => serde_json::Value::Bool(true),
                    "false" => serde_json::Value::Bool(false),
                    other => serde_json::Value::String(other.to_string()),
                };
                Some((key.to_string(), parsed))
            })
            .collect();
        serde_json::from_value(serde_json::Value::Object(map)).unwrap()
    }

    #[test]
    fn test_confirm_form_defaults_to_declined() {
        assert!(!confirm_form("").confirmed);
        assert!(confirm_form("confirmed=true").confirmed);
        assert!(!confirm_form("confirmed=false").confirmed);
    }

    #[test]
    fn test_redirect_with_encodes_message() {
        let redirect = redirect_with("/dashboard/users", "error", "Failed to delete user");
        let response = redirect.into_response();
        let location = response.headers().get("location").unwrap().to_str().unwrap();

        assert_eq!(location, "/dashboard/users?error=Failed%20to%20delete%20user");
    }

    #[test]
    fn test_none_if_empty() {
        assert_eq!(none_if_empty(None), None);
        assert_eq!(none_if_empty(Some(String::new())), None);
        assert_eq!(none_if_empty(Some("  ".to_string())), None);
        assert_eq!(
            none_if_empty(Some("MBBS".to_string())),
            Some("MBBS".to_string())
        );
    }
}
