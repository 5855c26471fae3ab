//! Route definitions for the admin dashboard

use crate::{
    handlers::{actions, pages},
    state::AppState,
};
use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};
use std::sync::Arc;

/// Build the complete dashboard router
pub fn build_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Entry points
        .route("/", get(|| async { Redirect::to("/dashboard") }))
        .route("/login", get(pages::login_form).post(actions::sign_in))
        .route("/logout", post(actions::sign_out))
        .route("/health", get(pages::health_check))
        // Overview
        .route("/dashboard", get(pages::dashboard))
        // Users
        .route("/dashboard/users", get(pages::users))
        .route("/dashboard/users/view", get(pages::user_detail))
        .route("/dashboard/users/delete", post(actions::delete_user))
        // Doctors
        .route("/dashboard/doctors", get(pages::doctors))
        .route("/dashboard/doctors/view", get(pages::doctor_detail))
        .route("/dashboard/doctors/new-profile", get(pages::new_profile_form))
        .route("/dashboard/doctors/edit-profile", get(pages::edit_profile_form))
        .route("/dashboard/doctors/create-profile", post(actions::create_profile))
        .route("/dashboard/doctors/update-profile", post(actions::update_profile))
        .route("/dashboard/doctors/delete", post(actions::delete_doctor))
        // Consultations
        .route("/dashboard/consultations", get(pages::consultations))
        // Payments
        .route("/dashboard/payments", get(pages::payments))
        .route("/dashboard/consultation-payments", get(pages::consultation_payments))
        .route("/dashboard/subscription-payments", get(pages::subscription_payments))
        .route(
            "/dashboard/subscription-payments/verify",
            post(actions::verify_payment),
        )
        .route(
            "/dashboard/subscription-payments/cancel",
            post(actions::cancel_payment),
        )
        // Subscriptions
        .route("/dashboard/subscriptions", get(pages::subscriptions))
        .route(
            "/dashboard/subscriptions/cancel",
            post(actions::cancel_subscription_action),
        )
        // Ratings
        .route("/dashboard/ratings", get(pages::ratings))
        .route("/dashboard/ratings/delete", post(actions::delete_rating))
        // Notifications
        .route("/dashboard/notifications", get(pages::notifications))
        .route(
            "/dashboard/notifications/mark-read",
            post(actions::mark_notification_read),
        )
        .route(
            "/dashboard/notifications/delete",
            post(actions::delete_notification),
        )
        // Placeholder resources
        .route("/dashboard/health-records", get(pages::placeholder))
        .route("/dashboard/prescriptions", get(pages::placeholder))
        // Settings
        .route("/dashboard/settings", get(pages::settings))
        .route("/dashboard/settings/theme", post(actions::toggle_theme))
}
