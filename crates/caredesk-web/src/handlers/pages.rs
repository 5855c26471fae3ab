//! Dashboard page handlers
//!
//! Every page follows the same flow: fetch the collection(s) on request,
//! filter by the search term, render through the record browser. A failed
//! read is logged, surfaced as an error banner, and the page shows an
//! empty table.

use crate::browser::{self, Column, RowActions, escape_html, field_string};
use crate::join::merge_doctor_rows;
use crate::layout;
use crate::session::{self, AdminSession};
use crate::state::AppState;
use crate::theme::{self, Palette, ThemePreference};
use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::Html,
    Extension,
};
use caredesk_core::types::{
    ConsultationStatus, ConsultationType, DoctorProfile, PaymentStatus, Role,
    SubscriptionStatus, UserAccount,
};
use caredesk_core::utils;
use caredesk_remote::Query as RemoteQuery;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::error;

/// Common query parameters carried by every page
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    /// Search term for the record browser
    pub q: Option<String>,
    /// Error banner carried across a redirect
    pub error: Option<String>,
    /// Notice banner carried across a redirect
    pub notice: Option<String>,
}

/// Resolve the theme palette from the request cookies
#[must_use]
pub fn palette_for(headers: &HeaderMap) -> &'static Palette {
    let preference = session::cookie_from_headers(headers, theme::THEME_COOKIE);
    ThemePreference::from_cookie(preference.as_deref()).palette()
}

/// Parse a monetary field that may arrive as a JSON string or number
#[must_use]
pub fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.as_f64().and_then(|f| Decimal::try_from(f).ok()),
        _ => None,
    }
}

// Cell renderers. These are plain functions so column specifications stay
// const-friendly; theming goes through CSS classes, not captured state.

fn joined_name_cell(cell: &Value, _row: &Value) -> String {
    escape_html(cell.get("full_name").and_then(Value::as_str).unwrap_or("N/A"))
}

fn joined_email_cell(cell: &Value, _row: &Value) -> String {
    escape_html(cell.get("email").and_then(Value::as_str).unwrap_or("N/A"))
}

fn nested_doctor_name_cell(cell: &Value, _row: &Value) -> String {
    let name = cell
        .get("users")
        .and_then(|users| users.get("full_name"))
        .and_then(Value::as_str)
        .unwrap_or("N/A");
    escape_html(name)
}

fn role_cell(cell: &Value, _row: &Value) -> String {
    serde_json::from_value::<Role>(cell.clone()).map_or_else(
        |_| escape_html(&field_string(cell)),
        |role| theme::badge(&role.to_string(), theme::role_class(role)),
    )
}

fn payment_status_cell(cell: &Value, _row: &Value) -> String {
    serde_json::from_value::<PaymentStatus>(cell.clone()).map_or_else(
        |_| escape_html(&field_string(cell)),
        |status| theme::badge(&status.to_string(), theme::payment_status_class(status)),
    )
}

fn subscription_status_cell(cell: &Value, _row: &Value) -> String {
    serde_json::from_value::<SubscriptionStatus>(cell.clone()).map_or_else(
        |_| escape_html(&field_string(cell)),
        |status| theme::badge(&status.to_string(), theme::subscription_status_class(status)),
    )
}

fn consultation_status_cell(cell: &Value, _row: &Value) -> String {
    serde_json::from_value::<ConsultationStatus>(cell.clone()).map_or_else(
        |_| escape_html(&field_string(cell)),
        |status| theme::badge(&status.to_string(), theme::consultation_status_class(status)),
    )
}

fn consultation_type_cell(cell: &Value, _row: &Value) -> String {
    serde_json::from_value::<ConsultationType>(cell.clone()).map_or_else(
        |_| escape_html(&field_string(cell)),
        |kind| theme::badge(&kind.to_string(), "info"),
    )
}

fn method_cell(cell: &Value, _row: &Value) -> String {
    theme::badge(&field_string(cell), "info")
}

fn date_cell(cell: &Value, _row: &Value) -> String {
    cell.as_str()
        .and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
        .map_or_else(
            || escape_html(&field_string(cell)),
            |dt| utils::format_date(dt.with_timezone(&chrono::Utc)),
        )
}

fn datetime_cell(cell: &Value, _row: &Value) -> String {
    cell.as_str()
        .and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
        .map_or_else(
            || escape_html(&field_string(cell)),
            |dt| utils::format_datetime(dt.with_timezone(&chrono::Utc)),
        )
}

fn currency_cell(cell: &Value, _row: &Value) -> String {
    decimal_from_value(cell).map_or_else(
        || escape_html(&field_string(cell)),
        utils::format_currency,
    )
}

fn discounted_amount_cell(cell: &Value, row: &Value) -> String {
    let Some(amount) = decimal_from_value(cell) else {
        return escape_html(&field_string(cell));
    };
    let original = row.get("original_amount").and_then(decimal_from_value);
    let discount = row.get("discount_applied").and_then(decimal_from_value);

    let display = utils::discounted_amount(amount, original, discount);
    display.original.map_or_else(
        || escape_html(&display.amount),
        |original| {
            format!(
                "<div>{}</div><div class=\"struck\">{}</div>",
                escape_html(&display.amount),
                escape_html(&original)
            )
        },
    )
}

fn auto_renew_cell(cell: &Value, _row: &Value) -> String {
    let label = if cell.as_bool() == Some(true) { "Yes" } else { "No" };
    label.to_string()
}

fn read_flag_cell(cell: &Value, _row: &Value) -> String {
    if cell.as_bool() == Some(true) {
        theme::badge("read", "success")
    } else {
        theme::badge("unread", "warning")
    }
}

/// Verify/cancel controls for a pending subscription payment
fn payment_verification_cell(cell: &Value, row: &Value) -> String {
    if cell.as_str() != Some("pending") {
        return String::new();
    }
    let (Some(id), Some(subscription_id)) = (
        row.get("id").and_then(Value::as_str),
        row.get("subscription_id").and_then(Value::as_str),
    ) else {
        return String::new();
    };

    let target = format!("id={}&subscription_id={}", escape_html(id), escape_html(subscription_id));
    format!(
        "<form method=\"post\" action=\"/dashboard/subscription-payments/verify?{target}\" class=\"inline-form\">\
         <button type=\"submit\" class=\"btn btn-edit\">Verify</button></form>\
         <form method=\"post\" action=\"/dashboard/subscription-payments/cancel?{target}\" class=\"inline-form\">\
         <button type=\"submit\" class=\"btn btn-delete\">Cancel</button></form>"
    )
}

/// Cancel control for a subscription that is not already cancelled
fn subscription_cancel_cell(cell: &Value, row: &Value) -> String {
    if cell.as_str() == Some("cancelled") {
        return String::new();
    }
    let Some(id) = row.get("id").and_then(Value::as_str) else {
        return String::new();
    };
    format!(
        "<form method=\"post\" action=\"/dashboard/subscriptions/cancel?id={}\" class=\"inline-form\">\
         <button type=\"submit\" class=\"btn btn-delete\">Cancel</button></form>",
        escape_html(id)
    )
}

/// Profile column of the doctors page: a create link for profile-less rows
fn doctor_profile_cell(cell: &Value, row: &Value) -> String {
    if cell.is_null() {
        let user_id = row.get("user_id").and_then(Value::as_str).unwrap_or_default();
        format!(
            "<a class=\"btn btn-primary\" href=\"/dashboard/doctors/new-profile?user_id={}\">Create Profile</a>",
            escape_html(user_id)
        )
    } else {
        theme::badge("profile", "success")
    }
}

fn mark_read_cell(cell: &Value, row: &Value) -> String {
    if cell.as_bool() == Some(true) {
        return String::new();
    }
    let Some(id) = row.get("id").and_then(Value::as_str) else {
        return String::new();
    };
    format!(
        "<form method=\"post\" action=\"/dashboard/notifications/mark-read?id={}\" class=\"inline-form\">\
         <button type=\"submit\" class=\"btn btn-view\">Mark Read</button></form>",
        escape_html(id)
    )
}

// Action link builders

fn id_param(row: &Value) -> Option<&str> {
    row.get("id").and_then(Value::as_str)
}

fn user_view_href(row: &Value) -> Option<String> {
    id_param(row).map(|id| format!("/dashboard/users/view?id={id}"))
}

fn user_delete_href(row: &Value) -> Option<String> {
    id_param(row).map(|id| format!("/dashboard/users/delete?id={id}"))
}

fn doctor_view_href(row: &Value) -> Option<String> {
    row.get("user_id")
        .and_then(Value::as_str)
        .map(|id| format!("/dashboard/doctors/view?user_id={id}"))
}

fn doctor_edit_href(row: &Value) -> Option<String> {
    // No edit without a profile; the profile column offers creation instead
    id_param(row).map(|id| format!("/dashboard/doctors/edit-profile?id={id}"))
}

fn doctor_delete_href(row: &Value) -> Option<String> {
    id_param(row).map(|id| format!("/dashboard/doctors/delete?id={id}"))
}

fn rating_delete_href(row: &Value) -> Option<String> {
    id_param(row).map(|id| format!("/dashboard/ratings/delete?id={id}"))
}

fn notification_delete_href(row: &Value) -> Option<String> {
    id_param(row).map(|id| format!("/dashboard/notifications/delete?id={id}"))
}

/// Fetch, filter, and render one collection through the record browser
async fn render_browse(
    state: &AppState,
    headers: &HeaderMap,
    params: &PageQuery,
    title: &str,
    active: &str,
    query: &RemoteQuery,
    columns: &[Column],
    actions: &RowActions,
) -> Html<String> {
    let palette = palette_for(headers);

    let (rows, load_error) = match state.remote.fetch_rows(query).await {
        Ok(rows) => (rows, None),
        Err(e) => {
            error!("Failed to load {}: {e}", query.collection());
            (Vec::new(), Some(format!("Failed to load {title}")))
        }
    };

    let term = params.q.clone().unwrap_or_default();
    let filtered = browser::filter_rows(&rows, &term);
    let table = browser::render_table(&filtered, columns, actions, false, &term);

    let error = load_error.as_deref().or(params.error.as_deref());
    Html(layout::page_shell(
        title,
        active,
        palette,
        error,
        params.notice.as_deref(),
        &table,
    ))
}

/// Dashboard overview with aggregate stats
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageQuery>,
    headers: HeaderMap,
) -> Html<String> {
    let palette = palette_for(&headers);

    let recent_query = RemoteQuery::new("consultations")
        .select("*,patient:users!consultations_patient_id_fkey(full_name),doctor:doctors!consultations_doctor_id_fkey(users(full_name))")
        .order_desc("created_at")
        .limit(5);

    // Five independent queries, awaited together: one failure fails the
    // whole load.
    let patients_query = RemoteQuery::new("users").eq("role", "patient");
    let doctors_query = RemoteQuery::new("users").eq("role", "doctor");
    let consultations_query = RemoteQuery::new("consultations");
    let payments_query = RemoteQuery::new("payments").select("amount");
    let loaded = tokio::try_join!(
        state.remote.count(&patients_query),
        state.remote.count(&doctors_query),
        state.remote.count(&consultations_query),
        state.remote.fetch_rows(&payments_query),
        state.remote.fetch_rows(&recent_query),
    );

    let (stats_html, recent_html, load_error) = match loaded {
        Ok((patients, doctors, consultations, payments, recent)) => {
            let revenue: Decimal = payments
                .iter()
                .filter_map(|row| row.get("amount").and_then(decimal_from_value))
                .sum();

            let stats = format!(
                "<div class=\"stats-grid\">\
                 <div class=\"stat-card\"><div class=\"stat-label\">Total Patients</div><div class=\"stat-value\">{patients}</div></div>\
                 <div class=\"stat-card\"><div class=\"stat-label\">Total Doctors</div><div class=\"stat-value\">{doctors}</div></div>\
                 <div class=\"stat-card\"><div class=\"stat-label\">Consultations</div><div class=\"stat-value\">{consultations}</div></div>\
                 <div class=\"stat-card\"><div class=\"stat-label\">Total Revenue</div><div class=\"stat-value\">{revenue}</div></div>\
                 </div>",
                revenue = utils::format_currency(revenue),
            );

            let columns = [
                Column::rendered("Patient", "patient", joined_name_cell),
                Column::rendered("Doctor", "doctor", nested_doctor_name_cell),
                Column::rendered("Type", "consultation_type", consultation_type_cell),
                Column::rendered("Status", "status", consultation_status_cell),
                Column::rendered("Scheduled", "scheduled_at", datetime_cell),
            ];
            let table = browser::render_table(&recent, &columns, &RowActions::none(), false, "");
            (stats, format!("<h2>Recent Consultations</h2>{table}"), None)
        }
        Err(e) => {
            error!("Failed to load dashboard stats: {e}");
            (
                String::new(),
                String::new(),
                Some("Failed to load dashboard".to_string()),
            )
        }
    };

    let body = format!("{stats_html}{recent_html}");
    Html(layout::page_shell(
        "Dashboard Overview",
        "/dashboard",
        palette,
        load_error.as_deref().or(params.error.as_deref()),
        params.notice.as_deref(),
        &body,
    ))
}

/// Users page
pub async fn users(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageQuery>,
    headers: HeaderMap,
) -> Html<String> {
    let query = RemoteQuery::new("users").select("*").order_desc("created_at");
    let columns = [
        Column::new("Full Name", "full_name"),
        Column::new("Email", "email"),
        Column::new("Phone", "phone"),
        Column::rendered("Role", "role", role_cell),
        Column::new("Gender", "gender"),
        Column::rendered("Created At", "created_at", date_cell),
    ];
    let actions = RowActions::none()
        .with_view(user_view_href)
        .with_delete(user_delete_href);

    render_browse(
        &state,
        &headers,
        &params,
        "Users Management",
        "/dashboard/users",
        &query,
        &columns,
        &actions,
    )
    .await
}

/// User detail page
pub async fn user_detail(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DetailParams>,
    headers: HeaderMap,
) -> Html<String> {
    let palette = palette_for(&headers);
    let query = RemoteQuery::new("users").eq("id", &params.id);

    let body = match state.remote.fetch_rows(&query).await {
        Ok(rows) if !rows.is_empty() => layout::detail_list(
            &rows[0],
            &[
                ("Full Name", "full_name"),
                ("Email", "email"),
                ("Phone", "phone"),
                ("Role", "role"),
                ("Gender", "gender"),
                ("Date of Birth", "date_of_birth"),
                ("Created At", "created_at"),
            ],
        ),
        Ok(_) => "<p>User not found.</p>".to_string(),
        Err(e) => {
            error!("Failed to load user {}: {e}", params.id);
            "<p>Failed to load user.</p>".to_string()
        }
    };

    Html(layout::page_shell(
        "User Details",
        "/dashboard/users",
        palette,
        None,
        None,
        &body,
    ))
}

/// Detail page parameters
#[derive(Debug, Deserialize)]
pub struct DetailParams {
    /// Record id
    #[serde(alias = "user_id")]
    pub id: String,
}

/// Doctors page: two fetches joined client-side
///
/// The backend exposes no join between doctor-role users and profiles, so
/// both collections are fetched and merged here.
pub async fn doctors(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageQuery>,
    headers: HeaderMap,
) -> Html<String> {
    let palette = palette_for(&headers);

    let users_query = RemoteQuery::new("users")
        .eq("role", "doctor")
        .order_desc("created_at");
    let profiles_query = RemoteQuery::new("doctors").select("*");

    let loaded = tokio::try_join!(
        state.remote.fetch::<UserAccount>(&users_query),
        state.remote.fetch::<DoctorProfile>(&profiles_query),
    );

    let (rows, load_error) = match loaded {
        Ok((users, profiles)) => {
            let merged = merge_doctor_rows(&users, &profiles);
            let rows: Vec<Value> = merged
                .iter()
                .filter_map(|row| serde_json::to_value(row).ok())
                .collect();
            (rows, None)
        }
        Err(e) => {
            error!("Failed to load doctors: {e}");
            (Vec::new(), Some("Failed to load doctors".to_string()))
        }
    };

    let columns = [
        Column::new("Name", "full_name"),
        Column::new("Email", "email"),
        Column::new("Registration", "registration_number"),
        Column::new("Specialization", "specialization"),
        Column::rendered("Fee", "consultation_fee", currency_cell),
        Column::rendered("Profile", "id", doctor_profile_cell),
    ];
    let actions = RowActions::none()
        .with_view(doctor_view_href)
        .with_edit(doctor_edit_href)
        .with_delete(doctor_delete_href);

    let term = params.q.clone().unwrap_or_default();
    let filtered = browser::filter_rows(&rows, &term);
    let table = browser::render_table(&filtered, &columns, &actions, false, &term);

    Html(layout::page_shell(
        "Doctors Management",
        "/dashboard/doctors",
        palette,
        load_error.as_deref().or(params.error.as_deref()),
        params.notice.as_deref(),
        &table,
    ))
}

/// Doctor detail page, keyed by the underlying user
pub async fn doctor_detail(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DetailParams>,
    headers: HeaderMap,
) -> Html<String> {
    let palette = palette_for(&headers);

    let user_query = RemoteQuery::new("users").eq("id", &params.id);
    let doctor_query = RemoteQuery::new("doctors").eq("user_id", &params.id);
    let loaded = tokio::try_join!(
        state.remote.fetch::<UserAccount>(&user_query),
        state.remote.fetch::<DoctorProfile>(&doctor_query),
    );

    let body = match loaded {
        Ok((users, profiles)) if !users.is_empty() => {
            let merged = merge_doctor_rows(&users, &profiles);
            merged
                .first()
                .and_then(|row| serde_json::to_value(row).ok())
                .map_or_else(
                    || "<p>Doctor not found.</p>".to_string(),
                    |row| {
                        layout::detail_list(
                            &row,
                            &[
                                ("Name", "full_name"),
                                ("Email", "email"),
                                ("Phone", "phone"),
                                ("Registration", "registration_number"),
                                ("Specialization", "specialization"),
                                ("Qualification", "qualification"),
                                ("Consultation Fee", "consultation_fee"),
                                ("Created At", "created_at"),
                            ],
                        )
                    },
                )
        }
        Ok(_) => "<p>Doctor not found.</p>".to_string(),
        Err(e) => {
            error!("Failed to load doctor {}: {e}", params.id);
            "<p>Failed to load doctor.</p>".to_string()
        }
    };

    Html(layout::page_shell(
        "Doctor Details",
        "/dashboard/doctors",
        palette,
        None,
        None,
        &body,
    ))
}

/// Profile creation form for a doctor-role user without a profile
pub async fn new_profile_form(
    Query(params): Query<DetailParams>,
    headers: HeaderMap,
) -> Html<String> {
    let palette = palette_for(&headers);
    let body = profile_form(
        "/dashboard/doctors/create-profile",
        "user_id",
        &params.id,
        None,
    );
    Html(layout::page_shell(
        "Create Doctor Profile",
        "/dashboard/doctors",
        palette,
        None,
        None,
        &body,
    ))
}

/// Profile edit form, prefilled from the existing profile
pub async fn edit_profile_form(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DetailParams>,
    headers: HeaderMap,
) -> Html<String> {
    let palette = palette_for(&headers);

    let query = RemoteQuery::new("doctors").eq("id", &params.id);
    let body = match state.remote.fetch::<DoctorProfile>(&query).await {
        Ok(profiles) => profiles.first().map_or_else(
            || "<p>Profile not found.</p>".to_string(),
            |profile| {
                profile_form(
                    "/dashboard/doctors/update-profile",
                    "id",
                    &params.id,
                    Some(profile),
                )
            },
        ),
        Err(e) => {
            error!("Failed to load profile {}: {e}", params.id);
            "<p>Failed to load profile.</p>".to_string()
        }
    };

    Html(layout::page_shell(
        "Edit Doctor Profile",
        "/dashboard/doctors",
        palette,
        None,
        None,
        &body,
    ))
}

fn profile_form(
    action: &str,
    key_name: &str,
    key_value: &str,
    existing: Option<&DoctorProfile>,
) -> String {
    let registration = existing.map(|p| p.registration_number.clone()).unwrap_or_default();
    let specialization = existing.map(|p| p.specialization.clone()).unwrap_or_default();
    let qualification = existing
        .and_then(|p| p.qualification.clone())
        .unwrap_or_default();
    let fee = existing
        .map(|p| p.consultation_fee.to_string())
        .unwrap_or_default();
    let bio = existing.and_then(|p| p.bio.clone()).unwrap_or_default();

    format!(
        "<div class=\"form-card\"><form method=\"post\" action=\"{action}\">\
         <input type=\"hidden\" name=\"{key_name}\" value=\"{key}\" />\
         <label>Registration Number</label>\
         <input class=\"form-field\" name=\"registration_number\" value=\"{registration}\" required />\
         <label>Specialization</label>\
         <input class=\"form-field\" name=\"specialization\" value=\"{specialization}\" required />\
         <label>Qualification</label>\
         <input class=\"form-field\" name=\"qualification\" value=\"{qualification}\" />\
         <label>Consultation Fee</label>\
         <input class=\"form-field\" name=\"consultation_fee\" value=\"{fee}\" required />\
         <label>Bio</label>\
         <textarea class=\"form-field\" name=\"bio\">{bio}</textarea>\
         <button type=\"submit\" class=\"btn btn-primary\">Save</button>\
         </form></div>",
        key = escape_html(key_value),
        registration = escape_html(&registration),
        specialization = escape_html(&specialization),
        qualification = escape_html(&qualification),
        fee = escape_html(&fee),
        bio = escape_html(&bio),
    )
}

/// Consultations page
pub async fn consultations(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageQuery>,
    headers: HeaderMap,
) -> Html<String> {
    let query = RemoteQuery::new("consultations")
        .select("*,patient:users!consultations_patient_id_fkey(full_name,email),doctor:doctors!consultations_doctor_id_fkey(users(full_name))")
        .order_desc("created_at");
    let columns = [
        Column::rendered("Patient", "patient", joined_name_cell),
        Column::rendered("Doctor", "doctor", nested_doctor_name_cell),
        Column::rendered("Type", "consultation_type", consultation_type_cell),
        Column::rendered("Status", "status", consultation_status_cell),
        Column::rendered("Scheduled At", "scheduled_at", datetime_cell),
        Column::rendered("Created At", "created_at", date_cell),
    ];

    render_browse(
        &state,
        &headers,
        &params,
        "Consultations Management",
        "/dashboard/consultations",
        &query,
        &columns,
        &RowActions::none(),
    )
    .await
}

/// General payments page
pub async fn payments(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageQuery>,
    headers: HeaderMap,
) -> Html<String> {
    let query = RemoteQuery::new("payments")
        .select("*,users(full_name,email)")
        .order_desc("created_at");
    let columns = [
        Column::rendered("User", "users", joined_name_cell),
        Column::rendered("Amount", "amount", currency_cell),
        Column::rendered("Method", "payment_method", method_cell),
        Column::rendered("Status", "payment_status", payment_status_cell),
        Column::new("Transaction ID", "transaction_id"),
        Column::rendered("Date", "created_at", datetime_cell),
    ];

    render_browse(
        &state,
        &headers,
        &params,
        "Payments Management",
        "/dashboard/payments",
        &query,
        &columns,
        &RowActions::none(),
    )
    .await
}

/// Consultation payments page, with discount-aware amount cells
pub async fn consultation_payments(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageQuery>,
    headers: HeaderMap,
) -> Html<String> {
    let query = RemoteQuery::new("consultation_payments")
        .select("id,amount,payment_method,payment_status,transaction_id,discount_applied,original_amount,created_at,consultation_id,users!consultation_payments_user_id_fkey(full_name,email)")
        .order_desc("created_at");
    let columns = [
        Column::rendered("User", "users", joined_name_cell),
        Column::rendered("Email", "users", joined_email_cell),
        Column::rendered("Amount", "amount", discounted_amount_cell),
        Column::rendered("Method", "payment_method", method_cell),
        Column::rendered("Status", "payment_status", payment_status_cell),
        Column::new("Transaction ID", "transaction_id"),
        Column::rendered("Date", "created_at", datetime_cell),
    ];

    render_browse(
        &state,
        &headers,
        &params,
        "Consultation Payments",
        "/dashboard/consultation-payments",
        &query,
        &columns,
        &RowActions::none(),
    )
    .await
}

/// Subscriptions page
pub async fn subscriptions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageQuery>,
    headers: HeaderMap,
) -> Html<String> {
    let query = RemoteQuery::new("subscriptions")
        .select("*,users(full_name,email)")
        .order_desc("created_at");
    let columns = [
        Column::rendered("User", "users", joined_name_cell),
        Column::new("Plan Name", "plan_name"),
        Column::rendered("Start Date", "start_date", date_cell),
        Column::rendered("End Date", "end_date", date_cell),
        Column::rendered("Auto Renew", "auto_renew", auto_renew_cell),
        Column::rendered("Status", "status", subscription_status_cell),
        Column::rendered("Manage", "status", subscription_cancel_cell),
    ];

    render_browse(
        &state,
        &headers,
        &params,
        "Subscriptions Management",
        "/dashboard/subscriptions",
        &query,
        &columns,
        &RowActions::none(),
    )
    .await
}

/// Subscription payments page with the verify/cancel transition controls
pub async fn subscription_payments(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageQuery>,
    headers: HeaderMap,
) -> Html<String> {
    let query = RemoteQuery::new("subscription_payments")
        .select("*,users(full_name,email)")
        .order_desc("created_at");
    let columns = [
        Column::rendered("User", "users", joined_name_cell),
        Column::rendered("Amount", "amount", currency_cell),
        Column::rendered("Method", "payment_method", method_cell),
        Column::rendered("Status", "payment_status", payment_status_cell),
        Column::new("Transaction ID", "transaction_id"),
        Column::rendered("Date", "created_at", datetime_cell),
        Column::rendered("Verification", "payment_status", payment_verification_cell),
    ];

    render_browse(
        &state,
        &headers,
        &params,
        "Subscription Payments",
        "/dashboard/subscription-payments",
        &query,
        &columns,
        &RowActions::none(),
    )
    .await
}

/// Ratings page
pub async fn ratings(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageQuery>,
    headers: HeaderMap,
) -> Html<String> {
    let query = RemoteQuery::new("ratings")
        .select("*,patient:users!ratings_patient_id_fkey(full_name)")
        .order_desc("created_at");
    let columns = [
        Column::rendered("Patient", "patient", joined_name_cell),
        Column::new("Score", "score"),
        Column::new("Review", "review"),
        Column::rendered("Created At", "created_at", date_cell),
    ];
    let actions = RowActions::none().with_delete(rating_delete_href);

    render_browse(
        &state,
        &headers,
        &params,
        "Ratings Management",
        "/dashboard/ratings",
        &query,
        &columns,
        &actions,
    )
    .await
}

/// Notifications page
pub async fn notifications(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageQuery>,
    headers: HeaderMap,
) -> Html<String> {
    let query = RemoteQuery::new("notifications")
        .select("*,users(full_name)")
        .order_desc("created_at");
    let columns = [
        Column::rendered("User", "users", joined_name_cell),
        Column::new("Title", "title"),
        Column::new("Body", "body"),
        Column::rendered("Read", "read", read_flag_cell),
        Column::rendered("Created At", "created_at", datetime_cell),
        Column::rendered("Manage", "read", mark_read_cell),
    ];
    let actions = RowActions::none().with_delete(notification_delete_href);

    render_browse(
        &state,
        &headers,
        &params,
        "Notifications",
        "/dashboard/notifications",
        &query,
        &columns,
        &actions,
    )
    .await
}

/// Placeholder page for routes without a backing collection
pub async fn placeholder(headers: HeaderMap, uri: axum::http::Uri) -> Html<String> {
    let palette = palette_for(&headers);
    let (title, active) = match uri.path() {
        "/dashboard/prescriptions" => ("Prescriptions", "/dashboard/prescriptions"),
        _ => ("Health Records", "/dashboard/health-records"),
    };
    Html(layout::page_shell(
        title,
        active,
        palette,
        None,
        None,
        "<p>Not available yet.</p>",
    ))
}

/// Settings page: theme toggle and session info
pub async fn settings(
    Extension(session): Extension<AdminSession>,
    Query(params): Query<PageQuery>,
    headers: HeaderMap,
) -> Html<String> {
    let preference = ThemePreference::from_cookie(
        session::cookie_from_headers(&headers, theme::THEME_COOKIE).as_deref(),
    );
    let palette = preference.palette();

    let body = format!(
        "<div class=\"form-card\">\
         <h2>Appearance</h2>\
         <p>Current theme: {theme}</p>\
         <form method=\"post\" action=\"/dashboard/settings/theme\" class=\"inline-form\">\
         <button type=\"submit\" class=\"btn btn-primary\">Switch to {next}</button></form>\
         </div>\
         <div class=\"form-card\">\
         <h2>Account</h2>\
         <div class=\"detail-row\"><strong>Email:</strong> {email}</div>\
         <div class=\"detail-row\"><strong>Signed in since:</strong> {since}</div>\
         </div>",
        theme = preference.as_str(),
        next = preference.toggled().as_str(),
        email = escape_html(&session.email),
        since = utils::format_datetime(session.created_at),
    );

    Html(layout::page_shell(
        "Settings",
        "/dashboard/settings",
        palette,
        params.error.as_deref(),
        params.notice.as_deref(),
        &body,
    ))
}

/// Login form
pub async fn login_form(Query(params): Query<PageQuery>, headers: HeaderMap) -> Html<String> {
    let palette = palette_for(&headers);
    Html(layout::login_page(palette, params.error.as_deref()))
}

/// Liveness probe
pub async fn health_check() -> &'static str {
    "OK"
}
