//! Page shell and shared HTML fragments

use crate::browser::escape_html;
use crate::theme::Palette;
use serde_json::Value;

/// Navigation entries shown in the sidebar
const NAV_LINKS: &[(&str, &str)] = &[
    ("/dashboard", "Dashboard"),
    ("/dashboard/users", "Users"),
    ("/dashboard/doctors", "Doctors"),
    ("/dashboard/consultations", "Consultations"),
    ("/dashboard/health-records", "Health Records"),
    ("/dashboard/prescriptions", "Prescriptions"),
    ("/dashboard/subscriptions", "Subscriptions"),
    ("/dashboard/payments", "Payments"),
    ("/dashboard/consultation-payments", "Consultation Payments"),
    ("/dashboard/subscription-payments", "Subscription Payments"),
    ("/dashboard/ratings", "Ratings"),
    ("/dashboard/notifications", "Notifications"),
    ("/dashboard/settings", "Settings"),
];

fn stylesheet(palette: &Palette) -> String {
    format!(
        "body {{ margin: 0; font-family: sans-serif; background: {background}; color: {text}; }}\n\
         .header {{ background: {surface}; border-bottom: 2px solid {primary}; padding: 12px 20px; display: flex; justify-content: space-between; align-items: center; }}\n\
         .logo {{ color: {primary}; font-size: 20px; font-weight: bold; text-decoration: none; }}\n\
         .content {{ display: flex; }}\n\
         .nav {{ min-width: 220px; background: {surface}; min-height: 100vh; padding: 16px 0; }}\n\
         .nav-link {{ display: block; padding: 10px 20px; color: {text_secondary}; text-decoration: none; }}\n\
         .nav-link.active {{ color: {primary}; font-weight: 600; }}\n\
         .main {{ flex: 1; padding: 24px; }}\n\
         .page-title {{ font-size: 28px; font-weight: bold; margin-bottom: 20px; }}\n\
         .record-browser {{ background: {surface}; border-radius: 12px; padding: 20px; }}\n\
         .search-input {{ width: 100%; max-width: 400px; padding: 10px 15px; border: 1px solid {border}; border-radius: 6px; margin-bottom: 20px; }}\n\
         .record-table {{ width: 100%; border-collapse: collapse; }}\n\
         .record-table th {{ text-align: left; padding: 12px; border-bottom: 2px solid {primary}; font-size: 14px; }}\n\
         .record-table td {{ padding: 12px; border-bottom: 1px solid {border}; font-size: 14px; color: {text_secondary}; }}\n\
         .no-data {{ text-align: center; padding: 30px; }}\n\
         .badge {{ padding: 4px 12px; border-radius: 12px; color: {white}; font-size: 12px; display: inline-block; }}\n\
         .badge-success {{ background: {success}; }}\n\
         .badge-warning {{ background: {warning}; }}\n\
         .badge-error {{ background: {error}; }}\n\
         .badge-info {{ background: {info}; }}\n\
         .badge-purple {{ background: {purple}; }}\n\
         .btn {{ display: inline-block; padding: 6px 12px; margin-right: 6px; border: none; border-radius: 4px; color: {white}; font-size: 12px; cursor: pointer; text-decoration: none; }}\n\
         .btn-view {{ background: {info}; }}\n\
         .btn-edit {{ background: {success}; }}\n\
         .btn-delete {{ background: {error}; }}\n\
         .btn-primary {{ background: {primary}; padding: 10px 20px; font-size: 14px; }}\n\
         .inline-form {{ display: inline; }}\n\
         .banner {{ border-radius: 6px; padding: 12px 16px; margin-bottom: 16px; color: {white}; }}\n\
         .banner-error {{ background: {error}; }}\n\
         .banner-notice {{ background: {success}; }}\n\
         .stats-grid {{ display: flex; gap: 16px; margin-bottom: 24px; flex-wrap: wrap; }}\n\
         .stat-card {{ background: {surface}; border-radius: 12px; padding: 20px; min-width: 180px; }}\n\
         .stat-label {{ color: {text_secondary}; font-size: 14px; }}\n\
         .stat-value {{ font-size: 26px; font-weight: bold; color: {primary}; }}\n\
         .detail-list {{ background: {surface}; border-radius: 12px; padding: 20px; max-width: 640px; }}\n\
         .detail-row {{ padding: 10px 0; border-bottom: 1px solid {border}; font-size: 14px; }}\n\
         .struck {{ font-size: 11px; color: {text_secondary}; text-decoration: line-through; }}\n\
         .form-card {{ background: {surface}; border-radius: 12px; padding: 24px; max-width: 480px; }}\n\
         .form-field {{ display: block; width: 100%; padding: 10px; margin: 6px 0 14px; border: 1px solid {border}; border-radius: 6px; }}",
        background = palette.background,
        surface = palette.surface,
        text = palette.text,
        text_secondary = palette.text_secondary,
        border = palette.border,
        primary = palette.primary,
        success = palette.success,
        warning = palette.warning,
        error = palette.error,
        info = palette.info,
        purple = palette.purple,
        white = palette.white,
    )
}

fn nav(active: &str) -> String {
    NAV_LINKS
        .iter()
        .map(|(href, label)| {
            let class = if *href == active {
                "nav-link active"
            } else {
                "nav-link"
            };
            format!("<a class=\"{class}\" href=\"{href}\">{label}</a>")
        })
        .collect()
}

fn banners(error: Option<&str>, notice: Option<&str>) -> String {
    let mut html = String::new();
    if let Some(message) = error {
        html.push_str(&format!(
            "<div class=\"banner banner-error\">{}</div>",
            escape_html(message)
        ));
    }
    if let Some(message) = notice {
        html.push_str(&format!(
            "<div class=\"banner banner-notice\">{}</div>",
            escape_html(message)
        ));
    }
    html
}

/// Render a full dashboard page
#[must_use]
pub fn page_shell(
    title: &str,
    active: &str,
    palette: &Palette,
    error: Option<&str>,
    notice: Option<&str>,
    body: &str,
) -> String {
    format!(
        "<!doctype html><html><head><meta charset=\"utf-8\" />\
         <title>{title} - Caredesk Admin</title>\
         <style>{style}</style></head><body>\
         <header class=\"header\">\
         <a class=\"logo\" href=\"/dashboard\">Caredesk Admin</a>\
         <form method=\"post\" action=\"/logout\" class=\"inline-form\">\
         <button type=\"submit\" class=\"btn btn-primary\">Sign Out</button></form>\
         </header>\
         <div class=\"content\">\
         <nav class=\"nav\">{nav}</nav>\
         <main class=\"main\">\
         <h1 class=\"page-title\">{title}</h1>\
         {banners}{body}\
         </main></div></body></html>",
        title = escape_html(title),
        style = stylesheet(palette),
        nav = nav(active),
        banners = banners(error, notice),
    )
}

/// Render the login page, optionally with an inline error
#[must_use]
pub fn login_page(palette: &Palette, error: Option<&str>) -> String {
    let error_html = error.map_or_else(String::new, |message| {
        format!(
            "<div class=\"banner banner-error\">{}</div>",
            escape_html(message)
        )
    });

    format!(
        "<!doctype html><html><head><meta charset=\"utf-8\" />\
         <title>Sign In - Caredesk Admin</title>\
         <style>{style}</style></head><body>\
         <main class=\"main\">\
         <div class=\"form-card\">\
         <h1 class=\"page-title\">Caredesk Admin</h1>\
         {error_html}\
         <form method=\"post\" action=\"/login\">\
         <label>Email</label>\
         <input class=\"form-field\" type=\"email\" name=\"email\" required />\
         <label>Password</label>\
         <input class=\"form-field\" type=\"password\" name=\"password\" required />\
         <button type=\"submit\" class=\"btn btn-primary\">Sign In</button>\
         </form></div></main></body></html>",
        style = stylesheet(palette),
    )
}

/// Render a confirmation page for a destructive action
///
/// Confirming re-posts to `action` with `confirmed=true`; cancelling
/// navigates back without issuing any remote call.
#[must_use]
pub fn confirm_page(
    palette: &Palette,
    prompt: &str,
    action: &str,
    cancel_href: &str,
) -> String {
    let body = format!(
        "<div class=\"form-card\"><p>{prompt}</p>\
         <form method=\"post\" action=\"{action}\" class=\"inline-form\">\
         <input type=\"hidden\" name=\"confirmed\" value=\"true\" />\
         <button type=\"submit\" class=\"btn btn-delete\">Confirm</button></form>\
         <a class=\"btn btn-primary\" href=\"{cancel}\">Cancel</a></div>",
        prompt = escape_html(prompt),
        action = escape_html(action),
        cancel = escape_html(cancel_href),
    );
    page_shell("Confirm", "", palette, None, None, &body)
}

/// Render a label/value detail list from an untyped row
#[must_use]
pub fn detail_list(row: &Value, fields: &[(&str, &str)]) -> String {
    let rows: String = fields
        .iter()
        .map(|(label, key)| {
            let value = row
                .get(*key)
                .map(crate::browser::field_string)
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "N/A".to_string());
            format!(
                "<div class=\"detail-row\"><strong>{}:</strong> {}</div>",
                escape_html(label),
                escape_html(&value)
            )
        })
        .collect();

    format!("<div class=\"detail-list\">{rows}</div>")
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use crate::theme::LIGHT;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_page_shell_marks_active_link() {
        let html = page_shell("Users", "/dashboard/users", &LIGHT, None, None, "<p>body</p>");

        assert!(html.contains("<p>body</p>"));
        assert!(html.contains("class=\"nav-link active\" href=\"/dashboard/users\""));
        assert!(html.contains("class=\"nav-link\" href=\"/dashboard/doctors\""));
    }

    #[test]
    fn test_page_shell_banners() {
        let html = page_shell(
            "Users",
            "/dashboard/users",
            &LIGHT,
            Some("read failed"),
            Some("deleted"),
            "",
        );

        assert!(html.contains("banner-error"));
        assert!(html.contains("read failed"));
        assert!(html.contains("banner-notice"));
        assert!(html.contains("deleted"));
    }

    #[test]
    fn test_login_page_inline_error() {
        let without = login_page(&LIGHT, None);
        assert!(!without.contains("banner-error"));

        let with = login_page(&LIGHT, Some("Invalid login credentials"));
        assert!(with.contains("banner-error"));
        assert!(with.contains("Invalid login credentials"));
    }

    #[test]
    fn test_confirm_page_carries_confirmed_field() {
        let html = confirm_page(
            &LIGHT,
            "Delete user Ayesha Rahman?",
            "/dashboard/users/delete?id=u-1",
            "/dashboard/users",
        );

        assert!(html.contains("name=\"confirmed\" value=\"true\""));
        assert!(html.contains("action=\"/dashboard/users/delete?id=u-1\""));
        assert!(html.contains("href=\"/dashboard/users\""));
    }

    #[test]
    fn test_detail_list_renders_fields() {
        let row = json!({"full_name": "Ayesha Rahman", "phone": null});
        let html = detail_list(&row, &[("Full Name", "full_name"), ("Phone", "phone")]);

        assert!(html.contains("<strong>Full Name:</strong> Ayesha Rahman"));
        assert!(html.contains("<strong>Phone:</strong> N/A"));
    }

    #[test]
    fn test_detail_list_missing_key_is_na() {
        let row = json!({});
        let html = detail_list(&row, &[("Bio", "bio")]);
        assert_eq!(html.matches("N/A").count(), 1);
    }
}
