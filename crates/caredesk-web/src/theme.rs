//! Theme palettes and status badge mapping
//!
//! The single piece of locally persisted state: a light/dark preference
//! carried in a cookie and applied as an inline stylesheet per request.

use crate::browser::escape_html;
use caredesk_core::types::{ConsultationStatus, PaymentStatus, Role, SubscriptionStatus};

/// Cookie carrying the persisted theme preference
pub const THEME_COOKIE: &str = "caredesk_theme";

/// Light/dark preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemePreference {
    /// Light palette
    #[default]
    Light,
    /// Dark palette
    Dark,
}

impl ThemePreference {
    /// Parse a cookie value; anything unknown falls back to light
    #[must_use]
    pub fn from_cookie(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Self::Dark,
            _ => Self::Light,
        }
    }

    /// The cookie wire form
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// The opposite preference
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// The palette for this preference
    #[must_use]
    pub const fn palette(self) -> &'static Palette {
        match self {
            Self::Light => &LIGHT,
            Self::Dark => &DARK,
        }
    }
}

/// Theme colors applied to the page shell
#[derive(Debug, Clone)]
pub struct Palette {
    /// Page background
    pub background: &'static str,
    /// Card and table background
    pub surface: &'static str,
    /// Primary text
    pub text: &'static str,
    /// Secondary text
    pub text_secondary: &'static str,
    /// Border lines
    pub border: &'static str,
    /// Brand and action color
    pub primary: &'static str,
    /// Positive status
    pub success: &'static str,
    /// Attention status
    pub warning: &'static str,
    /// Failure status
    pub error: &'static str,
    /// Informational status
    pub info: &'static str,
    /// Admin role accent
    pub purple: &'static str,
    /// Button text
    pub white: &'static str,
}

/// Light palette
pub const LIGHT: Palette = Palette {
    background: "#F5F5F5",
    surface: "#FFFFFF",
    text: "#333333",
    text_secondary: "#666666",
    border: "#E0E0E0",
    primary: "#2196F3",
    success: "#4CAF50",
    warning: "#FF9800",
    error: "#F44336",
    info: "#2196F3",
    purple: "#9C27B0",
    white: "#FFFFFF",
};

/// Dark palette
pub const DARK: Palette = Palette {
    background: "#121212",
    surface: "#1E1E1E",
    text: "#E0E0E0",
    text_secondary: "#B0B0B0",
    border: "#333333",
    primary: "#2196F3",
    success: "#4CAF50",
    warning: "#FF9800",
    error: "#F44336",
    info: "#2196F3",
    purple: "#9C27B0",
    white: "#FFFFFF",
};

/// Render a status badge with a palette class
#[must_use]
pub fn badge(text: &str, class: &str) -> String {
    format!(
        "<span class=\"badge badge-{class}\">{}</span>",
        escape_html(text)
    )
}

/// Badge class for a payment status
#[must_use]
pub const fn payment_status_class(status: PaymentStatus) -> &'static str {
    match status {
        PaymentStatus::Completed => "success",
        PaymentStatus::Pending => "warning",
        PaymentStatus::Refunded => "info",
        PaymentStatus::Failed => "error",
    }
}

/// Badge class for a subscription status
#[must_use]
pub const fn subscription_status_class(status: SubscriptionStatus) -> &'static str {
    match status {
        SubscriptionStatus::Active => "success",
        SubscriptionStatus::Pending => "warning",
        SubscriptionStatus::Expired | SubscriptionStatus::Cancelled => "error",
    }
}

/// Badge class for a consultation status
#[must_use]
pub const fn consultation_status_class(status: ConsultationStatus) -> &'static str {
    match status {
        ConsultationStatus::Completed => "success",
        ConsultationStatus::Scheduled => "info",
        ConsultationStatus::Cancelled => "error",
    }
}

/// Badge class for a user role
#[must_use]
pub const fn role_class(role: Role) -> &'static str {
    match role {
        Role::Admin => "purple",
        Role::Doctor => "info",
        Role::Patient => "success",
    }
}
