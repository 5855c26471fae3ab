//! Caredesk web dashboard
//!
//! The administrative console for a medical-consultation platform: signs an
//! administrator in against the hosted auth service, then serves searchable
//! record-browser pages over the platform's collections with per-row
//! view/edit/delete actions.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod browser;
pub mod handlers;
pub mod join;
pub mod layout;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod session;
pub mod state;
pub mod theme;

// Re-export the main functions
pub use server::build_app;
pub use state::AppState;
