//! Hosted-backend client for the caredesk admin dashboard
//!
//! The remote data service boundary: reads are keyed by collection name
//! plus a filter/order/include specification, writes take a collection
//! name and a predicate or record. No retries, no idempotency keys, no
//! batching; every failure is terminal and descriptive.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod auth;
pub mod client;
pub mod query;
pub mod transitions;

pub use auth::{AuthClient, AuthSession};
pub use client::RemoteClient;
pub use query::{Direction, Query};
pub use transitions::{
    cancel_subscription, cancel_subscription_payment, verify_subscription_payment,
};
