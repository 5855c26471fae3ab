//! Two-step payment/subscription state transitions
//!
//! Verifying or cancelling a subscription payment mutates both the payment
//! and its linked subscription as two independent writes. There is no
//! transaction and no rollback: when the second write fails the first
//! stays applied, and the returned error names the partial state so an
//! operator can retry.

use crate::client::RemoteClient;
use crate::query::Query;
use caredesk_core::types::{PaymentStatus, Subscription, SubscriptionStatus};
use caredesk_core::{Error, Result};
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

/// Mark a subscription payment completed, then activate its subscription
///
/// # Errors
///
/// Returns a backend error if the payment write fails (nothing applied),
/// or `Error::PartialTransition` if the payment write succeeded but the
/// subscription write failed.
pub async fn verify_subscription_payment(
    client: &RemoteClient,
    payment_id: Uuid,
    subscription_id: Uuid,
) -> Result<()> {
    client
        .update(
            &Query::new("subscription_payments").eq("id", payment_id),
            &json!({ "payment_status": PaymentStatus::Completed }),
        )
        .await?;

    client
        .update(
            &Query::new("subscriptions").eq("id", subscription_id),
            &json!({ "status": SubscriptionStatus::Active }),
        )
        .await
        .map_err(|e| {
            warn!(
                payment_id = %payment_id,
                subscription_id = %subscription_id,
                "payment verified but subscription activation failed: {e}"
            );
            Error::PartialTransition {
                applied: format!("payment {payment_id} marked completed"),
                failed: format!("subscription {subscription_id} activation"),
                message: e.to_string(),
            }
        })?;

    info!(payment_id = %payment_id, subscription_id = %subscription_id, "payment verified");
    Ok(())
}

/// Mark a subscription payment failed, then cancel its subscription
///
/// # Errors
///
/// Returns a backend error if the payment write fails (nothing applied),
/// or `Error::PartialTransition` if the payment write succeeded but the
/// subscription write failed.
pub async fn cancel_subscription_payment(
    client: &RemoteClient,
    payment_id: Uuid,
    subscription_id: Uuid,
) -> Result<()> {
    client
        .update(
            &Query::new("subscription_payments").eq("id", payment_id),
            &json!({ "payment_status": PaymentStatus::Failed }),
        )
        .await?;

    client
        .update(
            &Query::new("subscriptions").eq("id", subscription_id),
            &json!({ "status": SubscriptionStatus::Cancelled }),
        )
        .await
        .map_err(|e| {
            warn!(
                payment_id = %payment_id,
                subscription_id = %subscription_id,
                "payment marked failed but subscription cancellation failed: {e}"
            );
            Error::PartialTransition {
                applied: format!("payment {payment_id} marked failed"),
                failed: format!("subscription {subscription_id} cancellation"),
                message: e.to_string(),
            }
        })?;

    info!(payment_id = %payment_id, subscription_id = %subscription_id, "payment cancelled");
    Ok(())
}

/// Cancel a subscription directly
///
/// A subscription that is already cancelled is left alone: no write is
/// issued and `false` is returned.
///
/// # Errors
///
/// Returns an error if the backend write fails.
pub async fn cancel_subscription(
    client: &RemoteClient,
    subscription: &Subscription,
) -> Result<bool> {
    if subscription.status == SubscriptionStatus::Cancelled {
        return Ok(false);
    }

    client
        .update(
            &Query::new("subscriptions").eq("id", subscription.id),
            &json!({ "status": SubscriptionStatus::Cancelled }),
        )
        .await?;

    info!(subscription_id = %subscription.id, "subscription cancelled");
    Ok(true)
}
