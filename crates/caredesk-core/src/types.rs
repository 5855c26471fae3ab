//! Domain records for the caredesk admin dashboard
//!
//! These mirror the collections exposed by the hosted backend. The client
//! holds no authoritative state beyond the last fetch; all referential
//! integrity lives server-side.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Account role enumeration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Platform patient
    Patient,
    /// Consulting doctor
    Doctor,
    /// Platform administrator
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Patient => write!(f, "patient"),
            Self::Doctor => write!(f, "doctor"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// A platform user account
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UserAccount {
    /// Unique identifier
    pub id: Uuid,

    /// Display name
    #[validate(length(min = 1, max = 255))]
    pub full_name: String,

    /// Contact email
    #[validate(email)]
    pub email: String,

    /// Contact phone number
    #[validate(length(max = 32))]
    pub phone: Option<String>,

    /// Account role; determines which other records reference this user
    pub role: Role,

    /// Self-reported gender
    pub gender: Option<String>,

    /// Date of birth
    pub date_of_birth: Option<NaiveDate>,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// A doctor profile, optionally attached to a doctor-role user
///
/// Profile creation is a distinct action from user creation: a doctor-role
/// user may have zero or one profile.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DoctorProfile {
    /// Unique identifier
    pub id: Uuid,

    /// The user this profile belongs to
    pub user_id: Uuid,

    /// Medical council registration number
    #[validate(length(min = 1, max = 64))]
    pub registration_number: String,

    /// Medical specialization
    #[validate(length(min = 1, max = 255))]
    pub specialization: String,

    /// Qualification summary
    pub qualification: Option<String>,

    /// Per-consultation fee
    pub consultation_fee: Decimal,

    /// Free-form biography
    pub bio: Option<String>,

    /// When the profile was created
    pub created_at: DateTime<Utc>,
}

/// Consultation delivery channel
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConsultationType {
    /// Video call
    Video,
    /// Audio call
    Audio,
    /// Text chat
    Text,
}

impl std::fmt::Display for ConsultationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Video => write!(f, "video"),
            Self::Audio => write!(f, "audio"),
            Self::Text => write!(f, "text"),
        }
    }
}

/// Consultation lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConsultationStatus {
    /// Booked and upcoming
    #[default]
    Scheduled,
    /// Took place
    Completed,
    /// Called off
    Cancelled,
}

impl std::fmt::Display for ConsultationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scheduled => write!(f, "scheduled"),
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// A consultation between a patient and a doctor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Consultation {
    /// Unique identifier
    pub id: Uuid,

    /// The patient user
    pub patient_id: Uuid,

    /// The doctor profile
    pub doctor_id: Uuid,

    /// Delivery channel
    pub consultation_type: ConsultationType,

    /// Lifecycle status
    pub status: ConsultationStatus,

    /// When the consultation is scheduled to take place
    pub scheduled_at: DateTime<Utc>,

    /// When the record was created
    pub created_at: DateTime<Utc>,
}

/// Payment lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Awaiting verification
    #[default]
    Pending,
    /// Verified and settled
    Completed,
    /// Rejected or errored
    Failed,
    /// Returned to the payer
    Refunded,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
            Self::Refunded => write!(f, "refunded"),
        }
    }
}

/// A general payment record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier
    pub id: Uuid,

    /// The paying user
    pub user_id: Uuid,

    /// Amount charged
    pub amount: Decimal,

    /// Payment channel (bkash, nagad, card, ...)
    pub payment_method: String,

    /// Lifecycle status
    pub payment_status: PaymentStatus,

    /// Provider transaction reference
    pub transaction_id: Option<String>,

    /// When the payment was created
    pub created_at: DateTime<Utc>,
}

/// A payment attached to a single consultation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsultationPayment {
    /// Unique identifier
    pub id: Uuid,

    /// The paying user
    pub user_id: Uuid,

    /// The consultation paid for
    pub consultation_id: Uuid,

    /// Amount charged after discount
    pub amount: Decimal,

    /// Payment channel
    pub payment_method: String,

    /// Lifecycle status
    pub payment_status: PaymentStatus,

    /// Provider transaction reference
    pub transaction_id: Option<String>,

    /// Discount subtracted from the original amount
    pub discount_applied: Option<Decimal>,

    /// Amount before discount
    pub original_amount: Option<Decimal>,

    /// When the payment was created
    pub created_at: DateTime<Utc>,
}

/// A payment attached to a subscription
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionPayment {
    /// Unique identifier
    pub id: Uuid,

    /// The paying user
    pub user_id: Uuid,

    /// The subscription paid for
    pub subscription_id: Uuid,

    /// Amount charged
    pub amount: Decimal,

    /// Payment channel
    pub payment_method: String,

    /// Lifecycle status
    pub payment_status: PaymentStatus,

    /// Provider transaction reference
    pub transaction_id: Option<String>,

    /// When the payment was created
    pub created_at: DateTime<Utc>,
}

/// Subscription lifecycle status
///
/// Mutated indirectly when the linked payment is verified or cancelled;
/// the two writes are independent and carry no transactional guarantee.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Awaiting payment verification
    #[default]
    Pending,
    /// In force
    Active,
    /// Past its end date
    Expired,
    /// Terminated by an operator or the user
    Cancelled,
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Active => write!(f, "active"),
            Self::Expired => write!(f, "expired"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// A user's subscription to a plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    /// Unique identifier
    pub id: Uuid,

    /// The subscribing user
    pub user_id: Uuid,

    /// The subscribed plan
    pub plan_id: Uuid,

    /// Denormalized plan name for display
    pub plan_name: String,

    /// When coverage starts
    pub start_date: DateTime<Utc>,

    /// When coverage ends
    pub end_date: DateTime<Utc>,

    /// Renew automatically at end date
    pub auto_renew: bool,

    /// Lifecycle status
    pub status: SubscriptionStatus,

    /// When the record was created
    pub created_at: DateTime<Utc>,
}

/// A purchasable subscription plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionPlan {
    /// Unique identifier
    pub id: Uuid,

    /// Plan display name
    pub name: String,

    /// Plan price
    pub price: Decimal,

    /// Coverage duration in days
    pub duration_days: i32,

    /// When the plan was created
    pub created_at: DateTime<Utc>,
}

/// A patient's rating of a consultation
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Rating {
    /// Unique identifier
    pub id: Uuid,

    /// The rated consultation
    pub consultation_id: Uuid,

    /// The rating patient
    pub patient_id: Uuid,

    /// The rated doctor profile
    pub doctor_id: Uuid,

    /// Score from 1 to 5
    #[validate(range(min = 1, max = 5))]
    pub score: i16,

    /// Free-form review text
    pub review: Option<String>,

    /// When the rating was created
    pub created_at: DateTime<Utc>,
}

/// A notification delivered to a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Unique identifier
    pub id: Uuid,

    /// The receiving user
    pub user_id: Uuid,

    /// Notification title
    pub title: String,

    /// Notification body
    pub body: String,

    /// Whether the user has read it
    pub read: bool,

    /// When the notification was created
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
#[allow(clippy::uninlined_format_args)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_user(role: Role) -> UserAccount {
        UserAccount {
            id: Uuid::new_v4(),
            full_name: "Ayesha Rahman".to_string(),
            email: "ayesha@example.com".to_string(),
            phone: Some("+8801700000000".to_string()),
            role,
            gender: Some("female".to_string()),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 4, 12),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_role_display_and_serde() {
        assert_eq!(Role::Patient.to_string(), "patient");
        assert_eq!(Role::Doctor.to_string(), "doctor");
        assert_eq!(Role::Admin.to_string(), "admin");

        let json = serde_json::to_string(&Role::Doctor).unwrap();
        assert_eq!(json, "\"doctor\"");
        let parsed: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(parsed, Role::Admin);
    }

    #[test]
    fn test_payment_status_wire_form_matches_display() {
        for status in [
            PaymentStatus::Pending,
            PaymentStatus::Completed,
            PaymentStatus::Failed,
            PaymentStatus::Refunded,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status));
            let parsed: PaymentStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_subscription_status_wire_form_matches_display() {
        for status in [
            SubscriptionStatus::Pending,
            SubscriptionStatus::Active,
            SubscriptionStatus::Expired,
            SubscriptionStatus::Cancelled,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status));
            let parsed: SubscriptionStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_consultation_enums_round_trip() {
        let parsed: ConsultationType = serde_json::from_str("\"video\"").unwrap();
        assert_eq!(parsed, ConsultationType::Video);
        assert_eq!(ConsultationType::Text.to_string(), "text");

        let parsed: ConsultationStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(parsed, ConsultationStatus::Cancelled);
    }

    #[test]
    fn test_status_defaults() {
        assert_eq!(PaymentStatus::default(), PaymentStatus::Pending);
        assert_eq!(SubscriptionStatus::default(), SubscriptionStatus::Pending);
        assert_eq!(ConsultationStatus::default(), ConsultationStatus::Scheduled);
    }

    #[test]
    fn test_user_account_validation() {
        let user = sample_user(Role::Patient);
        assert!(user.validate().is_ok());

        let mut invalid = sample_user(Role::Patient);
        invalid.email = "not-an-email".to_string();
        assert!(invalid.validate().is_err());

        let mut empty_name = sample_user(Role::Patient);
        empty_name.full_name = String::new();
        assert!(empty_name.validate().is_err());
    }

    #[test]
    fn test_user_account_deserializes_backend_row() {
        let json = r#"{
            "id": "b9c7a2ce-40ac-4b41-8a33-3f1f3d6a6a01",
            "full_name": "Dr. Karim Uddin",
            "email": "karim@example.com",
            "phone": null,
            "role": "doctor",
            "gender": "male",
            "date_of_birth": "1978-11-02",
            "created_at": "2025-05-01T10:30:00Z"
        }"#;

        let user: UserAccount = serde_json::from_str(json).unwrap();
        assert_eq!(user.role, Role::Doctor);
        assert_eq!(user.full_name, "Dr. Karim Uddin");
        assert!(user.phone.is_none());
        assert_eq!(
            user.date_of_birth,
            NaiveDate::from_ymd_opt(1978, 11, 2)
        );
    }

    #[test]
    fn test_consultation_payment_discount_fields() {
        let json = r#"{
            "id": "0a0c2f9e-92cf-41f1-93a4-7d6df5d0e001",
            "user_id": "b9c7a2ce-40ac-4b41-8a33-3f1f3d6a6a01",
            "consultation_id": "57a7d5cc-6a7a-4a9a-ae5b-000000000001",
            "amount": "100.00",
            "payment_method": "bkash",
            "payment_status": "completed",
            "transaction_id": "TXN-1001",
            "discount_applied": "20.00",
            "original_amount": "120.00",
            "created_at": "2025-06-01T09:00:00Z"
        }"#;

        let payment: ConsultationPayment = serde_json::from_str(json).unwrap();
        assert_eq!(payment.payment_status, PaymentStatus::Completed);
        assert_eq!(payment.amount, Decimal::new(10000, 2));
        assert_eq!(payment.discount_applied, Some(Decimal::new(2000, 2)));
        assert_eq!(payment.original_amount, Some(Decimal::new(12000, 2)));
    }

    #[test]
    fn test_rating_validation_bounds() {
        let mut rating = Rating {
            id: Uuid::new_v4(),
            consultation_id: Uuid::new_v4(),
            patient_id: Uuid::new_v4(),
            doctor_id: Uuid::new_v4(),
            score: 5,
            review: Some("Very helpful".to_string()),
            created_at: Utc::now(),
        };
        assert!(rating.validate().is_ok());

        rating.score = 0;
        assert!(rating.validate().is_err());

        rating.score = 6;
        assert!(rating.validate().is_err());
    }

    #[test]
    fn test_subscription_serializes_status_snake_case() {
        let subscription = Subscription {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            plan_id: Uuid::new_v4(),
            plan_name: "Family Plus".to_string(),
            start_date: Utc::now(),
            end_date: Utc::now(),
            auto_renew: true,
            status: SubscriptionStatus::Active,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&subscription).unwrap();
        assert_eq!(json["status"], "active");
        assert_eq!(json["plan_name"], "Family Plus");
    }
}
