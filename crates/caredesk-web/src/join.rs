//! Client-side join of doctor-role users to doctor profiles
//!
//! The backend exposes users and doctor profiles as separate collections;
//! the doctors page fetches both and joins them here on `user_id`. A
//! doctor-role user may have no profile yet: that row keeps empty profile
//! fields and the page offers profile creation instead of editing.

use caredesk_core::types::{DoctorProfile, Role, UserAccount};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

/// One merged row of the doctors page
#[derive(Debug, Clone, Serialize)]
pub struct DoctorRow {
    /// Profile id, `None` when the user has no profile yet
    pub id: Option<Uuid>,
    /// The underlying user account
    pub user_id: Uuid,
    /// User display name
    pub full_name: String,
    /// User email
    pub email: String,
    /// User phone
    pub phone: Option<String>,
    /// Medical council registration number, empty without a profile
    pub registration_number: String,
    /// Specialization, empty without a profile
    pub specialization: String,
    /// Qualification summary
    pub qualification: Option<String>,
    /// Consultation fee, `None` without a profile
    pub consultation_fee: Option<Decimal>,
    /// When the user account was created
    pub created_at: DateTime<Utc>,
}

impl DoctorRow {
    /// Whether a profile is attached
    #[must_use]
    pub const fn has_profile(&self) -> bool {
        self.id.is_some()
    }
}

/// Left-join doctor-role users to their profiles on `user_id`
///
/// Non-doctor users are skipped; user order is preserved. Each user joins
/// at most one profile.
#[must_use]
pub fn merge_doctor_rows(users: &[UserAccount], profiles: &[DoctorProfile]) -> Vec<DoctorRow> {
    let by_user: HashMap<Uuid, &DoctorProfile> = profiles
        .iter()
        .map(|profile| (profile.user_id, profile))
        .collect();

    users
        .iter()
        .filter(|user| user.role == Role::Doctor)
        .map(|user| {
            let profile = by_user.get(&user.id);
            DoctorRow {
                id: profile.map(|p| p.id),
                user_id: user.id,
                full_name: user.full_name.clone(),
                email: user.email.clone(),
                phone: user.phone.clone(),
                registration_number: profile
                    .map(|p| p.registration_number.clone())
                    .unwrap_or_default(),
                specialization: profile
                    .map(|p| p.specialization.clone())
                    .unwrap_or_default(),
                qualification: profile.and_then(|p| p.qualification.clone()),
                consultation_fee: profile.map(|p| p.consultation_fee),
                created_at: user.created_at,
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn user(role: Role, name: &str) -> UserAccount {
        UserAccount {
            id: Uuid::new_v4(),
            full_name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            phone: None,
            role,
            gender: None,
            date_of_birth: None,
            created_at: Utc::now(),
        }
    }

    fn profile_for(user: &UserAccount) -> DoctorProfile {
        DoctorProfile {
            id: Uuid::new_v4(),
            user_id: user.id,
            registration_number: "BMDC-1234".to_string(),
            specialization: "Cardiology".to_string(),
            qualification: Some("MBBS, FCPS".to_string()),
            consultation_fee: Decimal::new(50000, 2),
            bio: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_doctor_with_profile_is_fully_merged() {
        let doctor = user(Role::Doctor, "Karim Uddin");
        let profile = profile_for(&doctor);

        let rows = merge_doctor_rows(&[doctor.clone()], &[profile.clone()]);

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.id, Some(profile.id));
        assert_eq!(row.user_id, doctor.id);
        assert_eq!(row.full_name, "Karim Uddin");
        assert_eq!(row.specialization, "Cardiology");
        assert_eq!(row.registration_number, "BMDC-1234");
        assert_eq!(row.consultation_fee, Some(Decimal::new(50000, 2)));
        assert!(row.has_profile());
    }

    #[test]
    fn test_doctor_without_profile_has_empty_fields() {
        let doctor = user(Role::Doctor, "Selina Akter");

        let rows = merge_doctor_rows(&[doctor], &[]);

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.id, None);
        assert_eq!(row.specialization, "");
        assert_eq!(row.registration_number, "");
        assert_eq!(row.consultation_fee, None);
        assert!(!row.has_profile());
    }

    #[test]
    fn test_non_doctor_users_are_skipped() {
        let patient = user(Role::Patient, "Ayesha Rahman");
        let admin = user(Role::Admin, "Root Admin");
        let doctor = user(Role::Doctor, "Karim Uddin");

        let rows = merge_doctor_rows(&[patient, admin, doctor], &[]);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].full_name, "Karim Uddin");
    }

    #[test]
    fn test_profiles_of_other_users_do_not_attach() {
        let doctor_a = user(Role::Doctor, "Doctor A");
        let doctor_b = user(Role::Doctor, "Doctor B");
        let profile_b = profile_for(&doctor_b);

        let rows = merge_doctor_rows(&[doctor_a, doctor_b], &[profile_b.clone()]);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, None);
        assert_eq!(rows[1].id, Some(profile_b.id));
    }

    #[test]
    fn test_user_order_is_preserved() {
        let first = user(Role::Doctor, "First Doctor");
        let second = user(Role::Doctor, "Second Doctor");

        let rows = merge_doctor_rows(&[first, second], &[]);

        assert_eq!(rows[0].full_name, "First Doctor");
        assert_eq!(rows[1].full_name, "Second Doctor");
    }
}
