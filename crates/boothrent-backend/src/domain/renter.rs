//! Renter entity and creation-form validation.
//!
//! Serialized field names follow the cloud document layout (camelCase), so
//! the in-memory store and a real document backend stay byte-compatible.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult, Entity};

/// Lifecycle status of a renter. Archived renters stay queryable; only a
/// permanent delete removes the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenterStatus {
    Active,
    Archived,
}

impl RenterStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RenterStatus::Active => "active",
            RenterStatus::Archived => "archived",
        }
    }
}

/// A tenant/customer record owned by exactly one business-owner uid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Renter {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub status: RenterStatus,
    pub monthly_rent: f64,
    pub due_day_of_month: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade_letter: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Renter {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }
}

/// Raw field values as they come out of the creation form. Empty strings
/// mean "omitted" and fall back to the documented defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewRenterInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub monthly_rent: String,
    pub due_day_of_month: String,
}

/// Validated input for creating a renter. The store assigns the id, status
/// and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct RenterDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub monthly_rent: f64,
    pub due_day_of_month: u8,
}

impl RenterDraft {
    /// Validates raw form input. Messages are user-facing and shown inline;
    /// no write happens when this fails.
    pub fn parse(input: NewRenterInput) -> DomainResult<RenterDraft> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::InvalidInput("Renter Name is required.".into()));
        }

        let due_day_of_month = match input.due_day_of_month.trim() {
            "" => 1,
            raw => match raw.parse::<i64>() {
                Ok(day) if (1..=28).contains(&day) => day as u8,
                _ => {
                    return Err(DomainError::InvalidInput(
                        "Due day must be between 1 and 28.".into(),
                    ))
                }
            },
        };

        let monthly_rent = match input.monthly_rent.trim() {
            "" => 0.0,
            raw => match raw.parse::<f64>() {
                Ok(amount) if amount.is_finite() && amount >= 0.0 => amount,
                _ => {
                    return Err(DomainError::InvalidInput(
                        "Monthly rent must be a non-negative number.".into(),
                    ))
                }
            },
        };

        Ok(RenterDraft {
            name,
            email: input.email.trim().to_string(),
            phone: input.phone.trim().to_string(),
            monthly_rent,
            due_day_of_month,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, rent: &str, due: &str) -> NewRenterInput {
        NewRenterInput {
            name: name.to_string(),
            email: "renter@example.com".to_string(),
            phone: "(555) 010-9999".to_string(),
            monthly_rent: rent.to_string(),
            due_day_of_month: due.to_string(),
        }
    }

    #[test]
    fn empty_name_is_rejected_with_exact_message() {
        let err = RenterDraft::parse(input("   ", "850", "1")).unwrap_err();
        assert_eq!(err.message(), "Renter Name is required.");
    }

    #[test]
    fn due_day_out_of_range_is_rejected() {
        let err = RenterDraft::parse(input("Maya Torres", "850", "29")).unwrap_err();
        assert_eq!(err.message(), "Due day must be between 1 and 28.");

        let err = RenterDraft::parse(input("Maya Torres", "850", "0")).unwrap_err();
        assert_eq!(err.message(), "Due day must be between 1 and 28.");
    }

    #[test]
    fn non_integer_due_day_is_rejected() {
        let err = RenterDraft::parse(input("Maya Torres", "850", "7.5")).unwrap_err();
        assert_eq!(err.message(), "Due day must be between 1 and 28.");
    }

    #[test]
    fn negative_or_malformed_rent_is_rejected() {
        let err = RenterDraft::parse(input("Maya Torres", "-10", "1")).unwrap_err();
        assert_eq!(err.message(), "Monthly rent must be a non-negative number.");

        let err = RenterDraft::parse(input("Maya Torres", "lots", "1")).unwrap_err();
        assert_eq!(err.message(), "Monthly rent must be a non-negative number.");
    }

    #[test]
    fn omitted_fields_fall_back_to_defaults() {
        let draft = RenterDraft::parse(input("Maya Torres", "", "")).unwrap();
        assert_eq!(draft.monthly_rent, 0.0);
        assert_eq!(draft.due_day_of_month, 1);
    }

    #[test]
    fn fields_are_trimmed() {
        let draft = RenterDraft::parse(input("  Maya Torres  ", " 850 ", " 12 ")).unwrap();
        assert_eq!(draft.name, "Maya Torres");
        assert_eq!(draft.monthly_rent, 850.0);
        assert_eq!(draft.due_day_of_month, 12);
    }
}
