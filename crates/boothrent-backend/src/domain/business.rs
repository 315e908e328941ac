//! Business profile: the per-uid account document created at sign-up.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Profile document stored under the owner's uid. Field names match the
/// cloud document layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessProfile {
    pub business_name: String,
    pub phone: String,
    pub address1: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub members_enabled: bool,
    pub owner_uid: String,
}

/// Profile fields collected by the sign-up form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusinessProfileInput {
    pub business_name: String,
    pub phone: String,
    pub address1: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl BusinessProfileInput {
    /// Fills in the server-assigned fields to build the stored document.
    pub fn into_profile(self, owner_uid: &str, created_at: DateTime<Utc>) -> BusinessProfile {
        BusinessProfile {
            business_name: self.business_name,
            phone: self.phone,
            address1: self.address1,
            city: self.city,
            state: self.state,
            zip: self.zip,
            logo_url: None,
            created_at,
            members_enabled: false,
            owner_uid: owner_uid.to_string(),
        }
    }
}
