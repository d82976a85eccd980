//! User profile and the static role → permission table.
//!
//! DESIGN
//! ======
//! Permissions are derived on the client from the backend's role label. They
//! gate UI visibility only; the backend enforces its own rules.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use serde::{Deserialize, Serialize};

use crate::api::LoginData;

/// Permission granted to every authenticated user, including unknown roles.
pub const BASELINE_PERMISSION: &str = "survey_dashboard_view";

/// Department label shown for every portal user.
pub const DEFAULT_DEPARTMENT: &str = "Survey Management";

/// Domain appended to the username to form the profile email.
pub const EMAIL_DOMAIN: &str = "tnilp.com";

const RURAL_ADMIN: &[&str] = &[
    "survey_dashboard_view",
    "survey_users_manage",
    "pat_indicator_view",
    "user_master_manage",
    "survey_data_export",
    "reports_generate",
];

const SURVEYOR: &[&str] = &["survey_dashboard_view", "survey_data_entry", "pat_indicator_view"];

const SUPERVISOR: &[&str] = &[
    "survey_dashboard_view",
    "survey_users_view",
    "pat_indicator_view",
    "survey_data_validate",
];

/// Permissions for a backend role label. Unrecognized roles get only
/// [`BASELINE_PERMISSION`].
#[must_use]
pub fn permissions_for_role(role: &str) -> Vec<String> {
    let table = match role {
        "RuralAdmin" => RURAL_ADMIN,
        "Surveyor" => SURVEYOR,
        "Supervisor" => SUPERVISOR,
        _ => &[BASELINE_PERMISSION],
    };
    table.iter().map(|p| (*p).to_owned()).collect()
}

/// Client-side record of the signed-in user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: String,
    /// Backend role label (e.g. `"RuralAdmin"`).
    pub role: String,
    pub permissions: Vec<String>,
    pub department: String,
    /// Login time in seconds since the Unix epoch.
    pub last_login: u64,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ulb_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panchayat_id: Option<i64>,
}

impl UserProfile {
    /// Build a profile from the login payload, stamped with `now` (unix secs).
    #[must_use]
    pub fn from_login(data: &LoginData, now: u64) -> Self {
        let full_name = format!("{} {}", data.first_name, data.last_name).trim().to_owned();
        Self {
            id: data.user_id,
            username: data.username.clone(),
            email: format!("{}@{EMAIL_DOMAIN}", data.username),
            full_name,
            role: data.role_type_name.clone(),
            permissions: permissions_for_role(&data.role_type_name),
            department: DEFAULT_DEPARTMENT.to_owned(),
            last_login: now,
            is_active: true,
            district_id: data.district_id,
            ulb_id: data.ulb_id,
            panchayat_id: data.panchayat_id,
        }
    }

    #[must_use]
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }

    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.role == role
    }
}
