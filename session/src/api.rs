//! Backend wire types for the login endpoint.
//!
//! DESIGN
//! ======
//! The backend answers login with a loosely shaped JSON object whose `status`
//! flag decides which other fields are meaningful. The body is decoded once
//! into [`LoginOutcome`] so nothing downstream inspects raw JSON.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Path of the login endpoint, relative to the API base URL.
pub const LOGIN_PATH: &str = "Adminrural/login";

/// Message used when the backend rejects a login without saying why.
pub const DEFAULT_LOGIN_FAILURE: &str = "Login failed";

/// Message used when the login request itself fails at the HTTP level.
pub const DEFAULT_LOGIN_HTTP_FAILURE: &str = "Login failed. Please check your credentials.";

/// Message returned with a successful login when the backend sends none.
pub const DEFAULT_LOGIN_SUCCESS: &str = "Login successful";

/// Join the API base URL and the login path.
#[must_use]
pub fn login_url(api_base: &str) -> String {
    format!("{}/{LOGIN_PATH}", api_base.trim_end_matches('/'))
}

/// Credentials posted to the login endpoint.
#[derive(Clone, Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// User fields returned inside a successful login payload.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub user_id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub role_id: Option<i64>,
    #[serde(default)]
    pub role_type_id: Option<i64>,
    #[serde(default)]
    pub role_type_name: String,
    #[serde(default)]
    pub district_id: Option<i64>,
    #[serde(default)]
    pub ulb_id: Option<i64>,
    #[serde(default)]
    pub panchayat_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLoginResponse {
    #[serde(default)]
    status: bool,
    #[serde(default, rename = "access_token")]
    access_token: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<LoginData>,
}

/// Decoded login reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    Accepted { token: String, data: LoginData, message: String },
    Rejected { message: String },
}

impl LoginOutcome {
    /// Decode a 2xx login response body.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Decode`] if the body is not JSON of the
    /// expected shape, or if it reports success without a token or user data.
    pub fn decode(body: &str) -> Result<Self, SessionError> {
        let raw: RawLoginResponse =
            serde_json::from_str(body).map_err(|e| SessionError::Decode(e.to_string()))?;
        let message = raw.message.filter(|m| !m.trim().is_empty());

        if !raw.status {
            return Ok(Self::Rejected { message: message.unwrap_or_else(|| DEFAULT_LOGIN_FAILURE.to_owned()) });
        }

        let token = raw
            .access_token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| SessionError::Decode("login accepted without access_token".to_owned()))?;
        let data = raw
            .data
            .ok_or_else(|| SessionError::Decode("login accepted without user data".to_owned()))?;

        Ok(Self::Accepted { token, data, message: message.unwrap_or_else(|| DEFAULT_LOGIN_SUCCESS.to_owned()) })
    }
}

/// Pull a human-readable `message` out of an error response body.
#[must_use]
pub fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_owned)
}
