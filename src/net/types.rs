//! Wire DTOs for the account REST API.
//!
//! DESIGN
//! ======
//! These types mirror the backend's auth payloads so serde round-trips stay
//! lossless. Optional profile fields are `Option<T>`: an absent field means
//! "not provided", never "false" or "empty". PATCH bodies skip unset fields
//! so the server only sees the attributes the user actually changed.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// The canonical authenticated user as returned by `GET /api/auth/user/`.
///
/// Treated as an immutable snapshot: the session cache replaces it wholesale
/// on every successful fetch or server-confirmed mutation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: i64,
    /// Primary account email.
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    /// Whether the phone number has been verified.
    #[serde(default)]
    pub phone_verified: bool,
    /// Whether the account email has been verified.
    #[serde(default)]
    pub email_verified: bool,
    /// Whether identity documents have been verified.
    #[serde(default)]
    pub identity_verified: bool,
    /// Marketing email opt-in.
    #[serde(default)]
    pub marketing_emails: bool,
    #[serde(default)]
    pub accepted_terms: bool,
    #[serde(default)]
    pub accepted_privacy_policy: bool,
}

impl User {
    /// Short display name: first name if provided, otherwise the local part
    /// of the email address.
    pub fn display_name(&self) -> &str {
        match self.first_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => self.email.split('@').next().unwrap_or(&self.email),
        }
    }
}

/// Credential pair for `POST /api/auth/login/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

/// Registration payload for `POST /api/auth/registration/`.
///
/// `password1`/`password2` are both sent; the server re-checks the match.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password1: String,
    pub password2: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// ISO 8601 date, required by the age gate.
    pub date_of_birth: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drivers_license_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drivers_license_expiry: Option<String>,
    pub accepted_terms: bool,
    pub accepted_privacy_policy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marketing_emails: Option<bool>,
}

/// Partial profile update for `PATCH /api/auth/profile/`.
///
/// Every field is optional; unset fields are omitted from the request body
/// entirely so the server leaves them untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drivers_license_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drivers_license_expiry: Option<String>,
}

/// Password change payload for `POST /api/auth/password/change/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password1: String,
    pub new_password2: String,
}

/// Email change payload, sent as a `PATCH /api/auth/profile/`.
///
/// The server may reset derived fields (e.g. `email_verified`) as a side
/// effect, which is why the session core re-fetches after this mutation
/// instead of trusting the local payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailChange {
    pub email: String,
    pub current_password: String,
}

/// Marketing preference toggle, sent as a `PATCH /api/auth/profile/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketingPreferences {
    pub marketing_emails: bool,
}
