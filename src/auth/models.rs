//! Authentication models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Account roles on the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Raises funding for a venture
    Entrepreneur,
    /// Invests in ventures
    Investor,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Entrepreneur => write!(f, "entrepreneur"),
            UserRole::Investor => write!(f, "investor"),
        }
    }
}

/// Canonical user record.
///
/// The backend has been observed to return both snake_case and camelCase
/// field names for the same response; the aliases below accept both so the
/// tolerance lives in exactly one place. Required name fields default to
/// empty strings rather than failing when the backend omits them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    pub email: String,

    #[serde(default, alias = "firstName")]
    pub first_name: String,

    #[serde(default, alias = "lastName")]
    pub last_name: String,

    pub role: UserRole,

    #[serde(alias = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(alias = "updatedAt")]
    pub updated_at: DateTime<Utc>,

    #[serde(default, alias = "companyName", skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,

    #[serde(
        default,
        alias = "phoneNumber",
        alias = "phone",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone_number: Option<String>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// The backend serializes ids as numbers in some responses; accept either shape
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct IdVisitor;

    impl serde::de::Visitor<'_> for IdVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a string or a number")
        }

        fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

/// Login form input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
    /// Which dashboard the caller intends to land on; not sent to the
    /// backend, which derives the role from the account itself
    pub role: UserRole,
}

/// Registration payload: typed core fields plus the free-form role-specific
/// profile (entrepreneur and investor fields overlap in one structure; the
/// role determines which subset is semantically required).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterData {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub role: UserRole,

    /// Role-specific fields (company_name, funding_amount, job_title,
    /// preferred_industries, ...). Keys may arrive camelCase from
    /// user-supplied JSON; they are snake-cased before sending.
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

/// What callers get back from a successful login or registration
#[derive(Debug, Clone)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
    pub refresh_token: Option<String>,
    pub message: Option<String>,
}

/// Successful auth responses arrive as
/// `{ status: { code, message }, data: { user, token } }`
#[derive(Debug, Deserialize)]
pub struct AuthEnvelope {
    pub status: ResponseStatus,
    pub data: AuthData,
}

#[derive(Debug, Deserialize)]
pub struct ResponseStatus {
    pub code: u16,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct AuthData {
    pub user: User,
    pub token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Body of a successful `/auth/refresh` exchange
#[derive(Debug, Deserialize)]
pub struct RefreshResponse {
    pub token: String,
}
