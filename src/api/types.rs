//! Request and response payloads for the user service. Requests carry
//! passwords and reset codes, so they implement `Debug` by hand and must never be
//! logged in full.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SendResetCodeRequest {
    pub email: String,
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerifyResetCodeRequest {
    pub email: String,
    pub code: String,
}

impl fmt::Debug for VerifyResetCodeRequest {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("VerifyResetCodeRequest")
            .field("email", &self.email)
            .field("code", &"[REDACTED]")
            .finish()
    }
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub code: String,
    pub new_password: String,
}

impl fmt::Debug for ResetPasswordRequest {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ResetPasswordRequest")
            .field("email", &self.email)
            .field("code", &"[REDACTED]")
            .field("new_password", &"[REDACTED]")
            .finish()
    }
}

/// Signup payload. The service names the display name `username`.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    #[serde(rename = "username")]
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("RegisterRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("confirm_password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Password change for the signed-in user: current password plus the new one.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChangePasswordRequest {
    pub password: String,
    pub new_password: String,
}

impl fmt::Debug for ChangePasswordRequest {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ChangePasswordRequest")
            .field("password", &"[REDACTED]")
            .field("new_password", &"[REDACTED]")
            .finish()
    }
}

/// Public profile returned alongside tokens.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserSummary {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
}

impl UserSummary {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some("ADMIN")
    }
}

/// Tokens plus profile, as returned by signup and login.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub access: String,
    pub refresh: String,
    #[serde(default)]
    pub user: UserSummary,
}

impl fmt::Debug for Session {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Session")
            .field("access", &"[REDACTED]")
            .field("refresh", &"[REDACTED]")
            .field("user", &self.user)
            .finish()
    }
}

pub type RegisterResponse = Session;

/// Login replies either wrap the session in `data` or return it flat.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub(crate) enum LoginEnvelope {
    Wrapped { data: Session },
    Flat(Session),
}

impl LoginEnvelope {
    pub(crate) fn into_session(self) -> Session {
        match self {
            Self::Wrapped { data } | Self::Flat(data) => data,
        }
    }
}

pub type LoginResponse = Session;

/// Error body shapes seen from the service: `{"error": ..}` or `{"detail": ..}`.
#[derive(Clone, Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl ErrorBody {
    pub(crate) fn into_message(self) -> Option<String> {
        self.error
            .or(self.detail)
            .map(|message| message.trim().to_string())
            .filter(|message| !message.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn register_request_uses_service_field_names() {
        let request = RegisterRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "Passw0rd!".to_string(),
            confirm_password: "Passw0rd!".to_string(),
        };
        let value = serde_json::to_value(&request).ok();
        assert_eq!(
            value,
            Some(json!({
                "username": "Ada",
                "email": "ada@example.com",
                "password": "Passw0rd!",
                "confirm_password": "Passw0rd!",
            }))
        );
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let request = ResetPasswordRequest {
            email: "ada@example.com".to_string(),
            code: "12345678".to_string(),
            new_password: "Passw0rd!".to_string(),
        };
        let rendered = format!("{request:?}");
        assert!(rendered.contains("ada@example.com"));
        assert!(!rendered.contains("12345678"));
        assert!(!rendered.contains("Passw0rd!"));
    }

    #[test]
    fn login_envelope_accepts_wrapped_and_flat() {
        let wrapped: Result<LoginEnvelope, _> = serde_json::from_value(json!({
            "data": {"access": "a", "refresh": "r", "user": {"id": 7, "username": "ada", "email": "ada@example.com", "role": "ADMIN"}}
        }));
        let session = wrapped.map(LoginEnvelope::into_session).ok();
        assert_eq!(session.as_ref().map(|s| s.access.as_str()), Some("a"));
        assert_eq!(session.as_ref().and_then(|s| s.user.id), Some(7));
        assert!(session.is_some_and(|s| s.user.is_admin()));

        let flat: Result<LoginEnvelope, _> =
            serde_json::from_value(json!({"access": "a", "refresh": "r"}));
        let session = flat.map(LoginEnvelope::into_session).ok();
        assert_eq!(session.map(|s| s.refresh), Some("r".to_string()));
    }

    #[test]
    fn error_body_prefers_error_then_detail() {
        let body: ErrorBody =
            serde_json::from_value(json!({"error": "unknown account", "detail": "x"}))
                .unwrap_or_default();
        assert_eq!(body.into_message(), Some("unknown account".to_string()));

        let body: ErrorBody =
            serde_json::from_value(json!({"detail": "Not found."})).unwrap_or_default();
        assert_eq!(body.into_message(), Some("Not found.".to_string()));

        let body: ErrorBody = serde_json::from_value(json!({"error": "  "})).unwrap_or_default();
        assert_eq!(body.into_message(), None);
    }
}
