//! Password change for a signed-in user.

use crate::{
    api::{AuthApi, ChangePasswordRequest, Session},
    submission::{FlowError, SubmissionState},
};
use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use tracing::{info, instrument, warn};

pub const BOTH_PASSWORDS_REQUIRED: &str = "Both current and new passwords are required";
pub const CHANGE_FAILED: &str = "Failed to change password. Please try again.";

#[derive(Clone)]
pub enum PasswordChangeInput {
    CurrentPassword(String),
    NewPassword(String),
}

impl fmt::Debug for PasswordChangeInput {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CurrentPassword(_) => formatter.write_str("CurrentPassword([REDACTED])"),
            Self::NewPassword(_) => formatter.write_str("NewPassword([REDACTED])"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordChangeOutcome {
    Invalid,
    Changed,
    Failed,
}

#[derive(Debug, Default)]
pub struct ChangePasswordController {
    current_password: SecretString,
    new_password: SecretString,
    submission: SubmissionState,
}

impl ChangePasswordController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn error(&self) -> Option<&FlowError> {
        self.submission.error()
    }

    #[must_use]
    pub const fn submission(&self) -> &SubmissionState {
        &self.submission
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.submission.is_loading()
    }

    /// Both fields are empty again after a successful change.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.current_password.expose_secret().is_empty()
            && self.new_password.expose_secret().is_empty()
    }

    pub fn update(&mut self, input: PasswordChangeInput) {
        match input {
            PasswordChangeInput::CurrentPassword(value) => {
                self.current_password = SecretString::from(value);
            }
            PasswordChangeInput::NewPassword(value) => {
                self.new_password = SecretString::from(value);
            }
        }
    }

    #[instrument(skip_all)]
    pub async fn submit(&mut self, api: &dyn AuthApi, session: &Session) -> PasswordChangeOutcome {
        self.submission.clear_error();

        if self.current_password.expose_secret().trim().is_empty()
            || self.new_password.expose_secret().trim().is_empty()
        {
            self.submission
                .set_error(FlowError::new(BOTH_PASSWORDS_REQUIRED));
            return PasswordChangeOutcome::Invalid;
        }

        let request = ChangePasswordRequest {
            password: self.current_password.expose_secret().to_string(),
            new_password: self.new_password.expose_secret().to_string(),
        };

        let result = {
            let _loading = self.submission.begin();
            api.change_password(session, &request).await
        };

        match result {
            Ok(()) => {
                info!("password changed");
                self.current_password = SecretString::default();
                self.new_password = SecretString::default();
                PasswordChangeOutcome::Changed
            }
            Err(err) => {
                warn!("failed to change password: {}", err);
                self.submission.set_error(FlowError::new(CHANGE_FAILED));
                PasswordChangeOutcome::Failed
            }
        }
    }
}
