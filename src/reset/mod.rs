//! Password-reset wizard: email → code → new password.
//!
//! The step only advances after the user service confirms the current one. Local
//! checks run first and can stop an attempt, but they never move the flow on
//! their own. The single backwards edge is [`ResetPasswordFlow::resend`].
//!
//! Flow Overview: send a code to the email, verify the code the user typed,
//! then submit the new password together with the email and the verified code.

use crate::{
    api::{AuthApi, ResetPasswordRequest, SendResetCodeRequest, VerifyResetCodeRequest},
    submission::{FlowError, SubmissionState},
    validation::{self, ConfirmationMode, Field},
};
use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use tracing::{debug, info, instrument, warn};

pub const CODE_REQUIRED: &str = "Code is required";
pub const CODE_INVALID: &str = "Invalid code. Please try again.";
pub const NEW_PASSWORD_REQUIRED: &str = "New password is required";
pub const SEND_CODE_FAILED: &str = "Failed to send reset code. Please try again.";
pub const RESET_FAILED: &str = "Failed to reset password. Please try again.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResetStep {
    #[default]
    Email,
    Code,
    Password,
}

impl ResetStep {
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Email => "Reset Your Password",
            Self::Code => "Enter Verification Code",
            Self::Password => "Set New Password",
        }
    }

    #[must_use]
    pub const fn instructions(self) -> &'static str {
        match self {
            Self::Email => "Enter your email to receive a reset code.",
            Self::Code => "Check your email for the reset code and enter it below.",
            Self::Password => "Enter your new password to complete the reset.",
        }
    }
}

impl fmt::Display for ResetStep {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Email => "email",
            Self::Code => "code",
            Self::Password => "password",
        })
    }
}

/// Result of one wizard action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// The flow moved forward to this step.
    Advanced(ResetStep),
    /// The flow moved back to this step. Only `resend` does this.
    Returned(ResetStep),
    /// The attempt failed; the reason is in [`ResetPasswordFlow::error`].
    Stayed,
    /// The password was reset; the caller should navigate away.
    Completed,
    /// The action does not apply to the current step; nothing changed.
    Ignored,
}

/// Input messages for the wizard's fields.
#[derive(Clone)]
pub enum ResetInput {
    Email(String),
    Code(String),
    NewPassword(String),
    ConfirmNewPassword(String),
}

impl fmt::Debug for ResetInput {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email(value) => formatter.debug_tuple("Email").field(value).finish(),
            Self::Code(_) => formatter.write_str("Code([REDACTED])"),
            Self::NewPassword(_) => formatter.write_str("NewPassword([REDACTED])"),
            Self::ConfirmNewPassword(_) => formatter.write_str("ConfirmNewPassword([REDACTED])"),
        }
    }
}

#[derive(Debug, Default)]
pub struct ResetPasswordFlow {
    email: String,
    code: SecretString,
    new_password: SecretString,
    confirm_new_password: SecretString,
    step: ResetStep,
    completed: bool,
    submission: SubmissionState,
}

impl ResetPasswordFlow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn step(&self) -> ResetStep {
        self.step
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn code(&self) -> &str {
        self.code.expose_secret()
    }

    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub const fn submission(&self) -> &SubmissionState {
        &self.submission
    }

    #[must_use]
    pub fn error(&self) -> Option<&FlowError> {
        self.submission.error()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.submission.is_loading()
    }

    pub fn update(&mut self, input: ResetInput) {
        match input {
            ResetInput::Email(value) => self.email = value,
            ResetInput::Code(value) => self.code = SecretString::from(value),
            ResetInput::NewPassword(value) => self.new_password = SecretString::from(value),
            ResetInput::ConfirmNewPassword(value) => {
                self.confirm_new_password = SecretString::from(value);
            }
        }
    }

    /// `Email → Code`. Any code typed earlier is discarded.
    #[instrument(skip_all, fields(step = %self.step))]
    pub async fn send_code(&mut self, api: &dyn AuthApi) -> Transition {
        if self.step != ResetStep::Email {
            debug!("send code ignored outside the email step");
            return Transition::Ignored;
        }

        self.submission.clear_error();
        self.code = SecretString::default();

        if let Some(message) = validation::email_error(&self.email) {
            self.submission
                .set_error(FlowError::for_field(Field::Email, message));
            return Transition::Stayed;
        }

        let request = SendResetCodeRequest {
            email: self.email.clone(),
        };

        let result = {
            let _loading = self.submission.begin();
            api.send_reset_code(&request).await
        };

        match result {
            Ok(()) => {
                info!("reset code sent");
                self.step = ResetStep::Code;
                Transition::Advanced(self.step)
            }
            Err(err) => {
                warn!("failed to send reset code: {}", err);
                let message = err.detail().map_or_else(
                    || SEND_CODE_FAILED.to_string(),
                    |detail| format!("Failed to send reset code: {detail}"),
                );
                self.submission
                    .set_error(FlowError::for_field(Field::Email, message));
                Transition::Stayed
            }
        }
    }

    /// `Code → Password`. Server reasons are not shown for a rejected code.
    #[instrument(skip_all, fields(step = %self.step))]
    pub async fn verify_code(&mut self, api: &dyn AuthApi) -> Transition {
        if self.step != ResetStep::Code {
            debug!("verify code ignored outside the code step");
            return Transition::Ignored;
        }

        self.submission.clear_error();

        if self.code.expose_secret().trim().is_empty() {
            self.submission
                .set_error(FlowError::for_field(Field::Code, CODE_REQUIRED));
            return Transition::Stayed;
        }

        let request = VerifyResetCodeRequest {
            email: self.email.clone(),
            code: self.code.expose_secret().to_string(),
        };

        let result = {
            let _loading = self.submission.begin();
            api.verify_reset_code(&request).await
        };

        match result {
            Ok(()) => {
                self.step = ResetStep::Password;
                Transition::Advanced(self.step)
            }
            Err(err) => {
                warn!("reset code rejected: {}", err);
                self.submission
                    .set_error(FlowError::for_field(Field::Code, CODE_INVALID));
                Transition::Stayed
            }
        }
    }

    /// `Code → Email` without touching the backend.
    pub fn resend(&mut self) -> Transition {
        if self.step != ResetStep::Code {
            return Transition::Ignored;
        }

        self.submission.clear_error();
        self.step = ResetStep::Email;
        Transition::Returned(self.step)
    }

    /// Final action of the `Password` step.
    #[instrument(skip_all, fields(step = %self.step))]
    pub async fn submit_new_password(&mut self, api: &dyn AuthApi) -> Transition {
        if self.step != ResetStep::Password || self.completed {
            debug!("new password ignored outside the password step");
            return Transition::Ignored;
        }

        self.submission.clear_error();

        let new_password = self.new_password.expose_secret();
        if new_password.trim().is_empty() {
            self.submission
                .set_error(FlowError::for_field(Field::NewPassword, NEW_PASSWORD_REQUIRED));
            return Transition::Stayed;
        }

        if !validation::confirmation_matches(
            new_password,
            self.confirm_new_password.expose_secret(),
            ConfirmationMode::Trimmed,
        ) {
            self.submission.set_error(FlowError::for_field(
                Field::ConfirmNewPassword,
                validation::PASSWORDS_MISMATCH,
            ));
            return Transition::Stayed;
        }

        let request = ResetPasswordRequest {
            email: self.email.clone(),
            code: self.code.expose_secret().to_string(),
            new_password: new_password.to_string(),
        };

        let result = {
            let _loading = self.submission.begin();
            api.reset_password(&request).await
        };

        match result {
            Ok(()) => {
                info!("password reset completed");
                self.completed = true;
                Transition::Completed
            }
            Err(err) => {
                warn!("failed to reset password: {}", err);
                self.submission.set_error(FlowError::new(RESET_FAILED));
                Transition::Stayed
            }
        }
    }
}
