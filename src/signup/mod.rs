//! Single-step signup form.
//!
//! Input arrives as [`SignupInput`] messages. Editing a field clears its error;
//! editing either password also refreshes the strength meter and the
//! "Passwords don't match" hint straight away. Everything else is checked only
//! on submit, and a form with errors never reaches the user service.

use crate::{
    api::{AuthApi, RegisterRequest, RegisterResponse},
    submission::{FlowError, SubmissionState},
    validation::{
        self, ConfirmationMode, Field, PasswordStrength, SignupFields, ValidationErrors,
    },
};
use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use tracing::{info, instrument, warn};

pub const SUBMIT_FAILED: &str = "An error occurred. Please try again.";

#[derive(Clone)]
pub enum SignupInput {
    Name(String),
    Email(String),
    Password(String),
    ConfirmPassword(String),
    AgreeTerms(bool),
}

impl SignupInput {
    #[must_use]
    pub const fn field(&self) -> Field {
        match self {
            Self::Name(_) => Field::Name,
            Self::Email(_) => Field::Email,
            Self::Password(_) => Field::Password,
            Self::ConfirmPassword(_) => Field::ConfirmPassword,
            Self::AgreeTerms(_) => Field::AgreeTerms,
        }
    }
}

impl fmt::Debug for SignupInput {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(value) => formatter.debug_tuple("Name").field(value).finish(),
            Self::Email(value) => formatter.debug_tuple("Email").field(value).finish(),
            Self::Password(_) => formatter.write_str("Password([REDACTED])"),
            Self::ConfirmPassword(_) => formatter.write_str("ConfirmPassword([REDACTED])"),
            Self::AgreeTerms(value) => formatter.debug_tuple("AgreeTerms").field(value).finish(),
        }
    }
}

/// Current field values of the signup form.
#[derive(Debug, Default)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
    pub agree_terms: bool,
}

impl SignupForm {
    fn fields(&self) -> SignupFields<'_> {
        SignupFields {
            name: &self.name,
            email: &self.email,
            password: self.password.expose_secret(),
            confirm_password: self.confirm_password.expose_secret(),
            agree_terms: self.agree_terms,
        }
    }
}

#[derive(Debug)]
pub enum SignupOutcome {
    /// Local validation failed; see [`SignupController::errors`].
    Invalid,
    /// The account was created.
    Submitted(RegisterResponse),
    /// The service rejected or never answered; see [`SignupController::error`].
    /// The form is kept for a retry.
    Failed,
    /// The form was already submitted.
    Ignored,
}

#[derive(Debug, Default)]
pub struct SignupController {
    form: SignupForm,
    errors: ValidationErrors,
    strength: Option<PasswordStrength>,
    submission: SubmissionState,
    submitted: bool,
}

impl SignupController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn form(&self) -> &SignupForm {
        &self.form
    }

    #[must_use]
    pub const fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Strength meter; `None` while the password field is empty.
    #[must_use]
    pub const fn strength(&self) -> Option<PasswordStrength> {
        self.strength
    }

    /// Form-level failure from the last submit. Field problems are in
    /// [`SignupController::errors`].
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

    #[must_use]
    pub const fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn update(&mut self, input: SignupInput) {
        let field = input.field();

        match input {
            SignupInput::Name(value) => self.form.name = value,
            SignupInput::Email(value) => self.form.email = value,
            SignupInput::Password(value) => self.form.password = SecretString::from(value),
            SignupInput::ConfirmPassword(value) => {
                self.form.confirm_password = SecretString::from(value);
            }
            SignupInput::AgreeTerms(value) => self.form.agree_terms = value,
        }

        self.errors.remove(field);

        if matches!(field, Field::Password | Field::ConfirmPassword) {
            self.refresh_password_feedback();
        }
    }

    /// Strength meter and live match hint, recomputed on every password edit.
    fn refresh_password_feedback(&mut self) {
        let password = self.form.password.expose_secret();
        let confirmation = self.form.confirm_password.expose_secret();

        if !password.is_empty() && !confirmation.is_empty() {
            if validation::confirmation_matches(password, confirmation, ConfirmationMode::Exact) {
                self.errors.remove(Field::ConfirmPassword);
            } else {
                self.errors
                    .insert(Field::ConfirmPassword, validation::PASSWORDS_MISMATCH);
            }
        }

        self.strength = if password.is_empty() {
            None
        } else {
            Some(PasswordStrength::evaluate(password))
        };
    }

    /// Full validation pass over the current values.
    #[must_use]
    pub fn validate(&self) -> ValidationErrors {
        validation::validate_signup(&self.form.fields())
    }

    #[instrument(skip_all)]
    pub async fn submit(&mut self, api: &dyn AuthApi) -> SignupOutcome {
        if self.submitted {
            return SignupOutcome::Ignored;
        }

        self.submission.clear_error();

        self.errors = self.validate();
        if !self.errors.is_empty() {
            info!("signup blocked by {} field error(s)", self.errors.len());
            return SignupOutcome::Invalid;
        }

        let request = RegisterRequest {
            name: self.form.name.clone(),
            email: self.form.email.clone(),
            password: self.form.password.expose_secret().to_string(),
            confirm_password: self.form.confirm_password.expose_secret().to_string(),
        };

        let result = {
            let _loading = self.submission.begin();
            api.register(&request).await
        };

        match result {
            Ok(response) => {
                info!("account created");
                self.submitted = true;
                SignupOutcome::Submitted(response)
            }
            Err(err) => {
                warn!("signup failed: {}", err);
                self.submission.set_error(FlowError::new(SUBMIT_FAILED));
                SignupOutcome::Failed
            }
        }
    }
}
