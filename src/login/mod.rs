//! Email + password login. Checks stop at the first failing rule and report
//! through the single error slot of the submission state.

use crate::{
    api::{AuthApi, LoginRequest, Session},
    submission::{FlowError, SubmissionState},
    validation::{self, Field},
};
use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use tracing::{info, instrument, warn};

pub const INCORRECT_PASSWORD: &str = "Incorrect password. Please try again.";
pub const LOGIN_FAILED: &str = "An error occurred during login. Please try again later.";

#[derive(Clone)]
pub enum LoginInput {
    Email(String),
    Password(String),
}

impl fmt::Debug for LoginInput {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email(value) => formatter.debug_tuple("Email").field(value).finish(),
            Self::Password(_) => formatter.write_str("Password([REDACTED])"),
        }
    }
}

#[derive(Debug)]
pub enum LoginOutcome {
    Invalid,
    Authenticated(Session),
    Failed,
}

#[derive(Debug, Default)]
pub struct LoginController {
    email: String,
    password: SecretString,
    session: Option<Session>,
    submission: SubmissionState,
}

impl LoginController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        self.session.as_ref()
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

    pub fn update(&mut self, input: LoginInput) {
        match input {
            LoginInput::Email(value) => self.email = value,
            LoginInput::Password(value) => self.password = SecretString::from(value),
        }
    }

    fn validate(&self) -> Option<FlowError> {
        if let Some(message) = validation::email_error(&self.email) {
            return Some(FlowError::for_field(Field::Email, message));
        }

        if self.password.expose_secret().is_empty() {
            return Some(FlowError::for_field(
                Field::Password,
                validation::PASSWORD_REQUIRED,
            ));
        }

        None
    }

    #[instrument(skip_all)]
    pub async fn submit(&mut self, api: &dyn AuthApi) -> LoginOutcome {
        self.submission.clear_error();

        if let Some(error) = self.validate() {
            self.submission.set_error(error);
            return LoginOutcome::Invalid;
        }

        let request = LoginRequest {
            email: self.email.clone(),
            password: self.password.expose_secret().to_string(),
        };

        let result = {
            let _loading = self.submission.begin();
            api.login(&request).await
        };

        match result {
            Ok(session) => {
                info!("signed in");
                self.session = Some(session.clone());
                LoginOutcome::Authenticated(session)
            }
            Err(err) => {
                warn!("login failed: {}", err);
                let error = if err.status() == Some(401) {
                    FlowError::for_field(Field::Password, INCORRECT_PASSWORD)
                } else {
                    FlowError::new(LOGIN_FAILED)
                };
                self.submission.set_error(error);
                LoginOutcome::Failed
            }
        }
    }
}
