//! Client-side field rules shared by every flow. All functions here are pure:
//! they read field values and return errors, they never touch controller state.

mod strength;

pub use strength::{MIN_ACCEPTED_SCORE, MIN_PASSWORD_LENGTH, PasswordStrength, StrengthLabel};

use regex::Regex;
use std::{collections::BTreeMap, fmt};

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Please enter a valid email address";
pub const PASSWORD_REQUIRED: &str = "Password is required";
pub const PASSWORD_TOO_WEAK: &str = "Password is too weak";
pub const CONFIRM_REQUIRED: &str = "Please confirm your password";
pub const PASSWORDS_MISMATCH: &str = "Passwords don't match";
pub const TERMS_REQUIRED: &str = "You must agree to the Terms of Service";

/// Inputs that can carry an error. Failures that belong to no single input
/// live in the controller's [`crate::submission::SubmissionState`] instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Password,
    ConfirmPassword,
    AgreeTerms,
    Code,
    NewPassword,
    ConfirmNewPassword,
    CurrentPassword,
}

impl Field {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "confirmPassword",
            Self::AgreeTerms => "agreeTerms",
            Self::Code => "code",
            Self::NewPassword => "newPassword",
            Self::ConfirmNewPassword => "confirmNewPassword",
            Self::CurrentPassword => "currentPassword",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Field → message for every failing field. Empty means valid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<Field, String>);

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn remove(&mut self, field: Field) -> Option<String> {
        self.0.remove(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

/// Basic `local@domain.tld` shape check: no whitespace anywhere, exactly one
/// `@`, and a dot somewhere after it.
#[must_use]
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|regex| regex.is_match(email))
}

/// How a confirmation field is compared with its password.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfirmationMode {
    /// Byte-for-byte, surrounding whitespace included (signup).
    Exact,
    /// Both sides trimmed first (password reset).
    Trimmed,
}

#[must_use]
pub fn confirmation_matches(password: &str, confirmation: &str, mode: ConfirmationMode) -> bool {
    match mode {
        ConfirmationMode::Exact => password == confirmation,
        ConfirmationMode::Trimmed => password.trim() == confirmation.trim(),
    }
}

/// Borrowed view of the signup form handed to [`validate_signup`].
#[derive(Clone, Copy, Debug)]
pub struct SignupFields<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub confirm_password: &'a str,
    pub agree_terms: bool,
}

/// Full signup pass. Each field reports at most its first failing rule.
#[must_use]
pub fn validate_signup(fields: &SignupFields<'_>) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if fields.name.trim().is_empty() {
        errors.insert(Field::Name, NAME_REQUIRED);
    }

    if let Some(message) = email_error(fields.email) {
        errors.insert(Field::Email, message);
    }

    if fields.password.is_empty() {
        errors.insert(Field::Password, PASSWORD_REQUIRED);
    } else if fields.password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.insert(
            Field::Password,
            format!("Password must be at least {MIN_PASSWORD_LENGTH} characters"),
        );
    } else if !PasswordStrength::evaluate(fields.password).is_acceptable() {
        errors.insert(Field::Password, PASSWORD_TOO_WEAK);
    }

    if fields.confirm_password.is_empty() {
        errors.insert(Field::ConfirmPassword, CONFIRM_REQUIRED);
    } else if !confirmation_matches(
        fields.password,
        fields.confirm_password,
        ConfirmationMode::Exact,
    ) {
        errors.insert(Field::ConfirmPassword, PASSWORDS_MISMATCH);
    }

    if !fields.agree_terms {
        errors.insert(Field::AgreeTerms, TERMS_REQUIRED);
    }

    errors
}

/// Shared email rule for every flow. Emptiness is judged on the trimmed value,
/// the format on the raw one, so padded input is rejected as malformed.
#[must_use]
pub fn email_error(email: &str) -> Option<&'static str> {
    if email.trim().is_empty() {
        Some(EMAIL_REQUIRED)
    } else if !valid_email(email) {
        Some(EMAIL_INVALID)
    } else {
        None
    }
}
