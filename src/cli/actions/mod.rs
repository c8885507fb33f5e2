pub mod login;
pub mod password;
pub mod reset;
pub mod signup;
pub mod strength;
pub mod terminal;

// Internal "interpreter" for `Action`.
mod run;

use crate::api::HttpAuthApi;
use anyhow::{Context, Result};
use secrecy::SecretString;
use std::time::Duration;

/// Connection settings shared by every flow that talks to the user service.
#[derive(Debug, Clone)]
pub struct Args {
    pub api_url: String,
    pub timeout: Duration,
}

impl Args {
    /// # Errors
    /// Returns an error if the base URL is not a usable http(s) URL.
    pub fn client(&self) -> Result<HttpAuthApi> {
        HttpAuthApi::new(&self.api_url, self.timeout).context("invalid AUTHFLOW_API_URL")
    }
}

#[derive(Debug)]
pub enum Action {
    Signup(Args),
    Login(Args),
    ResetPassword(Args),
    ChangePassword(Args),
    /// `None` means the password is asked for interactively.
    Strength { password: Option<SecretString> },
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> Result<()> {
        run::execute(self).await
    }
}
