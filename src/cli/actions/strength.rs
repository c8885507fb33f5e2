use crate::{
    cli::actions::terminal::Terminal,
    validation::{PasswordStrength, MIN_ACCEPTED_SCORE},
};
use anyhow::Result;
use secrecy::{ExposeSecret, SecretString};

/// Prints the strength score of `password`, asking for it without echo when
/// it was not given on the command line or in `AUTHFLOW_PASSWORD`.
///
/// # Errors
/// Returns an error if the password cannot be read from the terminal.
pub fn execute(password: Option<SecretString>, terminal: &mut dyn Terminal) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => SecretString::from(terminal.secret("Password")?),
    };

    terminal.say(&render(PasswordStrength::evaluate(password.expose_secret())))
}

fn render(strength: PasswordStrength) -> String {
    let verdict = if strength.is_acceptable() {
        "accepted".to_string()
    } else {
        format!("rejected, signup needs at least {MIN_ACCEPTED_SCORE}/5")
    };

    format!("{}/5 {} ({verdict})", strength.score, strength.feedback)
}
