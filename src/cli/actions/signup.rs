//! Terminal renderer for the signup form.
//!
//! The first pass asks every field. After a rejected submit only the fields
//! carrying an error are asked again.

use crate::{
    api::AuthApi,
    cli::actions::terminal::Terminal,
    signup::{SignupController, SignupInput, SignupOutcome},
    validation::Field,
};
use anyhow::{bail, Result};

const FORM_FIELDS: [Field; 5] = [
    Field::Name,
    Field::Email,
    Field::Password,
    Field::ConfirmPassword,
    Field::AgreeTerms,
];

/// # Errors
/// Returns an error if input closes or the user gives up after a failed submit.
pub async fn run(api: &dyn AuthApi, terminal: &mut dyn Terminal) -> Result<()> {
    let mut controller = SignupController::new();
    terminal.say("Create your account")?;

    let mut pending = FORM_FIELDS.to_vec();

    loop {
        for field in std::mem::take(&mut pending) {
            ask(&mut controller, terminal, field)?;
        }

        match controller.submit(api).await {
            SignupOutcome::Submitted(session) => {
                terminal.say(&format!(
                    "Account created. Welcome, {}!",
                    session.user.username
                ))?;
                return Ok(());
            }
            SignupOutcome::Invalid => {
                show_errors(&controller, terminal)?;
                let errors = controller.errors();
                pending = FORM_FIELDS
                    .into_iter()
                    .filter(|field| {
                        errors.contains(*field)
                            || (*field == Field::ConfirmPassword && errors.contains(Field::Password))
                    })
                    .collect();
            }
            SignupOutcome::Failed => {
                show_errors(&controller, terminal)?;
                if !terminal.confirm("Try again?")? {
                    bail!("signup was not completed");
                }
            }
            SignupOutcome::Ignored => return Ok(()),
        }
    }
}

fn ask(
    controller: &mut SignupController,
    terminal: &mut dyn Terminal,
    field: Field,
) -> Result<()> {
    let input = match field {
        Field::Name => SignupInput::Name(terminal.text("Name")?),
        Field::Email => SignupInput::Email(terminal.text("Email")?),
        Field::Password => SignupInput::Password(terminal.secret("Password")?),
        Field::ConfirmPassword => {
            SignupInput::ConfirmPassword(terminal.secret("Confirm password")?)
        }
        Field::AgreeTerms => SignupInput::AgreeTerms(
            terminal.confirm("I agree to the Terms of Service and Privacy Policy")?,
        ),
        _ => return Ok(()),
    };

    controller.update(input);

    // live feedback, same as the inline meter and hint of the form
    match field {
        Field::Password => {
            if let Some(strength) = controller.strength() {
                terminal.say(&format!("  strength: {}", strength.feedback))?;
            }
        }
        Field::ConfirmPassword => {
            if let Some(message) = controller.errors().get(Field::ConfirmPassword) {
                terminal.say(&format!("  {message}"))?;
            }
        }
        _ => {}
    }

    Ok(())
}

fn show_errors(controller: &SignupController, terminal: &mut dyn Terminal) -> Result<()> {
    if let Some(error) = controller.error() {
        terminal.say(&format!("error: {error}"))?;
    }
    for (_, message) in controller.errors().iter() {
        terminal.say(&format!("error: {message}"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api::{
            mock::{Call, MockApi},
            ApiError,
        },
        cli::actions::terminal::Script,
        signup::SUBMIT_FAILED,
        validation::NAME_REQUIRED,
    };

    const VALID: [&str; 5] = ["Ada", "user@example.com", "Passw0rd!", "Passw0rd!", "y"];

    #[tokio::test]
    async fn creates_account_from_prompts() -> Result<()> {
        let api = MockApi::new();
        let mut terminal = Script::new(&VALID);

        run(&api, &mut terminal).await?;

        let output = terminal.transcript();
        assert!(output.contains("strength: Very strong"));
        assert!(output.contains("Account created. Welcome, ada!"));
        assert!(!output.contains("Passw0rd!"));
        assert!(matches!(api.calls().as_slice(), [Call::Register(_)]));
        Ok(())
    }

    #[tokio::test]
    async fn asks_again_only_for_failing_fields() -> Result<()> {
        let api = MockApi::new();
        let mut terminal =
            Script::new(&["", "user@example.com", "Passw0rd!", "Passw0rd!", "y", "Ada"]);

        run(&api, &mut terminal).await?;

        let output = terminal.transcript();
        assert!(output.contains(&format!("error: {NAME_REQUIRED}")));
        assert_eq!(output.matches("Email: ").count(), 1);
        assert_eq!(output.matches("Name: ").count(), 2);
        assert_eq!(api.calls().len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn mismatch_is_shown_while_typing() -> Result<()> {
        let api = MockApi::new();
        let mut terminal = Script::new(&[
            "Ada",
            "user@example.com",
            "Passw0rd!",
            "Passw0rd?",
            "y",
            "Passw0rd!",
        ]);

        run(&api, &mut terminal).await?;

        let output = terminal.transcript();
        assert!(output.contains("  Passwords don't match"));
        assert_eq!(output.matches("Confirm password: ").count(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn failed_submit_can_be_retried() -> Result<()> {
        let api = MockApi::failing_with(ApiError::Network("connection reset".to_string()));
        let mut lines = VALID.to_vec();
        lines.push("y");
        let mut terminal = Script::new(&lines);

        run(&api, &mut terminal).await?;

        assert!(terminal
            .transcript()
            .contains(&format!("error: {SUBMIT_FAILED}")));
        assert_eq!(api.calls().len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn declining_retry_ends_with_error() {
        let api = MockApi::failing_with(ApiError::Network("connection reset".to_string()));
        let mut lines = VALID.to_vec();
        lines.push("n");
        let mut terminal = Script::new(&lines);

        assert!(run(&api, &mut terminal).await.is_err());
    }
}
