use crate::{
    api::{AuthApi, Session},
    cli::actions::terminal::Terminal,
    login::{LoginController, LoginInput, LoginOutcome},
};
use anyhow::Result;

/// # Errors
/// Returns an error if input closes before sign-in succeeds.
pub async fn run(api: &dyn AuthApi, terminal: &mut dyn Terminal) -> Result<()> {
    sign_in(api, terminal).await.map(|_| ())
}

/// Prompts until the user service accepts the credentials.
///
/// # Errors
/// Returns an error if input closes first.
pub async fn sign_in(api: &dyn AuthApi, terminal: &mut dyn Terminal) -> Result<Session> {
    let mut controller = LoginController::new();
    terminal.say("Sign in")?;

    loop {
        controller.update(LoginInput::Email(terminal.text("Email")?));
        controller.update(LoginInput::Password(terminal.secret("Password")?));

        match controller.submit(api).await {
            LoginOutcome::Authenticated(session) => {
                terminal.say(&format!("Signed in as {}", session.user.username))?;
                if session.user.is_admin() {
                    terminal.say("Administrator access")?;
                }
                return Ok(session);
            }
            LoginOutcome::Invalid | LoginOutcome::Failed => {
                if let Some(error) = controller.error() {
                    terminal.say(&format!("error: {error}"))?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api::{mock::MockApi, ApiError},
        cli::actions::terminal::Script,
        login::INCORRECT_PASSWORD,
    };

    #[tokio::test]
    async fn signs_in() -> Result<()> {
        let api = MockApi::new();
        let mut terminal = Script::new(&["user@example.com", "Passw0rd!"]);

        run(&api, &mut terminal).await?;

        assert!(terminal.transcript().contains("Signed in as ada"));
        assert!(!terminal.transcript().contains("Passw0rd!"));
        Ok(())
    }

    #[tokio::test]
    async fn sign_in_returns_the_session() -> Result<()> {
        let api = MockApi::new();
        let mut terminal = Script::new(&["user@example.com", "Passw0rd!"]);

        let session = sign_in(&api, &mut terminal).await?;

        assert_eq!(session.user.username, "ada");
        Ok(())
    }

    #[tokio::test]
    async fn wrong_password_prompts_again() -> Result<()> {
        let api = MockApi::failing_with(ApiError::Http {
            status: 401,
            detail: None,
        });
        let mut terminal =
            Script::new(&["user@example.com", "nope", "user@example.com", "Passw0rd!"]);

        run(&api, &mut terminal).await?;

        let output = terminal.transcript();
        assert!(output.contains(&format!("error: {INCORRECT_PASSWORD}")));
        assert!(output.contains("Signed in as ada"));
        assert_eq!(api.calls().len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn invalid_email_never_reaches_service() {
        let api = MockApi::new();
        let mut terminal = Script::new(&["not-an-email", "Passw0rd!"]);

        // input runs out on the second round
        assert!(run(&api, &mut terminal).await.is_err());
        assert!(terminal
            .transcript()
            .contains("error: Please enter a valid email address"));
        assert!(api.calls().is_empty());
    }
}
