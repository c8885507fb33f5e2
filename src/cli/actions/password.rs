//! Terminal renderer for changing the password of a signed-in user.

use crate::{
    api::AuthApi,
    cli::actions::{login, terminal::Terminal},
    password::{ChangePasswordController, PasswordChangeInput, PasswordChangeOutcome},
};
use anyhow::{bail, Result};

/// Signs in, then asks for the current and new password until the change
/// goes through.
///
/// # Errors
/// Returns an error if input closes or the user gives up after a failure.
pub async fn run(api: &dyn AuthApi, terminal: &mut dyn Terminal) -> Result<()> {
    let session = login::sign_in(api, terminal).await?;
    let mut controller = ChangePasswordController::new();
    terminal.say("Change Password")?;

    loop {
        controller.update(PasswordChangeInput::CurrentPassword(
            terminal.secret("Current password")?,
        ));
        controller.update(PasswordChangeInput::NewPassword(
            terminal.secret("New password")?,
        ));

        match controller.submit(api, &session).await {
            PasswordChangeOutcome::Changed => {
                terminal.say("Password changed successfully!")?;
                return Ok(());
            }
            PasswordChangeOutcome::Invalid => show_error(&controller, terminal)?,
            PasswordChangeOutcome::Failed => {
                show_error(&controller, terminal)?;
                if !terminal.confirm("Try again?")? {
                    bail!("password was not changed");
                }
            }
        }
    }
}

fn show_error(controller: &ChangePasswordController, terminal: &mut dyn Terminal) -> Result<()> {
    if let Some(error) = controller.error() {
        terminal.say(&format!("error: {error}"))?;
    }
    Ok(())
}
