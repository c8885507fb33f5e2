//! Terminal renderer for the password-reset wizard.

use crate::{
    api::AuthApi,
    cli::actions::terminal::Terminal,
    reset::{ResetInput, ResetPasswordFlow, ResetStep, Transition},
};
use anyhow::Result;

pub const RESEND_KEYWORD: &str = "resend";

/// # Errors
/// Returns an error if input closes before the password is reset.
pub async fn run(api: &dyn AuthApi, terminal: &mut dyn Terminal) -> Result<()> {
    let mut flow = ResetPasswordFlow::new();
    announce(flow.step(), terminal)?;

    loop {
        let transition = match flow.step() {
            ResetStep::Email => {
                // keep the address from a previous round when the line is blank
                let label = if flow.email().is_empty() {
                    "Email".to_string()
                } else {
                    format!("Email [{}]", flow.email())
                };
                let email = terminal.text(&label)?;
                if !email.is_empty() || flow.email().is_empty() {
                    flow.update(ResetInput::Email(email));
                }
                flow.send_code(api).await
            }
            ResetStep::Code => {
                let code = terminal.text(&format!("Code (or '{RESEND_KEYWORD}')"))?;
                if code.trim().eq_ignore_ascii_case(RESEND_KEYWORD) {
                    flow.resend()
                } else {
                    flow.update(ResetInput::Code(code));
                    flow.verify_code(api).await
                }
            }
            ResetStep::Password => {
                flow.update(ResetInput::NewPassword(terminal.secret("New password")?));
                flow.update(ResetInput::ConfirmNewPassword(
                    terminal.secret("Confirm new password")?,
                ));
                flow.submit_new_password(api).await
            }
        };

        match transition {
            Transition::Advanced(step) | Transition::Returned(step) => announce(step, terminal)?,
            Transition::Completed => {
                terminal.say("Your password has been reset. You can now sign in.")?;
                return Ok(());
            }
            Transition::Stayed => {
                if let Some(error) = flow.error() {
                    terminal.say(&format!("error: {error}"))?;
                }
            }
            Transition::Ignored => {}
        }
    }
}

fn announce(step: ResetStep, terminal: &mut dyn Terminal) -> Result<()> {
    terminal.say(step.title())?;
    terminal.say(step.instructions())
}
