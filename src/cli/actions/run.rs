use crate::cli::actions::{login, password, reset, signup, strength, terminal::Console, Action};
use anyhow::Result;

/// Execute the provided action.
// This is the single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    let mut console = Console::new();

    match action {
        Action::Signup(args) => signup::run(&args.client()?, &mut console).await,
        Action::Login(args) => login::run(&args.client()?, &mut console).await,
        Action::ResetPassword(args) => reset::run(&args.client()?, &mut console).await,
        Action::ChangePassword(args) => password::run(&args.client()?, &mut console).await,
        Action::Strength { password } => strength::execute(password, &mut console),
    }
}
