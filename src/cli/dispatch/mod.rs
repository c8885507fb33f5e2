use crate::cli::{
    actions::{Action, Args},
    commands::{self, api},
};
use anyhow::{bail, Context, Result};
use secrecy::SecretString;
use std::time::Duration;

/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    match matches.subcommand() {
        Some(("signup", _)) => Ok(Action::Signup(service_args(matches)?)),
        Some(("login", _)) => Ok(Action::Login(service_args(matches)?)),
        Some(("reset-password", _)) => Ok(Action::ResetPassword(service_args(matches)?)),
        Some(("change-password", _)) => Ok(Action::ChangePassword(service_args(matches)?)),
        Some(("strength", sub_m)) => Ok(Action::Strength {
            password: sub_m
                .get_one::<String>(commands::ARG_PASSWORD)
                .cloned()
                .map(SecretString::from),
        }),
        Some((name, _)) => bail!("unknown subcommand: {name}"),
        None => bail!("missing subcommand"),
    }
}

fn service_args(matches: &clap::ArgMatches) -> Result<Args> {
    let api_url = matches
        .get_one::<String>(api::ARG_API_URL)
        .cloned()
        .context("missing required argument: --api-url")?;

    let timeout = matches
        .get_one::<u64>(api::ARG_TIMEOUT)
        .copied()
        .map_or(crate::api::DEFAULT_TIMEOUT, Duration::from_secs);

    Ok(Args { api_url, timeout })
}
