pub mod api;
pub mod logging;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

pub const ARG_PASSWORD: &str = "password";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("authflow")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(Command::new("signup").about("Create an account"))
        .subcommand(Command::new("login").about("Sign in with email and password"))
        .subcommand(
            Command::new("reset-password")
                .about("Reset a forgotten password with an emailed code"),
        )
        .subcommand(
            Command::new("change-password")
                .about("Sign in, then replace the current password"),
        )
        .subcommand(
            Command::new("strength")
                .about("Score a password without contacting the user service")
                .arg(
                    Arg::new(ARG_PASSWORD)
                        .help("Password to score, asked without echo when omitted")
                        .env("AUTHFLOW_PASSWORD")
                        .hide_env_values(true),
                ),
        );

    let command = api::with_args(command);
    logging::with_args(command)
}
