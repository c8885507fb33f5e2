use clap::{builder::ValueParser, Arg, ArgAction, Command};

pub const ARG_VERBOSITY: &str = "verbosity";

/// Accepted `AUTHFLOW_LOG_LEVEL` names, indexed by the `-v` count they stand for.
pub const LEVEL_NAMES: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Turns `AUTHFLOW_LOG_LEVEL` into a verbosity count. Takes a level name in
/// any case or the count itself.
///
/// # Errors
/// Returns the list of accepted values when `level` is neither.
pub fn parse_level(level: &str) -> Result<u8, String> {
    let level = level.trim();

    let index = match level.parse::<usize>() {
        Ok(count) if count < LEVEL_NAMES.len() => Some(count),
        Ok(_) => None,
        Err(_) => LEVEL_NAMES
            .iter()
            .position(|name| name.eq_ignore_ascii_case(level)),
    };

    index
        .and_then(|index| u8::try_from(index).ok())
        .ok_or_else(|| {
            format!(
                "unknown log level '{level}', expected one of {} or 0-{}",
                LEVEL_NAMES.join(", "),
                LEVEL_NAMES.len() - 1
            )
        })
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .short('v')
            .long("verbose")
            .help("Log more: -v warn, -vv info, -vvv debug, -vvvv trace (default: error)")
            .env("AUTHFLOW_LOG_LEVEL")
            .global(true)
            .action(ArgAction::Count)
            .value_parser(ValueParser::from(parse_level)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_map_to_their_position() {
        for (index, name) in LEVEL_NAMES.iter().enumerate() {
            assert_eq!(parse_level(name).ok().map(usize::from), Some(index));
            assert_eq!(
                parse_level(&name.to_uppercase()).ok().map(usize::from),
                Some(index)
            );
        }
    }

    #[test]
    fn counts_are_accepted_up_to_trace() {
        assert_eq!(parse_level("0"), Ok(0));
        assert_eq!(parse_level(" 4 "), Ok(4));
        assert!(parse_level("5").is_err());
    }

    #[test]
    fn unknown_level_lists_the_choices() {
        let message = parse_level("loud").err().unwrap_or_default();
        assert!(message.contains("'loud'"));
        assert!(message.contains("error, warn, info, debug, trace"));
    }
}
