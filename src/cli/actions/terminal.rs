//! Prompts shared by the interactive flows.
//!
//! Flows talk to a [`Terminal`]. [`Console`] is the real one, built on
//! `dialoguer` so secrets are read with echo turned off.

use anyhow::{Context, Result};
use dialoguer::{Confirm, Input, Password};

pub trait Terminal {
    /// Reads one visible line. An empty answer is allowed.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be read.
    fn text(&mut self, label: &str) -> Result<String>;

    /// Reads a password without echoing it.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be read.
    fn secret(&mut self, label: &str) -> Result<String>;

    /// Yes/no question defaulting to no.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be read.
    fn confirm(&mut self, label: &str) -> Result<bool>;

    /// # Errors
    /// Returns an error if the output cannot be written.
    fn say(&mut self, line: &str) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct Console;

impl Console {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Terminal for Console {
    fn text(&mut self, label: &str) -> Result<String> {
        Input::<String>::new()
            .with_prompt(label)
            .allow_empty(true)
            .interact_text()
            .with_context(|| format!("Failed to read {label}"))
    }

    fn secret(&mut self, label: &str) -> Result<String> {
        Password::new()
            .with_prompt(label)
            .allow_empty_password(true)
            .interact()
            .with_context(|| format!("Failed to read {label}"))
    }

    fn confirm(&mut self, label: &str) -> Result<bool> {
        Confirm::new()
            .with_prompt(label)
            .default(false)
            .interact()
            .with_context(|| format!("Failed to read answer to {label}"))
    }

    fn say(&mut self, line: &str) -> Result<()> {
        println!("{line}");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) use script::Script;

#[cfg(test)]
mod script {
    use super::Terminal;
    use anyhow::{bail, Result};
    use std::collections::VecDeque;

    /// Replays canned answers and records what the flow printed. Secret
    /// answers are never written to the transcript.
    #[derive(Debug, Default)]
    pub struct Script {
        answers: VecDeque<String>,
        transcript: String,
    }

    impl Script {
        pub fn new(answers: &[&str]) -> Self {
            Self {
                answers: answers.iter().map(ToString::to_string).collect(),
                transcript: String::new(),
            }
        }

        pub fn transcript(&self) -> &str {
            &self.transcript
        }

        fn next(&mut self, label: &str) -> Result<String> {
            self.transcript.push_str(label);
            self.transcript.push_str(": ");
            match self.answers.pop_front() {
                Some(answer) => Ok(answer),
                None => bail!("no answer left for {label}"),
            }
        }
    }

    impl Terminal for Script {
        fn text(&mut self, label: &str) -> Result<String> {
            let answer = self.next(label)?;
            self.transcript.push_str(&answer);
            self.transcript.push('\n');
            Ok(answer)
        }

        fn secret(&mut self, label: &str) -> Result<String> {
            let answer = self.next(label)?;
            self.transcript.push('\n');
            Ok(answer)
        }

        fn confirm(&mut self, label: &str) -> Result<bool> {
            let answer = self.next(label)?;
            self.transcript.push_str(&answer);
            self.transcript.push('\n');
            Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
        }

        fn say(&mut self, line: &str) -> Result<()> {
            self.transcript.push_str(line);
            self.transcript.push('\n');
            Ok(())
        }
    }
}
