//! # Authflow (client-side authentication flows)
//!
//! `authflow` drives the signup, login and password-reset screens of the user
//! service from the client side. Every flow is a plain controller struct: the
//! renderer feeds it input messages, calls one async action at a time and
//! projects the resulting state. Nothing here knows how it is drawn.
//!
//! ## Validation
//!
//! Field rules live in [`validation`] and are pure. A pass returns a
//! [`validation::ValidationErrors`] map holding only the failing fields; an empty
//! map means the form may be submitted. Password strength is a 0–5 score over
//! length and character classes, and submission requires at least "Medium".
//!
//! ## Password reset
//!
//! The reset wizard moves `Email → Code → Password`. A step only advances after
//! the user service confirms the previous one, so client validation alone never
//! moves the flow forward. "Resend" is the single backwards edge (`Code → Email`).
//!
//! ## Backend
//!
//! Controllers talk to the user service through the [`api::AuthApi`] trait. The
//! shipped implementation, [`api::HttpAuthApi`], speaks JSON over HTTP. Requests
//! carry passwords; neither the trait implementations nor the controllers may
//! log request bodies.

pub mod api;
pub mod cli;
pub mod login;
pub mod password;
pub mod reset;
pub mod signup;
pub mod submission;
pub mod validation;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // built from a source tarball without a .git directory
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
