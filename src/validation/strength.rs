//! Password strength heuristic shown under the password field.

use std::fmt;

/// Minimum number of characters before a password earns the length point.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Lowest score accepted on submit ("Medium").
pub const MIN_ACCEPTED_SCORE: u8 = 3;

/// Human label for a strength score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StrengthLabel {
    VeryWeak,
    Weak,
    Medium,
    Strong,
    VeryStrong,
}

impl StrengthLabel {
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        match score {
            0 | 1 => Self::VeryWeak,
            2 => Self::Weak,
            3 => Self::Medium,
            4 => Self::Strong,
            _ => Self::VeryStrong,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VeryWeak => "Very weak",
            Self::Weak => "Weak",
            Self::Medium => "Medium",
            Self::Strong => "Strong",
            Self::VeryStrong => "Very strong",
        }
    }
}

impl fmt::Display for StrengthLabel {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Score in `0..=5` plus its label. One point each for: length, an uppercase
/// letter, a lowercase letter, a digit, and anything outside `[A-Za-z0-9]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PasswordStrength {
    pub score: u8,
    pub feedback: StrengthLabel,
}

impl PasswordStrength {
    /// Scores a password. Pure: the same input always yields the same value.
    #[must_use]
    pub fn evaluate(password: &str) -> Self {
        let predicates = [
            password.chars().count() >= MIN_PASSWORD_LENGTH,
            password.chars().any(|c| c.is_ascii_uppercase()),
            password.chars().any(|c| c.is_ascii_lowercase()),
            password.chars().any(|c| c.is_ascii_digit()),
            password.chars().any(|c| !c.is_ascii_alphanumeric()),
        ];

        let score = predicates.iter().fold(0u8, |acc, &hit| acc + u8::from(hit));

        Self {
            score,
            feedback: StrengthLabel::from_score(score),
        }
    }

    #[must_use]
    pub const fn is_acceptable(&self) -> bool {
        self.score >= MIN_ACCEPTED_SCORE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_class_scores_very_strong() {
        let strength = PasswordStrength::evaluate("Abc12345!");
        assert_eq!(strength.score, 5);
        assert_eq!(strength.feedback, StrengthLabel::VeryStrong);
        assert_eq!(strength.feedback.to_string(), "Very strong");
    }

    #[test]
    fn short_lowercase_is_very_weak() {
        let strength = PasswordStrength::evaluate("abc");
        assert!(strength.score <= 2);
        assert_eq!(strength.score, 1);
        assert_eq!(strength.feedback, StrengthLabel::VeryWeak);
    }

    #[test]
    fn empty_password_scores_zero() {
        let strength = PasswordStrength::evaluate("");
        assert_eq!(strength.score, 0);
        assert_eq!(strength.feedback, StrengthLabel::VeryWeak);
    }

    #[test]
    fn labels_follow_score() {
        let cases = [
            (0, "Very weak"),
            (1, "Very weak"),
            (2, "Weak"),
            (3, "Medium"),
            (4, "Strong"),
            (5, "Very strong"),
        ];
        for (score, label) in cases {
            assert_eq!(StrengthLabel::from_score(score).as_str(), label);
        }
    }

    #[test]
    fn score_grows_with_each_class() {
        // each step adds exactly one predicate
        let ladder = ["a", "aA", "aA1", "aA1!", "aA1!aaaa"];
        let scores: Vec<u8> = ladder
            .iter()
            .map(|password| PasswordStrength::evaluate(password).score)
            .collect();
        assert_eq!(scores, vec![1, 2, 3, 4, 5]);
        assert!(scores.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn non_ascii_letters_count_as_symbols() {
        let strength = PasswordStrength::evaluate("é");
        assert_eq!(strength.score, 1);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // 7 two-byte characters: 14 bytes but below the length threshold
        let strength = PasswordStrength::evaluate("ééééééé");
        assert_eq!(strength.score, 1);
        let strength = PasswordStrength::evaluate("éééééééé");
        assert_eq!(strength.score, 2);
    }

    #[test]
    fn evaluate_is_idempotent() {
        let first = PasswordStrength::evaluate("Passw0rd!");
        let second = PasswordStrength::evaluate("Passw0rd!");
        assert_eq!(first, second);
        assert!(first.is_acceptable());
    }

    #[test]
    fn medium_is_the_acceptance_floor() {
        // length + lower + digit
        assert_eq!(PasswordStrength::evaluate("abcdefgh1").score, 3);
        assert!(PasswordStrength::evaluate("abcdefgh1").is_acceptable());
        assert!(!PasswordStrength::evaluate("abcdefgh").is_acceptable());
    }
}
