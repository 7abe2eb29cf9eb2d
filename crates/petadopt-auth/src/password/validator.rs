//! Password policy for new passwords.

use zxcvbn::Score;

use petadopt_core::config::AuthConfig;
use petadopt_core::error::AppError;

/// Checks candidate passwords against the configured policy.
///
/// Every violated rule is reported, not just the first, so clients can
/// show them all at once under the `password` field.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
    min_strength: Score,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let min_strength = match config.password_min_strength {
            0 => Score::Zero,
            1 => Score::One,
            2 => Score::Two,
            3 => Score::Three,
            _ => Score::Four,
        };
        Self {
            min_length: config.password_min_length,
            min_strength,
        }
    }

    /// Collect the policy violations for `password` chosen by `username`.
    pub fn violations(&self, password: &str, username: &str) -> Vec<String> {
        let mut problems = Vec::new();

        if password.chars().count() < self.min_length {
            problems.push(format!(
                "This password is too short. It must contain at least {} characters.",
                self.min_length
            ));
        }

        if !password.is_empty() && password.chars().all(|c| c.is_ascii_digit()) {
            problems.push("This password is entirely numeric.".to_string());
        }

        if too_similar(password, username) {
            problems.push("The password is too similar to the username.".to_string());
        }

        if !password.is_empty() && zxcvbn::zxcvbn(password, &[username]).score() < self.min_strength {
            problems.push("This password is too common or too easy to guess.".to_string());
        }

        problems
    }

    /// Validate `password`, returning a `password` field error on failure.
    pub fn validate(&self, password: &str, username: &str) -> Result<(), AppError> {
        let problems = self.violations(password, username);
        if problems.is_empty() {
            return Ok(());
        }
        let mut details = petadopt_core::error::FieldErrors::new();
        details.insert("password".to_string(), problems);
        Err(AppError::validation_fields(details))
    }
}

/// Whether one of password and username contains the other.
fn too_similar(password: &str, username: &str) -> bool {
    let username = username.trim().to_lowercase();
    if username.chars().count() < 3 {
        return false;
    }
    let password = password.to_lowercase();
    password.contains(&username) || (password.chars().count() >= 3 && username.contains(&password))
}
