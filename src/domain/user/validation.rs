//! User validation rules

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::validation::{
    check_length, is_empty, Constraint, ValidationError, Violation,
};

pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MAX_USERNAME_LENGTH: usize = 24;
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Allowed username characters
pub const USERNAME_PATTERN: &str = "[a-zA-Z0-9_]+";

static USERNAME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_]+$").unwrap());

/// Collect every username constraint that `username` breaks
pub fn username_violations(username: Option<&str>) -> Vec<Violation> {
    let Some(username) = username else {
        return vec![Violation::new("username", Constraint::Required)];
    };

    let mut violations = Vec::new();

    check_length(
        &mut violations,
        "username",
        username,
        MIN_USERNAME_LENGTH,
        MAX_USERNAME_LENGTH,
    );

    if !USERNAME_REGEX.is_match(username) {
        violations.push(Violation::new(
            "username",
            Constraint::Pattern {
                pattern: USERNAME_PATTERN,
            },
        ));
    }

    violations
}

/// Collect every password constraint that `password` breaks
pub fn password_violations(password: Option<&str>) -> Vec<Violation> {
    if is_empty(password) {
        return vec![Violation::new("password", Constraint::Required)];
    }

    let mut violations = Vec::new();

    if let Some(password) = password {
        check_length(
            &mut violations,
            "password",
            password,
            MIN_PASSWORD_LENGTH,
            MAX_PASSWORD_LENGTH,
        );
    }

    violations
}

/// Validate a username: 3-24 characters from `[a-zA-Z0-9_]`
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    ValidationError::check(username_violations(Some(username)))
}

/// Validate a password: non-empty, 8-128 characters
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    ValidationError::check(password_violations(Some(password)))
}
