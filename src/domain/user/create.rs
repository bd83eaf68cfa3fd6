//! User registration request

use std::fmt;

use serde::Deserialize;

use super::validation::{password_violations, username_violations};
use crate::domain::validation::ValidationError;

/// Registration payload carrying a plaintext password.
///
/// `Debug` and `Display` never render the password field. The username is
/// rendered as given, so redaction covers the password field only.
#[derive(Clone, Default, Deserialize)]
pub struct UserCreate {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl UserCreate {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }

    /// Check every field, reporting all violations at once
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = username_violations(self.username.as_deref());
        violations.extend(password_violations(self.password.as_deref()));

        ValidationError::check(violations)
    }
}

const REDACTED: &str = "[REDACTED]";

impl fmt::Debug for UserCreate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCreate")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| REDACTED))
            .finish()
    }
}

/// Renders the username verbatim; only the password field is redacted.
impl fmt::Display for UserCreate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "UserCreate(username={}, password={})",
            self.username.as_deref().unwrap_or("<none>"),
            REDACTED
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::Constraint;

    #[test]
    fn test_debug_hides_password() {
        let request = UserCreate::new("alice", "secret");
        let rendered = format!("{:?}", request);

        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("alice"));
        assert!(rendered.contains(REDACTED));
    }

    #[test]
    fn test_pretty_debug_and_display_hide_password() {
        for password in ["secret", "hunter2hunter2", "pässwörd"] {
            let request = UserCreate::new("bob", password);

            assert!(!format!("{:#?}", request).contains(password));
            assert!(!format!("{}", request).contains(password));
            assert!(!request.to_string().contains(password));
        }
    }

    #[test]
    fn test_display_redacts_password_field_only() {
        let request = UserCreate::new("carol_99", "correct-horse");

        assert_eq!(
            request.to_string(),
            "UserCreate(username=carol_99, password=[REDACTED])"
        );
        assert_eq!(
            UserCreate::default().to_string(),
            "UserCreate(username=<none>, password=[REDACTED])"
        );
    }

    #[test]
    fn test_deserialize_and_validate() {
        let request: UserCreate =
            serde_json::from_str(r#"{"username": "alice_01", "password": "correct-horse"}"#)
                .unwrap();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_missing_fields_reported() {
        let request: UserCreate = serde_json::from_str("{}").unwrap();
        let error = request.validate().unwrap_err();

        assert!(error.has("username", &Constraint::Required));
        assert!(error.has("password", &Constraint::Required));
    }

    #[test]
    fn test_violations_from_both_fields() {
        let error = UserCreate::new("a", "short").validate().unwrap_err();

        assert!(error.violations().iter().any(|v| v.field == "username"));
        assert!(error.violations().iter().any(|v| v.field == "password"));
    }
}
