//! Constraint violations reported by request validation

use std::fmt;

use serde::Serialize;

/// A single declared constraint on an input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "constraint", rename_all = "snake_case")]
pub enum Constraint {
    /// Value must be present and non-empty
    Required,
    /// Character count must fall within `min..=max`
    Length { min: usize, max: usize },
    /// Value must match the given pattern
    Pattern { pattern: &'static str },
    /// Numeric value must be zero or greater
    NonNegative,
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "must not be empty"),
            Self::Length { min, max } => {
                write!(f, "length must be between {} and {} characters", min, max)
            }
            Self::Pattern { pattern } => write!(f, "must match pattern {}", pattern),
            Self::NonNegative => write!(f, "must not be negative"),
        }
    }
}

/// A constraint that failed for a named field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: &'static str,
    #[serde(flatten)]
    pub constraint: Constraint,
}

impl Violation {
    pub fn new(field: &'static str, constraint: Constraint) -> Self {
        Self { field, constraint }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.constraint)
    }
}

/// Every constraint that failed for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    pub fn single(field: &'static str, constraint: Constraint) -> Self {
        Self::new(vec![Violation::new(field, constraint)])
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Whether `field` failed `constraint`
    pub fn has(&self, field: &str, constraint: &Constraint) -> bool {
        self.violations
            .iter()
            .any(|v| v.field == field && &v.constraint == constraint)
    }

    /// Turn collected violations into a result; empty means valid
    pub fn check(violations: Vec<Violation>) -> Result<(), Self> {
        if violations.is_empty() {
            Ok(())
        } else {
            Err(Self::new(violations))
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.violations.iter().map(ToString::to_string).collect();
        write!(f, "{}", rendered.join("; "))
    }
}

impl std::error::Error for ValidationError {}

/// Absent or zero-length. Whitespace-only strings are not empty.
pub fn is_empty(value: Option<&str>) -> bool {
    value.is_none_or(str::is_empty)
}

/// Character length check, counted in chars rather than bytes
pub fn check_length(
    violations: &mut Vec<Violation>,
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) {
    let length = value.chars().count();

    if length < min || length > max {
        violations.push(Violation::new(field, Constraint::Length { min, max }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_empty() {
        assert!(is_empty(None));
        assert!(is_empty(Some("")));
        assert!(!is_empty(Some(" ")));
        assert!(!is_empty(Some("\t\n")));
        assert!(!is_empty(Some("value")));
    }

    #[test]
    fn test_check_length_counts_chars() {
        let mut violations = Vec::new();
        check_length(&mut violations, "name", "äöü", 3, 3);
        assert!(violations.is_empty());

        check_length(&mut violations, "name", "ab", 3, 5);
        assert_eq!(
            violations,
            vec![Violation::new("name", Constraint::Length { min: 3, max: 5 })]
        );
    }

    #[test]
    fn test_check_empty_violations_is_ok() {
        assert!(ValidationError::check(Vec::new()).is_ok());
    }

    #[test]
    fn test_error_lists_every_violation() {
        let error = ValidationError::check(vec![
            Violation::new("username", Constraint::Length { min: 3, max: 24 }),
            Violation::new("password", Constraint::Required),
        ])
        .unwrap_err();

        assert_eq!(error.violations().len(), 2);
        assert!(error.has("password", &Constraint::Required));
        assert_eq!(
            error.to_string(),
            "username length must be between 3 and 24 characters; password must not be empty"
        );
    }

    #[test]
    fn test_violation_serialization() {
        let violation = Violation::new("title", Constraint::Length { min: 1, max: 120 });
        let json = serde_json::to_value(&violation).unwrap();

        assert_eq!(json["field"], "title");
        assert_eq!(json["constraint"], "length");
        assert_eq!(json["min"], 1);
        assert_eq!(json["max"], 120);
    }
}
