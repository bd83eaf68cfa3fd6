//! Offer creation request

use serde::{Deserialize, Serialize};

use crate::domain::validation::{check_length, is_empty, Constraint, ValidationError, Violation};

pub const MAX_TITLE_LENGTH: usize = 120;

/// Fields a caller may set when publishing an offer.
///
/// Carries neither the identifier nor the publisher; unknown JSON fields such
/// as `id` or `publisher` are ignored during deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferCreate {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price_cents: i64,
}

impl OfferCreate {
    pub fn new(title: impl Into<String>, price_cents: i64) -> Self {
        Self {
            title: title.into(),
            description: None,
            price_cents,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Check every field, reporting all violations at once
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Vec::new();

        if is_empty(Some(&self.title)) {
            violations.push(Violation::new("title", Constraint::Required));
        } else {
            check_length(&mut violations, "title", &self.title, 1, MAX_TITLE_LENGTH);
        }

        if self.price_cents < 0 {
            violations.push(Violation::new("price_cents", Constraint::NonNegative));
        }

        ValidationError::check(violations)
    }
}
