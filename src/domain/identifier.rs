//! Identifier conversion between UUIDs and their persisted text form
//!
//! Every identifier is stored and sent over the wire as the canonical
//! hyphenated lowercase hex form (`xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`).
//! Parsing is strict: braced, URN, simple and uppercase forms are rejected so
//! that `to_persisted(from_persisted(s)) == s` for every accepted `s`.

use thiserror::Error;
use uuid::Uuid;

/// Length of the canonical textual identifier
pub const PERSISTED_ID_LENGTH: usize = 36;

const HYPHEN_POSITIONS: [usize; 4] = [8, 13, 18, 23];

/// Errors raised when a textual identifier is not in canonical form
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdParseError {
    #[error("Identifier must be {expected} characters long, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Identifier has '{found}' at position {index}, expected '-'")]
    MissingHyphen { index: usize, found: char },

    #[error("Identifier contains invalid character '{found}' at position {index}")]
    InvalidCharacter { index: usize, found: char },

    #[error("Identifier is malformed: {0}")]
    Malformed(String),
}

/// Render an identifier in its canonical persisted form
pub fn to_persisted(id: &Uuid) -> String {
    id.hyphenated().to_string()
}

/// Parse a canonical persisted identifier
pub fn from_persisted(value: &str) -> Result<Uuid, IdParseError> {
    let actual = value.chars().count();

    if actual != PERSISTED_ID_LENGTH || value.len() != PERSISTED_ID_LENGTH {
        return Err(IdParseError::InvalidLength {
            expected: PERSISTED_ID_LENGTH,
            actual,
        });
    }

    for (index, found) in value.chars().enumerate() {
        if HYPHEN_POSITIONS.contains(&index) {
            if found != '-' {
                return Err(IdParseError::MissingHyphen { index, found });
            }
        } else if !matches!(found, '0'..='9' | 'a'..='f') {
            return Err(IdParseError::InvalidCharacter { index, found });
        }
    }

    Uuid::try_parse(value).map_err(|e| IdParseError::Malformed(e.to_string()))
}

/// Declares a `Copy` identifier newtype over [`Uuid`] that serializes as its
/// canonical persisted string.
macro_rules! persisted_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(uuid::Uuid);

        impl $name {
            /// Generate a fresh random identifier
            pub fn new() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            /// Parse the canonical persisted form
            pub fn parse(value: &str) -> Result<Self, $crate::domain::identifier::IdParseError> {
                $crate::domain::identifier::from_persisted(value).map(Self)
            }

            /// Canonical persisted form
            pub fn to_persisted(&self) -> String {
                $crate::domain::identifier::to_persisted(&self.0)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.to_persisted())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::domain::identifier::IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::domain::identifier::IdParseError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(&value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.to_persisted()
            }
        }

        impl From<uuid::Uuid> for $name {
            fn from(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }
        }
    };
}

pub(crate) use persisted_id;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_generated_ids() {
        for _ in 0..100 {
            let id = Uuid::new_v4();
            assert_eq!(from_persisted(&to_persisted(&id)).unwrap(), id);
        }
    }

    #[test]
    fn test_text_round_trip_is_identity() {
        let text = "3f2504e0-4f89-11d3-9a0c-0305e82c3301";
        let id = from_persisted(text).unwrap();
        assert_eq!(to_persisted(&id), text);
    }

    #[test]
    fn test_to_persisted_is_lowercase_hyphenated() {
        let id = Uuid::from_u128(0xABCDEF01_2345_6789_ABCD_EF0123456789);
        let text = to_persisted(&id);

        assert_eq!(text, "abcdef01-2345-6789-abcd-ef0123456789");
        assert_eq!(text.len(), PERSISTED_ID_LENGTH);
    }

    #[test]
    fn test_nil_id() {
        let text = "00000000-0000-0000-0000-000000000000";
        assert_eq!(from_persisted(text).unwrap(), Uuid::nil());
    }

    #[test]
    fn test_wrong_length() {
        assert_eq!(
            from_persisted(""),
            Err(IdParseError::InvalidLength { expected: 36, actual: 0 })
        );
        assert_eq!(
            from_persisted("3f2504e0-4f89-11d3-9a0c-0305e82c330"),
            Err(IdParseError::InvalidLength { expected: 36, actual: 35 })
        );
    }

    #[test]
    fn test_alternate_uuid_forms_rejected() {
        // simple, braced and URN forms are accepted by uuid but are not canonical
        assert!(from_persisted("3f2504e04f8911d39a0c0305e82c3301").is_err());
        assert!(from_persisted("{3f2504e0-4f89-11d3-9a0c-0305e82c3301}").is_err());
        assert!(from_persisted("urn:uuid:3f2504e0-4f89-11d3-9a0c-0305e82c3301").is_err());
    }

    #[test]
    fn test_uppercase_rejected() {
        assert_eq!(
            from_persisted("3F2504E0-4F89-11D3-9A0C-0305E82C3301"),
            Err(IdParseError::InvalidCharacter { index: 1, found: 'F' })
        );
    }

    #[test]
    fn test_misplaced_hyphen() {
        assert_eq!(
            from_persisted("3f2504e04-f89-11d3-9a0c-0305e82c3301"),
            Err(IdParseError::MissingHyphen { index: 8, found: '4' })
        );
    }

    #[test]
    fn test_invalid_hex_character() {
        assert_eq!(
            from_persisted("3f2504e0-4f89-11d3-9a0c-0305e82c330g"),
            Err(IdParseError::InvalidCharacter { index: 35, found: 'g' })
        );
    }

    #[test]
    fn test_multibyte_input_rejected() {
        // 36 bytes but fewer characters
        let text = "é".repeat(18);
        assert_eq!(text.len(), 36);
        assert!(matches!(
            from_persisted(&text),
            Err(IdParseError::InvalidLength { actual: 18, .. })
        ));
    }

    #[test]
    fn test_newtype_built_from_uuid() {
        let uuid = Uuid::from_u128(0x550e8400_e29b_41d4_a716_446655440000);
        let id = crate::domain::UserId::from(uuid);

        assert_eq!(id.to_persisted(), "550e8400-e29b-41d4-a716-446655440000");
        assert_eq!(crate::domain::UserId::parse(&id.to_persisted()).unwrap(), id);
    }
}
