//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Longest attribute code the catalog accepts.
pub const MAX_CODE_LEN: usize = 60;

/// Code of a catalog attribute (e.g. `gender`, `age_group`).
///
/// Codes start with a lowercase ASCII letter and continue with lowercase
/// letters, digits or underscores.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AttributeCode(String);

impl AttributeCode {
    pub fn parse(code: impl Into<String>) -> DomainResult<Self> {
        let code = code.into();
        Self::check(&code)?;
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn check(code: &str) -> DomainResult<()> {
        let mut chars = code.chars();
        match chars.next() {
            None => return Err(DomainError::invalid_code("code cannot be empty")),
            Some(c) if !c.is_ascii_lowercase() => {
                return Err(DomainError::invalid_code(format!(
                    "{code}: must start with a lowercase letter"
                )));
            }
            Some(_) => {}
        }

        if let Some(bad) = chars.find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')) {
            return Err(DomainError::invalid_code(format!(
                "{code}: unexpected character {bad:?}"
            )));
        }

        if code.len() > MAX_CODE_LEN {
            return Err(DomainError::invalid_code(format!(
                "{code}: longer than {MAX_CODE_LEN} characters"
            )));
        }

        Ok(())
    }
}

impl core::fmt::Display for AttributeCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AttributeCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for AttributeCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for AttributeCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<AttributeCode> for String {
    fn from(value: AttributeCode) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_snake_case_codes() {
        for code in ["gender", "age_group", "gtin", "seo_main_product", "weight_silver", "a1"] {
            let parsed = AttributeCode::parse(code).unwrap();
            assert_eq!(parsed.as_str(), code);
        }
    }

    #[test]
    fn rejects_empty_code() {
        let err = AttributeCode::parse("").unwrap_err();
        assert!(matches!(err, DomainError::InvalidCode(_)));
    }

    #[test]
    fn rejects_leading_digit_or_underscore() {
        assert!(AttributeCode::parse("1gender").is_err());
        assert!(AttributeCode::parse("_gender").is_err());
    }

    #[test]
    fn rejects_uppercase_and_punctuation() {
        assert!(AttributeCode::parse("Gender").is_err());
        assert!(AttributeCode::parse("age-group").is_err());
        assert!(AttributeCode::parse("age group").is_err());
    }

    #[test]
    fn rejects_overlong_code() {
        let code = format!("a{}", "b".repeat(MAX_CODE_LEN));
        let err = AttributeCode::parse(code).unwrap_err();
        match err {
            DomainError::InvalidCode(msg) if msg.contains("longer than") => {}
            other => panic!("Expected InvalidCode for overlong code, got {other:?}"),
        }
    }

    #[test]
    fn serde_validates_on_deserialize() {
        let ok: AttributeCode = serde_json::from_str("\"brand\"").unwrap();
        assert_eq!(ok.as_str(), "brand");

        let bad: Result<AttributeCode, _> = serde_json::from_str("\"Brand\"");
        assert!(bad.is_err());

        assert_eq!(serde_json::to_string(&ok).unwrap(), "\"brand\"");
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: every well-formed code parses and displays unchanged.
            #[test]
            fn well_formed_codes_round_trip_display(code in "[a-z][a-z0-9_]{0,59}") {
                let parsed = AttributeCode::parse(code.clone()).unwrap();
                prop_assert_eq!(parsed.to_string(), code);
            }
        }
    }
}
