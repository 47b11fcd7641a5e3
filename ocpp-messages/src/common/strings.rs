//! Bounded OCPP strings (`CiString20Type`, `CiString50Type`, ...)

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// String of at most `N` characters.
///
/// OCPP compares these case-insensitively for some fields (id tags);
/// equality here is exact, use `eq_ignore_case` where OCPP says otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CiString<const N: usize>(String);

pub type CiString8 = CiString<8>;
pub type CiString20 = CiString<20>;
pub type CiString25 = CiString<25>;
pub type CiString36 = CiString<36>;
pub type CiString50 = CiString<50>;
pub type CiString255 = CiString<255>;
pub type CiString500 = CiString<500>;
pub type CiString1000 = CiString<1000>;
pub type CiString1024 = CiString<1024>;
pub type CiString2500 = CiString<2500>;

impl<const N: usize> CiString<N> {
    pub const MAX_LEN: usize = N;

    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let len = value.chars().count();
        if len > N {
            return Err(ValidationError::new(
                "string",
                format!("{} characters exceed the limit of {}", len, N),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn eq_ignore_case(&self, other: &str) -> bool {
        self.0.to_lowercase() == other.to_lowercase()
    }
}

impl<const N: usize> Deref for CiString<N> {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl<const N: usize> AsRef<str> for CiString<N> {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<const N: usize> fmt::Display for CiString<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<const N: usize> FromStr for CiString<N> {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl<const N: usize> TryFrom<String> for CiString<N> {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<const N: usize> TryFrom<&str> for CiString<N> {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<const N: usize> From<CiString<N>> for String {
    fn from(value: CiString<N>) -> Self {
        value.0
    }
}

impl<const N: usize> PartialEq<str> for CiString<N> {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl<const N: usize> PartialEq<&str> for CiString<N> {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_limit_counts_chars() {
        assert!(CiString20::new("a".repeat(20)).is_ok());
        assert!(CiString20::new("a".repeat(21)).is_err());
        // 20 multi-byte characters still fit
        assert!(CiString20::new("é".repeat(20)).is_ok());
    }

    #[test]
    fn test_serde_rejects_overlong() {
        let ok: Result<CiString8, _> = serde_json::from_str("\"de-DE\"");
        assert_eq!(ok.unwrap(), "de-DE");

        let err = serde_json::from_str::<CiString8>("\"much-too-long\"").unwrap_err();
        assert!(err.to_string().contains("exceed"));
    }

    #[test]
    fn test_eq_ignore_case() {
        let tag = CiString20::new("AbC123").unwrap();
        assert!(tag.eq_ignore_case("abc123"));
        assert_ne!(tag, CiString20::new("abc123").unwrap());
    }
}
