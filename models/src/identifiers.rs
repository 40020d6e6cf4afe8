// models/src/identifiers.rs

use core::ops::Deref;
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::{ValidationError, ValidationResult};

/// A patient identifier such as `P001`. Identifiers are between 1 and 255
/// bytes long and contain no whitespace, so they can be used verbatim as
/// URL path segments and storage keys.
#[derive(Clone, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PatientId(String);

impl PatientId {
    /// Creates a new patient identifier.
    ///
    /// # Errors
    /// Returns a `ValidationError` if the `value` is empty, longer than 255
    /// bytes, or contains whitespace or control characters.
    pub fn new(value: String) -> ValidationResult<Self> {
        if value.is_empty() || value.len() > u8::MAX as usize {
            return Err(ValidationError::InvalidIdentifierLength);
        }
        if value.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(ValidationError::InvalidIdentifier(value));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PatientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for PatientId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromStr for PatientId {
    type Err = ValidationError;

    fn from_str(s: &str) -> ValidationResult<Self> {
        Self::new(s.to_string())
    }
}

impl TryFrom<String> for PatientId {
    type Error = ValidationError;

    fn try_from(value: String) -> ValidationResult<Self> {
        Self::new(value)
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<PatientId> for String {
    fn from(value: PatientId) -> Self {
        value.0
    }
}

impl PartialEq<str> for PatientId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for PatientId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
