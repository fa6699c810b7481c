//! National identification numbers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{ValidationError, ValidationResult};

/// Leading letters accepted for an NRIC/FIN.
const NRIC_PREFIXES: [char; 5] = ['S', 'T', 'F', 'G', 'M'];

/// A patient's national identification number (NRIC).
///
/// Stored upper-cased; two NRICs are equal iff their canonical text is equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Nric(String);

impl Nric {
    /// Validate and canonicalize an NRIC.
    pub fn parse(raw: &str) -> ValidationResult<Self> {
        let canonical = raw.trim().to_uppercase();
        if !Self::is_valid(&canonical) {
            return Err(ValidationError::Nric(raw.to_string()));
        }
        Ok(Self(canonical))
    }

    /// Check whether an upper-cased string is a well-formed NRIC.
    pub fn is_valid(candidate: &str) -> bool {
        let chars: Vec<char> = candidate.chars().collect();
        chars.len() == 9
            && NRIC_PREFIXES.contains(&chars[0])
            && chars[1..8].iter().all(|c| c.is_ascii_digit())
            && chars[8].is_ascii_uppercase()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Nric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Nric {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Nric {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Nric> for String {
    fn from(nric: Nric) -> Self {
        nric.0
    }
}
