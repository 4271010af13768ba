//! Identifier case conversion for output names

use crate::error::{DdlParseError, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Case applied to table and column names on output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameCase {
    /// Keep the name as declared in the DDL
    #[default]
    Original,
    /// Convert to lower case
    Lower,
    /// Convert to upper case
    Upper,
}

impl NameCase {
    /// Apply this case to `name`, borrowing when no conversion is needed
    #[must_use]
    pub fn apply<'a>(&self, name: &'a str) -> Cow<'a, str> {
        match self {
            Self::Original => Cow::Borrowed(name),
            Self::Lower => Cow::Owned(name.to_lowercase()),
            Self::Upper => Cow::Owned(name.to_uppercase()),
        }
    }

    /// Configuration spelling of this option
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Lower => "lower",
            Self::Upper => "upper",
        }
    }
}

impl fmt::Display for NameCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NameCase {
    type Err = DdlParseError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "original" => Ok(Self::Original),
            "lower" => Ok(Self::Lower),
            "upper" => Ok(Self::Upper),
            other => Err(DdlParseError::config(format!(
                "Unknown name case '{other}', expected one of: original, lower, upper"
            ))),
        }
    }
}
