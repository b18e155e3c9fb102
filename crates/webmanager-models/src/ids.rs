//! Type-safe ID wrappers for Web Manager records.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Macro to generate integer ID newtypes with common functionality.
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Creates an ID from its numeric value.
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the numeric value.
            pub const fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self)
            }
        }
    };
}

define_id!(BlockId);
define_id!(TargetId);

/// Error returned when a string is not a valid proposal code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidProposalCode(pub String);

impl fmt::Display for InvalidProposalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid proposal code '{}' (expected e.g. 2024-1-SCI-017)",
            self.0
        )
    }
}

impl std::error::Error for InvalidProposalCode {}

fn proposal_code_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\d{4}-\d-[A-Z]+-\d{3}$").expect("proposal code pattern is valid")
    })
}

/// Proposal code such as `2024-1-SCI-017` (year, semester, type, number).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProposalCode(String);

impl ProposalCode {
    /// Parses and validates a proposal code.
    pub fn parse(s: &str) -> Result<Self, InvalidProposalCode> {
        let trimmed = s.trim();
        if proposal_code_pattern().is_match(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(InvalidProposalCode(s.to_string()))
        }
    }

    /// Returns the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the semester part of the code, e.g. `2024-1`.
    pub fn semester(&self) -> &str {
        self.0.get(..6).unwrap_or(&self.0)
    }
}

impl fmt::Display for ProposalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProposalCode {
    type Err = InvalidProposalCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ProposalCode {
    type Error = InvalidProposalCode;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<ProposalCode> for String {
    fn from(code: ProposalCode) -> Self {
        code.0
    }
}

impl AsRef<str> for ProposalCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
