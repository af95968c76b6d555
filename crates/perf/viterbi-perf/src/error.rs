//! Error types for sample normalization.

use std::fmt;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while turning raw JSON records into typed samples.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A tag string did not name any variant of a closed enumeration.
    InvalidEnumerationValue {
        /// The offending string, as given.
        value: String,
        /// Name of the enumeration the string was matched against.
        kind: &'static str,
    },
    /// A required key is absent from a record.
    MissingField {
        /// The JSON key that was expected.
        field: &'static str,
    },
    /// A record is structurally invalid (wrong types, bad timing data).
    MalformedSample {
        /// Human-readable description of the problem.
        reason: String,
    },
    /// A failure in one record of a document, tagged with its position.
    Record {
        /// Zero-based index of the record in the input array.
        index: usize,
        /// The underlying failure.
        source: Box<Error>,
    },
}

impl Error {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedSample {
            reason: reason.into(),
        }
    }

    /// Strip any record-position wrapper and return the root failure.
    pub fn root(&self) -> &Error {
        match self {
            Self::Record { source, .. } => source.root(),
            other => other,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEnumerationValue { value, kind } => {
                write!(f, "invalid {kind} '{value}'")
            }
            Self::MissingField { field } => write!(f, "missing required field '{field}'"),
            Self::MalformedSample { reason } => write!(f, "malformed sample: {reason}"),
            Self::Record { index, source } => write!(f, "record {index}: {source}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Record { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
