use std::{fmt::Display, io, path::PathBuf, process::ExitStatus};

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    /// A value of the wrong kind was handed to a descriptor, or an option
    /// group was handed to the wrong builder phase.
    #[error("{name}: expected {expected}, got {found}")]
    TypeMismatch {
        name:     String,
        expected: String,
        found:    String,
    },

    #[error("{name}: value {value:?} not allowed. Valid: {}", .allowed.join(", "))]
    InvalidChoice {
        name:    String,
        value:   String,
        allowed: &'static [&'static str],
    },

    #[error("{name}: {message}")]
    RangeViolation { name: String, message: String },

    #[error("{name}: invalid value {value:?} ({reason})")]
    InvalidValue {
        name:   String,
        value:  String,
        reason: String,
    },

    #[error("Input path {0:?} does not exist")]
    PathNotFound(PathBuf),

    #[error("Input path {0:?} is neither a file nor a directory")]
    InvalidInputKind(PathBuf),

    #[error("Failed to start {program:?}: {source}")]
    Spawn {
        program: String,
        #[source]
        source:  io::Error,
    },

    #[error("Process failed: {exit_status}\ncommand: {command}\nstderr:\n{stderr}")]
    ProcessFailed {
        command:     String,
        exit_status: ExitStatus,
        stderr:      StringOrBytes,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    pub(crate) fn type_mismatch(
        name: &str,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            name:     name.to_owned(),
            expected: expected.into(),
            found:    found.into(),
        }
    }

    pub(crate) fn range(name: &str, message: impl Into<String>) -> Self {
        Self::RangeViolation {
            name:    name.to_owned(),
            message: message.into(),
        }
    }

    pub(crate) fn invalid(
        name: &str,
        value: impl Display,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            name:   name.to_owned(),
            value:  value.to_string(),
            reason: reason.into(),
        }
    }

    /// True for errors raised while validating an option value.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::TypeMismatch { .. }
                | Self::InvalidChoice { .. }
                | Self::RangeViolation { .. }
                | Self::InvalidValue { .. }
        )
    }
}

/// Captured process output that is printed as text when it is valid UTF-8.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringOrBytes {
    pub inner: Vec<u8>,
}

impl From<Vec<u8>> for StringOrBytes {
    fn from(inner: Vec<u8>) -> Self {
        Self { inner }
    }
}

impl Display for StringOrBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Ok(s) = std::str::from_utf8(&self.inner) {
            write!(f, "{s}")
        } else {
            write!(f, "{:?}", self.inner)
        }
    }
}
