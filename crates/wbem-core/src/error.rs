//! Shared error type across wbem crates.

use thiserror::Error;

use crate::cimerr::CimError;

/// Coarse error class (stable API). Callers branch on this instead of
/// matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// A required argument was missing; nothing was sent.
    Validation,
    /// Network failure, timeout, or non-200 HTTP status.
    Transport,
    /// Well-formed response carrying an `ERROR` element.
    Protocol,
    /// Response body could not be decoded into the expected shape.
    Structural,
    /// Configuration could not be loaded or validated.
    Config,
}

impl ErrorClass {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorClass::Validation => "VALIDATION",
            ErrorClass::Transport => "TRANSPORT",
            ErrorClass::Protocol => "PROTOCOL",
            ErrorClass::Structural => "STRUCTURAL",
            ErrorClass::Config => "CONFIG",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, WbemError>;

/// Unified error type used by core and client.
#[derive(Debug, Error)]
pub enum WbemError {
    #[error("missing required argument: {0}")]
    MissingArgument(&'static str),
    #[error("transport: {0}")]
    Transport(String),
    #[error("request timed out")]
    Timeout,
    #[error("HTTP_ERR - {status} - {message}")]
    Http { status: u16, message: String },
    #[error("{error}")]
    Cim {
        error: CimError,
        /// Description text supplied by the server, if any.
        server_description: Option<String>,
    },
    #[error("malformed document: {reason}")]
    Malformed {
        reason: String,
        /// Raw response body, kept for diagnostics.
        body: Option<String>,
    },
    #[error("config: {0}")]
    Config(String),
}

impl WbemError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        WbemError::Malformed {
            reason: reason.into(),
            body: None,
        }
    }

    /// Attach the raw body to a structural error. Other errors pass through.
    pub fn with_body(self, raw: &[u8]) -> Self {
        match self {
            WbemError::Malformed { reason, .. } => WbemError::Malformed {
                reason,
                body: Some(String::from_utf8_lossy(raw).into_owned()),
            },
            other => other,
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            WbemError::MissingArgument(_) => ErrorClass::Validation,
            WbemError::Transport(_) | WbemError::Timeout | WbemError::Http { .. } => {
                ErrorClass::Transport
            }
            WbemError::Cim { .. } => ErrorClass::Protocol,
            WbemError::Malformed { .. } => ErrorClass::Structural,
            WbemError::Config(_) => ErrorClass::Config,
        }
    }

    /// Map onto the CIM status taxonomy. Transport and config failures carry
    /// no CIM code.
    pub fn cim_error(&self) -> Option<CimError> {
        match self {
            WbemError::Cim { error, .. } => Some(*error),
            WbemError::MissingArgument(_) | WbemError::Malformed { .. } => {
                Some(CimError::failed())
            }
            _ => None,
        }
    }
}

impl From<CimError> for WbemError {
    fn from(error: CimError) -> Self {
        WbemError::Cim {
            error,
            server_description: None,
        }
    }
}
