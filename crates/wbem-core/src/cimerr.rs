//! CIM status code taxonomy (DSP0200 / DSP0201 `ERROR` codes).
//!
//! The defined range is sparse: 1..=17 and 20..=28. Codes 18 and 19 are
//! reserved. Any code outside the defined set collapses to
//! `CIM_ERR_FAILED` (1), which is what servers that only emit defined codes
//! expect a client to report.

use std::fmt;

use serde::Serialize;

/// Defined CIM status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CimStatus {
    /// A general error occurred that is not covered by a more specific code.
    Failed,
    /// Access to a CIM resource is not available to the client.
    AccessDenied,
    /// The target namespace does not exist.
    InvalidNamespace,
    /// One or more parameter values passed to the method are not valid.
    InvalidParameter,
    /// The specified class does not exist.
    InvalidClass,
    /// The requested object cannot be found.
    NotFound,
    /// The requested operation is not supported.
    NotSupported,
    /// The class has subclasses.
    ClassHasChildren,
    /// The class has instances.
    ClassHasInstances,
    /// The specified superclass does not exist.
    InvalidSuperclass,
    /// The object already exists.
    AlreadyExists,
    /// The specified property does not exist.
    NoSuchProperty,
    /// The value supplied is not compatible with the type.
    TypeMismatch,
    /// The query language is not recognized or supported.
    QueryLanguageNotSupported,
    /// The query is not valid for the specified query language.
    InvalidQuery,
    /// The extrinsic method cannot be invoked.
    MethodNotAvailable,
    /// The specified extrinsic method does not exist.
    MethodNotFound,
    /// The specified namespace is not empty.
    NamespaceNotEmpty,
    /// The enumeration context is invalid.
    InvalidEnumerationContext,
    /// The operation timeout is not supported by the server.
    InvalidOperationTimeout,
    /// The pull operation has been abandoned.
    PullHasBeenAbandoned,
    /// The attempt to abandon a concurrent pull operation failed.
    PullCannotBeAbandoned,
    /// Filtered pulled enumeration is not supported.
    FilteredEnumerationNotSupported,
    /// Continuation on error is not supported.
    ContinuationOnErrorNotSupported,
    /// The server failed the operation based upon exceeding server limits.
    ServerLimitsExceeded,
    /// The server is shutting down.
    ServerIsShuttingDown,
}

impl CimStatus {
    /// Classify a wire code. Undefined codes (including the reserved 18 and
    /// 19) become `Failed`.
    pub fn from_code(code: i64) -> Self {
        match code {
            2 => CimStatus::AccessDenied,
            3 => CimStatus::InvalidNamespace,
            4 => CimStatus::InvalidParameter,
            5 => CimStatus::InvalidClass,
            6 => CimStatus::NotFound,
            7 => CimStatus::NotSupported,
            8 => CimStatus::ClassHasChildren,
            9 => CimStatus::ClassHasInstances,
            10 => CimStatus::InvalidSuperclass,
            11 => CimStatus::AlreadyExists,
            12 => CimStatus::NoSuchProperty,
            13 => CimStatus::TypeMismatch,
            14 => CimStatus::QueryLanguageNotSupported,
            15 => CimStatus::InvalidQuery,
            16 => CimStatus::MethodNotAvailable,
            17 => CimStatus::MethodNotFound,
            20 => CimStatus::NamespaceNotEmpty,
            21 => CimStatus::InvalidEnumerationContext,
            22 => CimStatus::InvalidOperationTimeout,
            23 => CimStatus::PullHasBeenAbandoned,
            24 => CimStatus::PullCannotBeAbandoned,
            25 => CimStatus::FilteredEnumerationNotSupported,
            26 => CimStatus::ContinuationOnErrorNotSupported,
            27 => CimStatus::ServerLimitsExceeded,
            28 => CimStatus::ServerIsShuttingDown,
            _ => CimStatus::Failed,
        }
    }

    pub fn code(self) -> u16 {
        match self {
            CimStatus::Failed => 1,
            CimStatus::AccessDenied => 2,
            CimStatus::InvalidNamespace => 3,
            CimStatus::InvalidParameter => 4,
            CimStatus::InvalidClass => 5,
            CimStatus::NotFound => 6,
            CimStatus::NotSupported => 7,
            CimStatus::ClassHasChildren => 8,
            CimStatus::ClassHasInstances => 9,
            CimStatus::InvalidSuperclass => 10,
            CimStatus::AlreadyExists => 11,
            CimStatus::NoSuchProperty => 12,
            CimStatus::TypeMismatch => 13,
            CimStatus::QueryLanguageNotSupported => 14,
            CimStatus::InvalidQuery => 15,
            CimStatus::MethodNotAvailable => 16,
            CimStatus::MethodNotFound => 17,
            CimStatus::NamespaceNotEmpty => 20,
            CimStatus::InvalidEnumerationContext => 21,
            CimStatus::InvalidOperationTimeout => 22,
            CimStatus::PullHasBeenAbandoned => 23,
            CimStatus::PullCannotBeAbandoned => 24,
            CimStatus::FilteredEnumerationNotSupported => 25,
            CimStatus::ContinuationOnErrorNotSupported => 26,
            CimStatus::ServerLimitsExceeded => 27,
            CimStatus::ServerIsShuttingDown => 28,
        }
    }

    /// Symbolic name as used by DSP0200 (`CIM_ERR_*`).
    pub fn name(self) -> &'static str {
        match self {
            CimStatus::Failed => "CIM_ERR_FAILED",
            CimStatus::AccessDenied => "CIM_ERR_ACCESS_DENIED",
            CimStatus::InvalidNamespace => "CIM_ERR_INVALID_NAMESPACE",
            CimStatus::InvalidParameter => "CIM_ERR_INVALID_PARAMETER",
            CimStatus::InvalidClass => "CIM_ERR_INVALID_CLASS",
            CimStatus::NotFound => "CIM_ERR_NOT_FOUND",
            CimStatus::NotSupported => "CIM_ERR_NOT_SUPPORTED",
            CimStatus::ClassHasChildren => "CIM_ERR_CLASS_HAS_CHILDREN",
            CimStatus::ClassHasInstances => "CIM_ERR_CLASS_HAS_INSTANCES",
            CimStatus::InvalidSuperclass => "CIM_ERR_INVALID_SUPERCLASS",
            CimStatus::AlreadyExists => "CIM_ERR_ALREADY_EXISTS",
            CimStatus::NoSuchProperty => "CIM_ERR_NO_SUCH_PROPERTY",
            CimStatus::TypeMismatch => "CIM_ERR_TYPE_MISMATCH",
            CimStatus::QueryLanguageNotSupported => "CIM_ERR_QUERY_LANGUAGE_NOT_SUPPORTED",
            CimStatus::InvalidQuery => "CIM_ERR_INVALID_QUERY",
            CimStatus::MethodNotAvailable => "CIM_ERR_METHOD_NOT_AVAILABLE",
            CimStatus::MethodNotFound => "CIM_ERR_METHOD_NOT_FOUND",
            CimStatus::NamespaceNotEmpty => "CIM_ERR_NAMESPACE_NOT_EMPTY",
            CimStatus::InvalidEnumerationContext => "CIM_ERR_INVALID_ENUMERATION_CONTEXT",
            CimStatus::InvalidOperationTimeout => "CIM_ERR_INVALID_OPERATION_TIMEOUT",
            CimStatus::PullHasBeenAbandoned => "CIM_ERR_PULL_HAS_BEEN_ABANDONED",
            CimStatus::PullCannotBeAbandoned => "CIM_ERR_PULL_CANNOT_BE_ABANDONED",
            CimStatus::FilteredEnumerationNotSupported => {
                "CIM_ERR_FILTERED_ENUMERATION_NOT_SUPPORTED"
            }
            CimStatus::ContinuationOnErrorNotSupported => {
                "CIM_ERR_CONTINUATION_ON_ERROR_NOT_SUPPORTED"
            }
            CimStatus::ServerLimitsExceeded => "CIM_ERR_SERVER_LIMITS_EXCEEDED",
            CimStatus::ServerIsShuttingDown => "CIM_ERR_SERVER_IS_SHUTTING_DOWN",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            CimStatus::Failed => "A general error occurred",
            CimStatus::AccessDenied => "Resource not available",
            CimStatus::InvalidNamespace => "The target namespace does not exist",
            CimStatus::InvalidParameter => "Parameter value(s) invalid",
            CimStatus::InvalidClass => "The specified Class does not exist",
            CimStatus::NotFound => "Requested object could not be found",
            CimStatus::NotSupported => "Operation not supported",
            CimStatus::ClassHasChildren => "Class has subclasses",
            CimStatus::ClassHasInstances => "Class has instances",
            CimStatus::InvalidSuperclass => "Superclass does not exist",
            CimStatus::AlreadyExists => "Object already exists",
            CimStatus::NoSuchProperty => "Property does not exist",
            CimStatus::TypeMismatch => "Value incompatible with type",
            CimStatus::QueryLanguageNotSupported => "Query language not supported",
            CimStatus::InvalidQuery => "Query not valid",
            CimStatus::MethodNotAvailable => "Extrinsic method not executed",
            CimStatus::MethodNotFound => "Extrinsic method does not exist",
            CimStatus::NamespaceNotEmpty => "Namespace not empty",
            CimStatus::InvalidEnumerationContext => "Enumeration context is invalid",
            CimStatus::InvalidOperationTimeout => "Operation timeout not supported",
            CimStatus::PullHasBeenAbandoned => "Pull operation has been abandoned",
            CimStatus::PullCannotBeAbandoned => "Attempt to abandon a pull operation failed",
            CimStatus::FilteredEnumerationNotSupported => {
                "Filtered pulled enumeration not supported"
            }
            CimStatus::ContinuationOnErrorNotSupported => {
                "WBEM server does not support continuation on error"
            }
            CimStatus::ServerLimitsExceeded => "WBEM server limits exceeded",
            CimStatus::ServerIsShuttingDown => "WBEM server is shutting down",
        }
    }
}

/// Immutable `{code, name, description}` triple produced from a wire code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CimError {
    status: CimStatus,
}

impl CimError {
    /// Classify `code`; see [`CimStatus::from_code`] for the clamping rule.
    pub fn from_code(code: i64) -> Self {
        Self {
            status: CimStatus::from_code(code),
        }
    }

    /// `CIM_ERR_FAILED`, used for local validation and structural failures.
    pub fn failed() -> Self {
        Self {
            status: CimStatus::Failed,
        }
    }

    pub fn status(&self) -> CimStatus {
        self.status
    }

    pub fn code(&self) -> u16 {
        self.status.code()
    }

    pub fn name(&self) -> &'static str {
        self.status.name()
    }

    pub fn description(&self) -> &'static str {
        self.status.description()
    }
}

impl From<CimStatus> for CimError {
    fn from(status: CimStatus) -> Self {
        Self { status }
    }
}

impl fmt::Display for CimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} - {}", self.code(), self.name(), self.description())
    }
}

impl std::error::Error for CimError {}
