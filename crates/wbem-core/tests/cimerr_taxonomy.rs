//! CIM status code taxonomy.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use wbem_core::{CimError, CimStatus, WbemError};

const DEFINED: [(i64, &str, &str); 26] = [
    (1, "CIM_ERR_FAILED", "A general error occurred"),
    (2, "CIM_ERR_ACCESS_DENIED", "Resource not available"),
    (3, "CIM_ERR_INVALID_NAMESPACE", "The target namespace does not exist"),
    (4, "CIM_ERR_INVALID_PARAMETER", "Parameter value(s) invalid"),
    (5, "CIM_ERR_INVALID_CLASS", "The specified Class does not exist"),
    (6, "CIM_ERR_NOT_FOUND", "Requested object could not be found"),
    (7, "CIM_ERR_NOT_SUPPORTED", "Operation not supported"),
    (8, "CIM_ERR_CLASS_HAS_CHILDREN", "Class has subclasses"),
    (9, "CIM_ERR_CLASS_HAS_INSTANCES", "Class has instances"),
    (10, "CIM_ERR_INVALID_SUPERCLASS", "Superclass does not exist"),
    (11, "CIM_ERR_ALREADY_EXISTS", "Object already exists"),
    (12, "CIM_ERR_NO_SUCH_PROPERTY", "Property does not exist"),
    (13, "CIM_ERR_TYPE_MISMATCH", "Value incompatible with type"),
    (14, "CIM_ERR_QUERY_LANGUAGE_NOT_SUPPORTED", "Query language not supported"),
    (15, "CIM_ERR_INVALID_QUERY", "Query not valid"),
    (16, "CIM_ERR_METHOD_NOT_AVAILABLE", "Extrinsic method not executed"),
    (17, "CIM_ERR_METHOD_NOT_FOUND", "Extrinsic method does not exist"),
    (20, "CIM_ERR_NAMESPACE_NOT_EMPTY", "Namespace not empty"),
    (21, "CIM_ERR_INVALID_ENUMERATION_CONTEXT", "Enumeration context is invalid"),
    (22, "CIM_ERR_INVALID_OPERATION_TIMEOUT", "Operation timeout not supported"),
    (23, "CIM_ERR_PULL_HAS_BEEN_ABANDONED", "Pull operation has been abandoned"),
    (24, "CIM_ERR_PULL_CANNOT_BE_ABANDONED", "Attempt to abandon a pull operation failed"),
    (25, "CIM_ERR_FILTERED_ENUMERATION_NOT_SUPPORTED", "Filtered pulled enumeration not supported"),
    (26, "CIM_ERR_CONTINUATION_ON_ERROR_NOT_SUPPORTED", "WBEM server does not support continuation on error"),
    (27, "CIM_ERR_SERVER_LIMITS_EXCEEDED", "WBEM server limits exceeded"),
    (28, "CIM_ERR_SERVER_IS_SHUTTING_DOWN", "WBEM server is shutting down"),
];

#[test]
fn every_defined_code_keeps_its_identity() {
    for (code, name, description) in DEFINED {
        let e = CimError::from_code(code);
        assert_eq!(i64::from(e.code()), code, "{name}");
        assert_eq!(e.name(), name);
        assert_eq!(e.description(), description);
    }
}

#[test]
fn undefined_codes_collapse_to_failed() {
    for code in [0, 18, 19, 29, 100, -5, i64::MAX, i64::MIN] {
        let e = CimError::from_code(code);
        assert_eq!(e.status(), CimStatus::Failed, "code {code}");
        assert_eq!(e.code(), 1);
        assert_eq!(e.name(), "CIM_ERR_FAILED");
    }
}

#[test]
fn display_is_code_name_description() {
    let e = CimError::from_code(6);
    assert_eq!(
        e.to_string(),
        "6 - CIM_ERR_NOT_FOUND - Requested object could not be found"
    );
}

#[test]
fn local_failures_map_to_failed() {
    let e = WbemError::MissingArgument("className");
    assert_eq!(e.cim_error(), Some(CimError::failed()));

    let e = WbemError::malformed("no SIMPLERSP");
    assert_eq!(e.cim_error().map(|c| c.code()), Some(1));

    let e = WbemError::Http {
        status: 401,
        message: "401 Unauthorized".into(),
    };
    assert_eq!(e.cim_error(), None);
    assert_eq!(e.to_string(), "HTTP_ERR - 401 - 401 Unauthorized");
}

#[test]
fn malformed_keeps_raw_body() {
    let e = WbemError::malformed("bad").with_body(b"<CIM/>");
    match e {
        WbemError::Malformed { body, .. } => assert_eq!(body.as_deref(), Some("<CIM/>")),
        other => panic!("unexpected {other:?}"),
    }
}
