//! Error types for query compilation.
//!
//! Every failure raised by this crate is a local validation failure. It is
//! carried as a [`QueryError`] with an [`ErrorKind`] drawn from a fixed
//! vocabulary of URNs, and rendered for clients as an [`ErrorEnvelope`].
//!
//! # Error Mapping
//!
//! | Kind | URN | HTTP Status |
//! |------|-----|-------------|
//! | InvalidSyntax | `urn:dx:cat:InvalidSyntax` | 400 |
//! | InvalidGeoValue | `urn:dx:cat:InvalidGeoValue` | 400 |
//! | InvalidGeoParam | `urn:dx:cat:InvalidGeoParam` | 400 |
//! | InvalidPropertyValue | `urn:dx:cat:InvalidPropertyValue` | 400 |
//! | OperationNotAllowed | `urn:dx:cat:OperationNotAllowed` | 400 |
//! | BadFilter | `urn:dx:cat:BadFilter` | 400 |
//! | BadTextQuery | `urn:dx:cat:BadTextQuery` | 400 |
//! | InvalidParamValue | `urn:dx:cat:InvalidParamValue` | 400 |
//! | ItemNotFound | `urn:dx:cat:ItemNotFound` | 404 |
//! | InvalidRelationSearch | `urn:dx:cat:InvalidRelationSearch` | 400 |
//! | BadRequest | `urn:dx:cat:badRequest` | 400 |

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias used by every fallible operation in this crate.
pub type QueryResult<T> = Result<T, QueryError>;

/// The stable error vocabulary.
///
/// Clients pattern-match on the URNs, so neither the variants nor their
/// URNs may be renamed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No search classifier matched the request.
    InvalidSyntax,
    /// A geometry value (coordinates, distance, relation) is malformed.
    InvalidGeoValue,
    /// A geometry parameter is missing or unknown.
    InvalidGeoParam,
    /// Attribute property/value arrays are missing or mismatched.
    InvalidPropertyValue,
    /// The response filter was requested without the search gate.
    OperationNotAllowed,
    /// The response filter names no fields.
    BadFilter,
    /// The free-text query is missing or blank.
    BadTextQuery,
    /// A request parameter has an invalid value.
    InvalidParamValue,
    /// The requested item does not exist.
    ItemNotFound,
    /// The relationship is not defined for the subject's item type.
    InvalidRelationSearch,
    /// Generic malformed request.
    BadRequest,
}

impl ErrorKind {
    /// Every kind, in declaration order.
    pub const ALL: [ErrorKind; 11] = [
        ErrorKind::InvalidSyntax,
        ErrorKind::InvalidGeoValue,
        ErrorKind::InvalidGeoParam,
        ErrorKind::InvalidPropertyValue,
        ErrorKind::OperationNotAllowed,
        ErrorKind::BadFilter,
        ErrorKind::BadTextQuery,
        ErrorKind::InvalidParamValue,
        ErrorKind::ItemNotFound,
        ErrorKind::InvalidRelationSearch,
        ErrorKind::BadRequest,
    ];

    /// Returns the URN sent to clients in the envelope `type` field.
    pub fn urn(&self) -> &'static str {
        match self {
            ErrorKind::InvalidSyntax => "urn:dx:cat:InvalidSyntax",
            ErrorKind::InvalidGeoValue => "urn:dx:cat:InvalidGeoValue",
            ErrorKind::InvalidGeoParam => "urn:dx:cat:InvalidGeoParam",
            ErrorKind::InvalidPropertyValue => "urn:dx:cat:InvalidPropertyValue",
            ErrorKind::OperationNotAllowed => "urn:dx:cat:OperationNotAllowed",
            ErrorKind::BadFilter => "urn:dx:cat:BadFilter",
            ErrorKind::BadTextQuery => "urn:dx:cat:BadTextQuery",
            ErrorKind::InvalidParamValue => "urn:dx:cat:InvalidParamValue",
            ErrorKind::ItemNotFound => "urn:dx:cat:ItemNotFound",
            ErrorKind::InvalidRelationSearch => "urn:dx:cat:InvalidRelationSearch",
            ErrorKind::BadRequest => "urn:dx:cat:badRequest",
        }
    }

    /// Returns the short human-readable title for the envelope.
    pub fn title(&self) -> &'static str {
        match self {
            ErrorKind::InvalidSyntax => "Invalid Syntax",
            ErrorKind::InvalidGeoValue => "Invalid geo value",
            ErrorKind::InvalidGeoParam => "Invalid geo parameter",
            ErrorKind::InvalidPropertyValue => "Invalid Property Value",
            ErrorKind::OperationNotAllowed => "Operation not allowed",
            ErrorKind::BadFilter => "Bad filters applied",
            ErrorKind::BadTextQuery => "Bad text query values",
            ErrorKind::InvalidParamValue => "Invalid Param Value",
            ErrorKind::ItemNotFound => "Item is not found",
            ErrorKind::InvalidRelationSearch => "Invalid relationship search",
            ErrorKind::BadRequest => "bad request parameter",
        }
    }

    /// Returns the HTTP status the service layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorKind::ItemNotFound => 404,
            _ => 400,
        }
    }

    /// Looks a kind up by URN, case-insensitively.
    pub fn from_urn(urn: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.urn().eq_ignore_ascii_case(urn))
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.urn())
    }
}

/// The single error type of the crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}: {detail}", .kind.title())]
pub struct QueryError {
    kind: ErrorKind,
    detail: String,
}

impl QueryError {
    /// Creates an error of the given kind.
    pub fn new(kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    /// Shorthand for [`ErrorKind::InvalidSyntax`].
    pub fn invalid_syntax(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidSyntax, detail)
    }

    /// Shorthand for [`ErrorKind::InvalidGeoValue`].
    pub fn invalid_geo_value(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidGeoValue, detail)
    }

    /// Shorthand for [`ErrorKind::InvalidGeoParam`].
    pub fn invalid_geo_param(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidGeoParam, detail)
    }

    /// Shorthand for [`ErrorKind::InvalidParamValue`].
    pub fn invalid_param_value(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidParamValue, detail)
    }

    /// The error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The request-specific detail message.
    pub fn detail(&self) -> &str {
        &self.detail
    }

    /// Renders the error as a client-facing envelope.
    pub fn to_envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope::from(self)
    }
}

/// The client-facing error body: `{type, title, detail}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// URN of the error kind.
    #[serde(rename = "type")]
    pub urn: String,
    /// Title of the error kind.
    pub title: String,
    /// Request-specific detail.
    pub detail: String,
}

impl From<&QueryError> for ErrorEnvelope {
    fn from(err: &QueryError) -> Self {
        Self {
            urn: err.kind.urn().to_string(),
            title: err.kind.title().to_string(),
            detail: err.detail.clone(),
        }
    }
}

impl From<QueryError> for ErrorEnvelope {
    fn from(err: QueryError) -> Self {
        Self {
            urn: err.kind.urn().to_string(),
            title: err.kind.title().to_string(),
            detail: err.detail,
        }
    }
}
