//! Error types
//!
//! Every fallible operation in this crate reports one of two errors:
//! - `ValidationError`: a value is well-formed but breaks an OCPP rule
//!   (string too long, connector 0 where > 0 is required, ...)
//! - `ParseError`: a JSON, XML or RPC frame could not be turned into a
//!   message. Wraps `ValidationError` for values that parse but do not
//!   validate.

use thiserror::Error;

use crate::rpc::ErrorCode;
use crate::common::OcppVersion;

/// A value violates an OCPP constraint
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Prefix the field path, e.g. `chargingSchedule` + `limit`
    /// becomes `chargingSchedule.limit`.
    pub fn within(mut self, parent: &str) -> Self {
        self.field = format!("{}.{}", parent, self.field);
        self
    }
}

/// Errors while reading a message from its wire representation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid JSON: {0}")]
    Json(String),

    #[error("invalid XML: {0}")]
    Xml(String),

    #[error("missing mandatory field '{0}'")]
    MissingField(String),

    #[error("invalid value for '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    #[error("unknown {kind} value '{value}'")]
    UnknownVariant { kind: &'static str, value: String },

    #[error("unexpected element <{found}>, expected <{expected}>")]
    UnexpectedElement { expected: String, found: String },

    #[error("unexpected namespace '{found}' on <{element}>, expected '{expected}'")]
    UnexpectedNamespace {
        element: String,
        expected: String,
        found: String,
    },

    #[error("unknown action: {0}")]
    UnknownAction(String),

    #[error("action mismatch: frame carries '{found}', expected '{expected}'")]
    ActionMismatch { expected: String, found: String },

    #[error("invalid RPC frame: {0}")]
    InvalidFrame(String),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        let message = err.to_string();
        // serde reports absent fields as "missing field `name` at line .."
        if let Some(rest) = message.strip_prefix("missing field `") {
            if let Some((field, _)) = rest.split_once('`') {
                return ParseError::MissingField(field.to_string());
            }
        }
        ParseError::Json(message)
    }
}

impl ParseError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl ToString) -> Self {
        ParseError::InvalidField {
            field: field.into(),
            reason: reason.to_string(),
        }
    }

    /// OCPP-J error code to answer a CALL whose payload failed with this error.
    ///
    /// OCPP 1.6 spells two of the codes differently from 2.x.
    pub fn rpc_error_code(&self, version: OcppVersion) -> ErrorCode {
        match self {
            ParseError::Json(_) | ParseError::Xml(_) | ParseError::UnexpectedElement { .. } => {
                match version {
                    OcppVersion::V1_6 => ErrorCode::FormationViolation,
                    OcppVersion::V2_1 => ErrorCode::FormatViolation,
                }
            }
            ParseError::MissingField(_) => match version {
                OcppVersion::V1_6 => ErrorCode::OccurenceConstraintViolation,
                OcppVersion::V2_1 => ErrorCode::OccurrenceConstraintViolation,
            },
            ParseError::UnknownVariant { .. }
            | ParseError::InvalidField { .. }
            | ParseError::Validation(_) => ErrorCode::PropertyConstraintViolation,
            ParseError::UnexpectedNamespace { .. } => ErrorCode::TypeConstraintViolation,
            ParseError::UnknownAction(_) => ErrorCode::NotImplemented,
            ParseError::ActionMismatch { .. } => ErrorCode::ProtocolError,
            ParseError::InvalidFrame(_) => ErrorCode::RpcFrameworkError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, serde::Deserialize)]
    #[allow(dead_code)]
    struct IdTagOnly {
        #[serde(rename = "idTag")]
        id_tag: String,
    }

    #[test]
    fn test_validation_error_path() {
        let err = ValidationError::new("limit", "must not be negative").within("chargingSchedulePeriod");
        assert_eq!(err.field, "chargingSchedulePeriod.limit");
        assert_eq!(err.to_string(), "chargingSchedulePeriod.limit: must not be negative");
    }

    #[test]
    fn test_rpc_error_code_spelling() {
        let err = ParseError::MissingField("idTag".to_string());
        assert_eq!(err.rpc_error_code(OcppVersion::V1_6), ErrorCode::OccurenceConstraintViolation);
        assert_eq!(err.rpc_error_code(OcppVersion::V2_1), ErrorCode::OccurrenceConstraintViolation);

        let err: ParseError = serde_json::from_str::<IdTagOnly>("{}").unwrap_err().into();
        assert_eq!(err, ParseError::MissingField("idTag".to_string()));

        let err = ParseError::Json("expected value".to_string());
        assert_eq!(err.rpc_error_code(OcppVersion::V1_6), ErrorCode::FormationViolation);
        assert_eq!(err.rpc_error_code(OcppVersion::V2_1), ErrorCode::FormatViolation);
    }
}
