//! OCPP-J RPC framing
//!
//! OCPP over WebSocket wraps every payload in a JSON array:
//! - CALL: [2, messageId, action, payload]
//! - CALLRESULT: [3, messageId, payload]
//! - CALLERROR: [4, messageId, errorCode, errorDescription, errorDetails]
//! - CALLRESULTERROR (2.1): [5, messageId, errorCode, errorDescription, errorDetails]
//! - SEND (2.1): [6, messageId, action, payload]
//!
//! Only the framing lives here; moving frames over a socket is left to the
//! caller.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::warn;

use crate::common::{Envelope, OcppMessage, OcppRequest, OcppResponse, OcppVersion, RequestId};
use crate::error::ParseError;

/// OCPP-J message type identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    Call = 2,
    CallResult = 3,
    CallError = 4,
    CallResultError = 5,
    Send = 6,
}

impl MessageType {
    pub fn from_id(id: i64) -> Option<Self> {
        match id {
            2 => Some(MessageType::Call),
            3 => Some(MessageType::CallResult),
            4 => Some(MessageType::CallError),
            5 => Some(MessageType::CallResultError),
            6 => Some(MessageType::Send),
            _ => None,
        }
    }
}

/// OCPP-J error codes
///
/// `FormationViolation` and `OccurenceConstraintViolation` are the OCPP 1.6
/// spellings of `FormatViolation` and `OccurrenceConstraintViolation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    FormatViolation,
    FormationViolation,
    GenericError,
    InternalError,
    MessageTypeNotSupported,
    NotImplemented,
    NotSupported,
    OccurrenceConstraintViolation,
    OccurenceConstraintViolation,
    PropertyConstraintViolation,
    ProtocolError,
    RpcFrameworkError,
    SecurityError,
    TypeConstraintViolation,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// CALL frame (request)
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub message_id: RequestId,
    pub action: String,
    pub payload: Value,
}

impl Call {
    pub fn new<T: OcppRequest>(message_id: RequestId, request: &T) -> Self {
        Self {
            message_id,
            action: T::ACTION.to_string(),
            payload: request.to_json(),
        }
    }

    /// CALL carrying an envelope's payload and signatures
    pub fn from_envelope<T: OcppRequest>(envelope: &Envelope<T>) -> Self {
        Self {
            message_id: envelope.request_id.clone(),
            action: T::ACTION.to_string(),
            payload: envelope.to_json(),
        }
    }

    /// Parse the payload as `T`, checking the action first
    pub fn payload_as<T: OcppRequest>(&self) -> Result<T, ParseError> {
        check_action::<T>(&self.action)?;
        T::try_from_json(&self.payload)
    }

    pub fn into_envelope<T: OcppRequest>(self) -> Result<Envelope<T>, ParseError> {
        check_action::<T>(&self.action)?;
        Envelope::try_from_json(self.message_id, &self.payload)
    }

    pub fn to_json(&self) -> Value {
        json!([MessageType::Call as i32, self.message_id, self.action, self.payload])
    }
}

/// CALLRESULT frame (success response)
#[derive(Debug, Clone, PartialEq)]
pub struct CallResult {
    pub message_id: RequestId,
    pub payload: Value,
}

impl CallResult {
    pub fn new<T: OcppResponse>(message_id: RequestId, response: &T) -> Self {
        Self {
            message_id,
            payload: response.to_json(),
        }
    }

    pub fn from_envelope<T: OcppResponse>(envelope: &Envelope<T>) -> Self {
        Self {
            message_id: envelope.request_id.clone(),
            payload: envelope.to_json(),
        }
    }

    /// Parse the payload as a specific response type
    pub fn payload_as<T: OcppResponse>(&self) -> Result<T, ParseError> {
        T::try_from_json(&self.payload)
    }

    pub fn into_envelope<T: OcppResponse>(self) -> Result<Envelope<T>, ParseError> {
        Envelope::try_from_json(self.message_id, &self.payload)
    }

    pub fn to_json(&self) -> Value {
        json!([MessageType::CallResult as i32, self.message_id, self.payload])
    }
}

/// CALLERROR / CALLRESULTERROR frame
#[derive(Debug, Clone, PartialEq)]
pub struct CallError {
    pub message_id: RequestId,
    pub error_code: ErrorCode,
    pub error_description: String,
    pub error_details: Value,
}

impl CallError {
    pub fn new(message_id: RequestId, error_code: ErrorCode, error_description: impl Into<String>) -> Self {
        Self {
            message_id,
            error_code,
            error_description: error_description.into(),
            error_details: Value::Object(Map::new()),
        }
    }

    /// Answer a CALL whose payload could not be parsed
    pub fn from_parse_error(message_id: RequestId, error: &ParseError, version: OcppVersion) -> Self {
        Self::new(message_id, error.rpc_error_code(version), error.to_string())
    }

    fn to_json_as(&self, message_type: MessageType) -> Value {
        json!([
            message_type as i32,
            self.message_id,
            self.error_code.to_string(),
            self.error_description,
            self.error_details
        ])
    }
}

/// SEND frame (2.1): unconfirmed message, no response expected
#[derive(Debug, Clone, PartialEq)]
pub struct Send {
    pub message_id: RequestId,
    pub action: String,
    pub payload: Value,
}

/// Any parsed OCPP-J frame
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    Call(Call),
    CallResult(CallResult),
    CallError(CallError),
    CallResultError(CallError),
    Send(Send),
}

impl Frame {
    /// Parse a frame from JSON bytes
    pub fn parse(bytes: &[u8]) -> Result<Self, ParseError> {
        let array: Vec<Value> = serde_json::from_slice(bytes)
            .map_err(|e| ParseError::InvalidFrame(e.to_string()))?;

        let type_id = array
            .first()
            .and_then(Value::as_i64)
            .ok_or_else(|| ParseError::InvalidFrame("missing message type id".to_string()))?;
        let message_type = MessageType::from_id(type_id)
            .ok_or_else(|| ParseError::InvalidFrame(format!("unknown message type {}", type_id)))?;

        let expected_len = match message_type {
            MessageType::Call | MessageType::Send => 4,
            MessageType::CallResult => 3,
            MessageType::CallError | MessageType::CallResultError => 5,
        };
        if array.len() != expected_len {
            return Err(ParseError::InvalidFrame(format!(
                "{:?} frame has {} elements, expected {}",
                message_type,
                array.len(),
                expected_len
            )));
        }

        let message_id = RequestId::parse(str_at(&array, 1, "messageId")?)?;

        match message_type {
            MessageType::Call | MessageType::Send => {
                let action = str_at(&array, 2, "action")?.to_string();
                let payload = object_at(&array, 3, "payload")?;
                Ok(if message_type == MessageType::Call {
                    Frame::Call(Call { message_id, action, payload })
                } else {
                    Frame::Send(Send { message_id, action, payload })
                })
            }
            MessageType::CallResult => {
                let payload = object_at(&array, 2, "payload")?;
                Ok(Frame::CallResult(CallResult { message_id, payload }))
            }
            MessageType::CallError | MessageType::CallResultError => {
                let code = str_at(&array, 2, "errorCode")?;
                let error_code = serde_json::from_value(Value::String(code.to_string()))
                    .unwrap_or_else(|_| {
                        warn!("Unknown OCPP error code '{}', treating as GenericError", code);
                        ErrorCode::GenericError
                    });
                let error_description = str_at(&array, 3, "errorDescription")?.to_string();
                let error_details = object_at(&array, 4, "errorDetails")?;
                let error = CallError {
                    message_id,
                    error_code,
                    error_description,
                    error_details,
                };
                Ok(if message_type == MessageType::CallError {
                    Frame::CallError(error)
                } else {
                    Frame::CallResultError(error)
                })
            }
        }
    }

    pub fn message_type(&self) -> MessageType {
        match self {
            Frame::Call(_) => MessageType::Call,
            Frame::CallResult(_) => MessageType::CallResult,
            Frame::CallError(_) => MessageType::CallError,
            Frame::CallResultError(_) => MessageType::CallResultError,
            Frame::Send(_) => MessageType::Send,
        }
    }

    pub fn message_id(&self) -> &RequestId {
        match self {
            Frame::Call(c) => &c.message_id,
            Frame::CallResult(r) => &r.message_id,
            Frame::CallError(e) | Frame::CallResultError(e) => &e.message_id,
            Frame::Send(s) => &s.message_id,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Frame::Call(c) => c.to_json(),
            Frame::CallResult(r) => r.to_json(),
            Frame::CallError(e) => e.to_json_as(MessageType::CallError),
            Frame::CallResultError(e) => e.to_json_as(MessageType::CallResultError),
            Frame::Send(s) => json!([MessageType::Send as i32, s.message_id, s.action, s.payload]),
        }
    }

    /// Serialize to the wire text
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_json().to_string().into_bytes()
    }
}

fn check_action<T: OcppMessage>(action: &str) -> Result<(), ParseError> {
    if action != T::ACTION {
        return Err(ParseError::ActionMismatch {
            expected: T::ACTION.to_string(),
            found: action.to_string(),
        });
    }
    Ok(())
}

fn str_at<'a>(array: &'a [Value], index: usize, what: &str) -> Result<&'a str, ParseError> {
    array[index]
        .as_str()
        .ok_or_else(|| ParseError::InvalidFrame(format!("{} must be a string", what)))
}

fn object_at(array: &[Value], index: usize, what: &str) -> Result<Value, ParseError> {
    match &array[index] {
        Value::Object(_) => Ok(array[index].clone()),
        _ => Err(ParseError::InvalidFrame(format!("{} must be an object", what))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_parsing() {
        let json = r#"[2, "msg-123", "Heartbeat", {}]"#;
        let frame = Frame::parse(json.as_bytes()).unwrap();

        match frame {
            Frame::Call(call) => {
                assert_eq!(call.message_id.as_str(), "msg-123");
                assert_eq!(call.action, "Heartbeat");
            }
            _ => panic!("Expected Call"),
        }
    }

    #[test]
    fn test_call_result_parsing() {
        let json = r#"[3, "msg-123", {"currentTime": "2026-01-20T12:00:00Z"}]"#;
        let frame = Frame::parse(json.as_bytes()).unwrap();

        assert_eq!(frame.message_type(), MessageType::CallResult);
        assert_eq!(frame.message_id().as_str(), "msg-123");
    }

    #[test]
    fn test_call_error_parsing() {
        let json = r#"[4, "msg-123", "NotImplemented", "Action not supported", {}]"#;
        let frame = Frame::parse(json.as_bytes()).unwrap();

        match frame {
            Frame::CallError(error) => {
                assert_eq!(error.message_id.as_str(), "msg-123");
                assert_eq!(error.error_code, ErrorCode::NotImplemented);
            }
            _ => panic!("Expected CallError"),
        }
    }

    #[test]
    fn test_unknown_error_code_falls_back() {
        let json = r#"[5, "msg-9", "SomethingNew", "", {}]"#;
        match Frame::parse(json.as_bytes()).unwrap() {
            Frame::CallResultError(error) => assert_eq!(error.error_code, ErrorCode::GenericError),
            _ => panic!("Expected CallResultError"),
        }
    }

    #[test]
    fn test_send_frame_roundtrip() {
        let json = r#"[6,"msg-7","NotifyPeriodicEventStream",{"id":1}]"#;
        let frame = Frame::parse(json.as_bytes()).unwrap();
        assert_eq!(frame.message_type(), MessageType::Send);
        assert_eq!(String::from_utf8(frame.to_bytes()).unwrap(), json);
    }

    #[test]
    fn test_malformed_frames() {
        for bad in [
            r#"{}"#,
            r#"[]"#,
            r#"[9, "id", {}]"#,
            r#"[2, "id", "Heartbeat"]"#,
            r#"[2, 17, "Heartbeat", {}]"#,
            r#"[2, "id", "Heartbeat", []]"#,
            r#"[3, "", {}]"#,
            r#"[4, "id", "GenericError", "x"]"#,
        ] {
            let err = Frame::parse(bad.as_bytes()).unwrap_err();
            assert!(!err.to_string().is_empty(), "{}", bad);
        }
    }
}
