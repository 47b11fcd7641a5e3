//! Message traits shared by every OCPP version
//!
//! Each concrete message implements `OcppMessage` (metadata + JSON codec)
//! and exactly one of `OcppRequest` / `OcppResponse`, which tie a request
//! to its response type.

use std::fmt;
use std::hash::Hash;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::config::CodecConfig;
use crate::error::{ParseError, ValidationError};

wire_enum! {
    /// Protocol version a message belongs to
    pub enum OcppVersion {
        V1_6 => "1.6",
        V2_1 => "2.1",
    }
}

wire_enum! {
    /// Direction of a message within an action
    pub enum MessageKind {
        Request => "Request",
        Response => "Response",
    }
}

/// Hook applied after the built-in JSON parser: receives the raw JSON and
/// the parsed message, returns the message to keep.
pub type CustomJsonParser<T> = dyn Fn(&Value, T) -> T;

/// Hook applied after the built-in JSON serializer.
pub type CustomJsonSerializer<T> = dyn Fn(&T, Value) -> Value;

/// Rules a value must satisfy beyond what its field types enforce
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Name shared by the SOAP body element and the JSON-LD context:
/// `Reset` + Request -> `resetRequest`.
pub fn message_name(action: &str, kind: MessageKind) -> String {
    let mut chars = action.chars();
    let mut name = String::with_capacity(action.len() + 8);
    if let Some(first) = chars.next() {
        name.extend(first.to_lowercase());
        name.push_str(chars.as_str());
    }
    name.push_str(kind.as_str());
    name
}

/// A single OCPP message type
pub trait OcppMessage:
    Serialize + DeserializeOwned + Validate + Clone + PartialEq + Eq + Hash + fmt::Debug + fmt::Display
{
    /// OCPP action name, e.g. `Reset`
    const ACTION: &'static str;
    const KIND: MessageKind;
    const VERSION: OcppVersion;

    fn message_name() -> String {
        message_name(Self::ACTION, Self::KIND)
    }

    /// JSON-LD context URI under the default base
    fn context() -> String {
        Self::context_in(&CodecConfig::default())
    }

    fn context_in(config: &CodecConfig) -> String {
        format!(
            "{}/v{}/{}",
            config.context_base.trim_end_matches('/'),
            Self::VERSION,
            Self::message_name()
        )
    }

    /// Parse and validate a JSON payload. Never panics.
    fn try_from_json(json: &Value) -> Result<Self, ParseError> {
        Self::try_from_json_with(json, None)
    }

    fn try_from_json_with(
        json: &Value,
        custom: Option<&CustomJsonParser<Self>>,
    ) -> Result<Self, ParseError> {
        let result = <Self as serde::Deserialize>::deserialize(json)
            .map_err(ParseError::from)
            .map(|message| match custom {
                Some(hook) => hook(json, message),
                None => message,
            })
            .and_then(|message| {
                message.validate()?;
                Ok(message)
            });

        match &result {
            Ok(_) => trace!("Parsed {} {} from JSON", Self::ACTION, Self::KIND),
            Err(e) => debug!("Rejected {} {} JSON: {}", Self::ACTION, Self::KIND, e),
        }
        result
    }

    fn try_from_json_str(text: &str) -> Result<Self, ParseError> {
        let json: Value = serde_json::from_str(text)?;
        Self::try_from_json(&json)
    }

    /// Parse a JSON payload that is known to be valid.
    ///
    /// # Panics
    ///
    /// Panics with the parse error when the payload is invalid. Use
    /// `try_from_json` for untrusted input.
    #[track_caller]
    fn from_json(json: &Value) -> Self {
        match Self::try_from_json(json) {
            Ok(message) => message,
            Err(e) => panic!("invalid {} {}: {}", Self::ACTION, Self::KIND, e),
        }
    }

    /// JSON payload of the message.
    ///
    /// Infallible: message types derive `Serialize` over string-keyed maps
    /// and finite numbers, which `serde_json::to_value` always accepts.
    fn to_json(&self) -> Value {
        self.to_json_with(None)
    }

    fn to_json_with(&self, custom: Option<&CustomJsonSerializer<Self>>) -> Value {
        // Only a hand-written Serialize impl returning an error lands here
        let json = serde_json::to_value(self).unwrap_or_else(|e| {
            warn!("Failed to serialize {} {}: {}", Self::ACTION, Self::KIND, e);
            Value::Null
        });
        match custom {
            Some(hook) => hook(self, json),
            None => json,
        }
    }

    /// JSON payload tagged with its `@context`
    fn to_json_ld(&self) -> Value {
        self.to_json_ld_in(&CodecConfig::default())
    }

    fn to_json_ld_in(&self, config: &CodecConfig) -> Value {
        let mut json = self.to_json();
        if let Value::Object(map) = &mut json {
            map.insert("@context".to_string(), Value::String(Self::context_in(config)));
        }
        json
    }
}

/// A message that opens an exchange
pub trait OcppRequest: OcppMessage {
    type Response: OcppResponse;
}

/// A message that answers an `OcppRequest`
pub trait OcppResponse: OcppMessage {
    type Request: OcppRequest;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_name() {
        assert_eq!(message_name("Reset", MessageKind::Request), "resetRequest");
        assert_eq!(
            message_name("GetLocalListVersion", MessageKind::Response),
            "getLocalListVersionResponse"
        );
    }

    #[test]
    fn test_version_wire_strings() {
        assert_eq!(OcppVersion::V1_6.to_string(), "1.6");
        assert_eq!("2.1".parse::<OcppVersion>().unwrap(), OcppVersion::V2_1);
        assert!("2.0.1".parse::<OcppVersion>().is_err());
    }
}
