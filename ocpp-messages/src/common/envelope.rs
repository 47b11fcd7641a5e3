//! Request / response envelope
//!
//! Correlation id, timestamp and attached signatures travel next to the
//! payload instead of inside every message type. Signatures are carried
//! as opaque data; creating or verifying them is up to the caller.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::common::{OcppMessage, OcppRequest};
use crate::error::ParseError;

/// JSON property that carries signatures next to the payload fields
pub const SIGNATURES_PROPERTY: &str = "signatures";

/// OCPP-J limits message ids to 36 characters
pub const MAX_REQUEST_ID_LEN: usize = 36;

/// Correlates a request with its response
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    /// Random UUID v4 id
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn parse(id: &str) -> Result<Self, ParseError> {
        if id.is_empty() {
            return Err(ParseError::MissingField("messageId".to_string()));
        }
        if id.chars().count() > MAX_REQUEST_ID_LEN {
            return Err(ParseError::invalid(
                "messageId",
                format!("longer than {} characters", MAX_REQUEST_ID_LEN),
            ));
        }
        Ok(Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RequestId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Signature attached to a message
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
    pub key_id: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signing_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding_method: Option<String>,
}

impl Signature {
    pub fn new(key_id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            value: value.into(),
            signing_method: None,
            encoding_method: None,
        }
    }

    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert("keyId".to_string(), Value::String(self.key_id.clone()));
        map.insert("value".to_string(), Value::String(self.value.clone()));
        if let Some(method) = &self.signing_method {
            map.insert("signingMethod".to_string(), Value::String(method.clone()));
        }
        if let Some(method) = &self.encoding_method {
            map.insert("encodingMethod".to_string(), Value::String(method.clone()));
        }
        Value::Object(map)
    }
}

/// A message plus its exchange metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope<T> {
    pub request_id: RequestId,
    pub timestamp: DateTime<Utc>,
    pub signatures: Vec<Signature>,
    pub payload: T,
}

impl<T: OcppMessage> Envelope<T> {
    /// Wrap a payload under a fresh request id, stamped now
    pub fn new(payload: T) -> Self {
        Self {
            request_id: RequestId::new(),
            timestamp: Utc::now(),
            signatures: Vec::new(),
            payload,
        }
    }

    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = request_id;
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_signature(mut self, signature: Signature) -> Self {
        self.signatures.push(signature);
        self
    }

    pub fn action(&self) -> &'static str {
        T::ACTION
    }

    /// Payload JSON with the signatures merged in
    pub fn to_json(&self) -> Value {
        let mut json = self.payload.to_json();
        if !self.signatures.is_empty() {
            if let Value::Object(map) = &mut json {
                let signatures = self.signatures.iter().map(Signature::to_json).collect();
                map.insert(SIGNATURES_PROPERTY.to_string(), Value::Array(signatures));
            }
        }
        json
    }

    /// Split the signatures off a received payload and parse the rest
    pub fn try_from_json(request_id: RequestId, json: &Value) -> Result<Self, ParseError> {
        let (payload, signatures) = match json {
            Value::Object(map) if map.contains_key(SIGNATURES_PROPERTY) => {
                let mut map = map.clone();
                let raw = map.remove(SIGNATURES_PROPERTY).unwrap_or(Value::Null);
                let signatures = Vec::<Signature>::deserialize(&raw)
                    .map_err(|e| ParseError::invalid(SIGNATURES_PROPERTY, e))?;
                (T::try_from_json(&Value::Object(map))?, signatures)
            }
            _ => (T::try_from_json(json)?, Vec::new()),
        };

        Ok(Self {
            request_id,
            timestamp: Utc::now(),
            signatures,
            payload,
        })
    }
}

impl<T: OcppRequest> Envelope<T> {
    /// Answer this request; the response keeps the request id
    pub fn respond(&self, response: T::Response) -> Envelope<T::Response> {
        Envelope {
            request_id: self.request_id.clone(),
            timestamp: Utc::now(),
            signatures: Vec::new(),
            payload: response,
        }
    }
}
