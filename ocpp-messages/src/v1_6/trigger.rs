//! Remote trigger profile

use std::fmt;

use serde::{Deserialize, Serialize};

use super::types::*;
use super::CP_NAMESPACE;
use crate::error::ParseError;
use crate::xml::{XmlCodec, XmlElement};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerMessageRequest {
    pub requested_message: MessageTrigger,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connector_id: Option<u32>,
}

impl TriggerMessageRequest {
    pub fn new(requested_message: MessageTrigger) -> Self {
        Self {
            requested_message,
            connector_id: None,
        }
    }

    pub fn for_connector(requested_message: MessageTrigger, connector_id: u32) -> Self {
        Self {
            requested_message,
            connector_id: Some(connector_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TriggerMessageResponse {
    pub status: TriggerMessageStatus,
}

impl TriggerMessageResponse {
    pub fn new(status: TriggerMessageStatus) -> Self {
        Self { status }
    }
}

impl fmt::Display for TriggerMessageRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TriggerMessage ({})", self.requested_message)
    }
}

impl fmt::Display for TriggerMessageResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TriggerMessage -> {}", self.status)
    }
}

impl XmlCodec for TriggerMessageRequest {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element
            .with_text("requestedMessage", self.requested_message)
            .with_opt_text("connectorId", self.connector_id.as_ref())
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            requested_message: element.parse_child("requestedMessage")?,
            connector_id: element.opt_parse_child("connectorId")?,
        })
    }
}

impl XmlCodec for TriggerMessageResponse {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element.with_text("status", self.status)
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            status: element.parse_child("status")?,
        })
    }
}

message_pair!(V1_6, "TriggerMessage", TriggerMessageRequest => TriggerMessageResponse, xml: CP_NAMESPACE);

unconstrained!(TriggerMessageRequest, TriggerMessageResponse);
