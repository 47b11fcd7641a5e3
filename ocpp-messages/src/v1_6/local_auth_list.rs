//! Local authorization list management

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::types::*;
use super::CP_NAMESPACE;
use crate::common::Validate;
use crate::error::{ParseError, ValidationError};
use crate::xml::{XmlCodec, XmlElement};

// ============================================================================
// GetLocalListVersion
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GetLocalListVersionRequest {}

impl GetLocalListVersionRequest {
    pub fn new() -> Self {
        Self {}
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetLocalListVersionResponse {
    /// 0 when the list is empty, -1 when local lists are not supported
    pub list_version: i32,
}

impl GetLocalListVersionResponse {
    pub fn new(list_version: i32) -> Self {
        Self { list_version }
    }
}

impl fmt::Display for GetLocalListVersionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("GetLocalListVersion")
    }
}

impl fmt::Display for GetLocalListVersionResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GetLocalListVersion -> {}", self.list_version)
    }
}

impl XmlCodec for GetLocalListVersionRequest {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element
    }

    fn read_xml(_element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {})
    }
}

impl XmlCodec for GetLocalListVersionResponse {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element.with_text("listVersion", self.list_version)
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            list_version: element.parse_child("listVersion")?,
        })
    }
}

message_pair!(V1_6, "GetLocalListVersion", GetLocalListVersionRequest => GetLocalListVersionResponse, xml: CP_NAMESPACE);

// ============================================================================
// SendLocalList
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendLocalListRequest {
    pub list_version: i32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub local_authorization_list: Vec<AuthorizationData>,
    pub update_type: UpdateType,
}

impl SendLocalListRequest {
    pub fn new(list_version: i32, update_type: UpdateType, entries: Vec<AuthorizationData>) -> Result<Self, ValidationError> {
        let message = Self {
            list_version,
            local_authorization_list: entries,
            update_type,
        };
        message.validate()?;
        Ok(message)
    }
}

impl Validate for SendLocalListRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut seen = HashSet::new();
        for (index, entry) in self.local_authorization_list.iter().enumerate() {
            let field = format!("localAuthorizationList[{}]", index);
            // idTags compare case-insensitively
            if !seen.insert(entry.id_tag.to_ascii_lowercase()) {
                return Err(ValidationError::new(
                    format!("{}.idTag", field),
                    format!("duplicate idTag '{}'", entry.id_tag),
                ));
            }
            if self.update_type == UpdateType::Full && entry.id_tag_info.is_none() {
                return Err(ValidationError::new(
                    format!("{}.idTagInfo", field),
                    "required in a Full update",
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SendLocalListResponse {
    pub status: UpdateStatus,
}

impl SendLocalListResponse {
    pub fn new(status: UpdateStatus) -> Self {
        Self { status }
    }
}

impl fmt::Display for SendLocalListRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SendLocalList ({} v{}, {} entries)",
            self.update_type,
            self.list_version,
            self.local_authorization_list.len()
        )
    }
}

impl fmt::Display for SendLocalListResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SendLocalList -> {}", self.status)
    }
}

impl XmlCodec for SendLocalListRequest {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element
            .with_text("listVersion", self.list_version)
            .with_list("localAuthorizationList", &self.local_authorization_list)
            .with_text("updateType", self.update_type)
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            list_version: element.parse_child("listVersion")?,
            local_authorization_list: element.list("localAuthorizationList")?,
            update_type: element.parse_child("updateType")?,
        })
    }
}

impl XmlCodec for SendLocalListResponse {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element.with_text("status", self.status)
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            status: element.parse_child("status")?,
        })
    }
}

message_pair!(V1_6, "SendLocalList", SendLocalListRequest => SendLocalListResponse, xml: CP_NAMESPACE);

unconstrained!(
    GetLocalListVersionRequest,
    GetLocalListVersionResponse,
    SendLocalListResponse,
);
