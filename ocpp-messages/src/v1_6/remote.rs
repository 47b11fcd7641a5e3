//! Configuration and remote control messages sent by the central system

use std::fmt;

use serde::{Deserialize, Serialize};

use super::types::*;
use super::CP_NAMESPACE;
use crate::common::{CiString50, CiString500, Validate};
use crate::error::{ParseError, ValidationError};
use crate::xml::{XmlCodec, XmlElement};

// ============================================================================
// ChangeAvailability
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeAvailabilityRequest {
    /// 0 addresses the whole charge point
    pub connector_id: u32,
    #[serde(rename = "type")]
    pub availability_type: AvailabilityType,
}

impl ChangeAvailabilityRequest {
    pub fn new(connector_id: u32, availability_type: AvailabilityType) -> Self {
        Self {
            connector_id,
            availability_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChangeAvailabilityResponse {
    pub status: AvailabilityStatus,
}

impl fmt::Display for ChangeAvailabilityRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ChangeAvailability (connector {} {})",
            self.connector_id, self.availability_type
        )
    }
}

impl fmt::Display for ChangeAvailabilityResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChangeAvailability -> {}", self.status)
    }
}

impl XmlCodec for ChangeAvailabilityRequest {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element
            .with_text("connectorId", self.connector_id)
            .with_text("type", self.availability_type)
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            connector_id: element.parse_child("connectorId")?,
            availability_type: element.parse_child("type")?,
        })
    }
}

impl XmlCodec for ChangeAvailabilityResponse {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element.with_text("status", self.status)
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            status: element.parse_child("status")?,
        })
    }
}

message_pair!(V1_6, "ChangeAvailability", ChangeAvailabilityRequest => ChangeAvailabilityResponse, xml: CP_NAMESPACE);

// ============================================================================
// ChangeConfiguration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChangeConfigurationRequest {
    pub key: CiString50,
    pub value: CiString500,
}

impl ChangeConfigurationRequest {
    pub fn new(key: CiString50, value: CiString500) -> Self {
        Self { key, value }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChangeConfigurationResponse {
    pub status: ConfigurationStatus,
}

impl fmt::Display for ChangeConfigurationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChangeConfiguration ({}={})", self.key, self.value)
    }
}

impl fmt::Display for ChangeConfigurationResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChangeConfiguration -> {}", self.status)
    }
}

impl XmlCodec for ChangeConfigurationRequest {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element
            .with_text("key", &self.key)
            .with_text("value", &self.value)
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            key: element.parse_child("key")?,
            value: element.parse_child("value")?,
        })
    }
}

impl XmlCodec for ChangeConfigurationResponse {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element.with_text("status", self.status)
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            status: element.parse_child("status")?,
        })
    }
}

message_pair!(V1_6, "ChangeConfiguration", ChangeConfigurationRequest => ChangeConfigurationResponse, xml: CP_NAMESPACE);

// ============================================================================
// ClearCache
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClearCacheRequest {}

impl ClearCacheRequest {
    pub fn new() -> Self {
        Self {}
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClearCacheResponse {
    pub status: ClearCacheStatus,
}

impl fmt::Display for ClearCacheRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClearCache")
    }
}

impl fmt::Display for ClearCacheResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClearCache -> {}", self.status)
    }
}

impl XmlCodec for ClearCacheRequest {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element
    }

    fn read_xml(_element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {})
    }
}

impl XmlCodec for ClearCacheResponse {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element.with_text("status", self.status)
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            status: element.parse_child("status")?,
        })
    }
}

message_pair!(V1_6, "ClearCache", ClearCacheRequest => ClearCacheResponse, xml: CP_NAMESPACE);

// ============================================================================
// GetConfiguration
// ============================================================================

/// Without keys the charge point reports its whole configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GetConfigurationRequest {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key: Vec<CiString50>,
}

impl GetConfigurationRequest {
    pub fn new(key: Vec<CiString50>) -> Self {
        Self { key }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetConfigurationResponse {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub configuration_key: Vec<KeyValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unknown_key: Vec<CiString50>,
}

impl fmt::Display for GetConfigurationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.key.is_empty() {
            return f.write_str("GetConfiguration (all)");
        }
        write!(f, "GetConfiguration ({} keys)", self.key.len())
    }
}

impl fmt::Display for GetConfigurationResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GetConfiguration -> {} known, {} unknown",
            self.configuration_key.len(),
            self.unknown_key.len()
        )
    }
}

impl XmlCodec for GetConfigurationRequest {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element.with_texts("key", &self.key)
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            key: element.parse_children("key")?,
        })
    }
}

impl XmlCodec for GetConfigurationResponse {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element
            .with_list("configurationKey", &self.configuration_key)
            .with_texts("unknownKey", &self.unknown_key)
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            configuration_key: element.list("configurationKey")?,
            unknown_key: element.parse_children("unknownKey")?,
        })
    }
}

message_pair!(V1_6, "GetConfiguration", GetConfigurationRequest => GetConfigurationResponse, xml: CP_NAMESPACE);

// ============================================================================
// RemoteStartTransaction
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteStartTransactionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connector_id: Option<u32>,
    pub id_tag: IdToken,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charging_profile: Option<ChargingProfile>,
}

impl RemoteStartTransactionRequest {
    pub fn new(id_tag: IdToken) -> Self {
        Self {
            connector_id: None,
            id_tag,
            charging_profile: None,
        }
    }
}

impl Validate for RemoteStartTransactionRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(connector_id) = self.connector_id {
            physical_connector("connectorId", connector_id)?;
        }
        if let Some(profile) = &self.charging_profile {
            if profile.charging_profile_purpose != ChargingProfilePurpose::TxProfile {
                return Err(ValidationError::new(
                    "chargingProfile.chargingProfilePurpose",
                    "must be TxProfile",
                ));
            }
            profile.validate().map_err(|e| e.within("chargingProfile"))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemoteStartTransactionResponse {
    pub status: RemoteStartStopStatus,
}

impl fmt::Display for RemoteStartTransactionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.connector_id {
            Some(connector_id) => write!(
                f,
                "RemoteStartTransaction ({} on connector {})",
                self.id_tag, connector_id
            ),
            None => write!(f, "RemoteStartTransaction ({})", self.id_tag),
        }
    }
}

impl fmt::Display for RemoteStartTransactionResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RemoteStartTransaction -> {}", self.status)
    }
}

impl XmlCodec for RemoteStartTransactionRequest {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element
            .with_opt_text("connectorId", self.connector_id.as_ref())
            .with_text("idTag", &self.id_tag)
            .with_opt_nested("chargingProfile", self.charging_profile.as_ref())
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            connector_id: element.opt_parse_child("connectorId")?,
            id_tag: element.parse_child("idTag")?,
            charging_profile: element.opt_nested("chargingProfile")?,
        })
    }
}

impl XmlCodec for RemoteStartTransactionResponse {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element.with_text("status", self.status)
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            status: element.parse_child("status")?,
        })
    }
}

message_pair!(V1_6, "RemoteStartTransaction", RemoteStartTransactionRequest => RemoteStartTransactionResponse, xml: CP_NAMESPACE);

// ============================================================================
// RemoteStopTransaction
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteStopTransactionRequest {
    pub transaction_id: i32,
}

impl RemoteStopTransactionRequest {
    pub fn new(transaction_id: i32) -> Self {
        Self { transaction_id }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemoteStopTransactionResponse {
    pub status: RemoteStartStopStatus,
}

impl fmt::Display for RemoteStopTransactionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RemoteStopTransaction (transaction {})", self.transaction_id)
    }
}

impl fmt::Display for RemoteStopTransactionResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RemoteStopTransaction -> {}", self.status)
    }
}

impl XmlCodec for RemoteStopTransactionRequest {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element.with_text("transactionId", self.transaction_id)
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            transaction_id: element.parse_child("transactionId")?,
        })
    }
}

impl XmlCodec for RemoteStopTransactionResponse {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element.with_text("status", self.status)
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            status: element.parse_child("status")?,
        })
    }
}

message_pair!(V1_6, "RemoteStopTransaction", RemoteStopTransactionRequest => RemoteStopTransactionResponse, xml: CP_NAMESPACE);

// ============================================================================
// Reset
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResetRequest {
    #[serde(rename = "type")]
    pub reset_type: ResetType,
}

impl ResetRequest {
    pub fn new(reset_type: ResetType) -> Self {
        Self { reset_type }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResetResponse {
    pub status: ResetStatus,
}

impl ResetResponse {
    pub fn new(status: ResetStatus) -> Self {
        Self { status }
    }
}

impl fmt::Display for ResetRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reset ({})", self.reset_type)
    }
}

impl fmt::Display for ResetResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reset -> {}", self.status)
    }
}

impl XmlCodec for ResetRequest {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element.with_text("type", self.reset_type)
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            reset_type: element.parse_child("type")?,
        })
    }
}

impl XmlCodec for ResetResponse {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element.with_text("status", self.status)
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            status: element.parse_child("status")?,
        })
    }
}

message_pair!(V1_6, "Reset", ResetRequest => ResetResponse, xml: CP_NAMESPACE);

// ============================================================================
// UnlockConnector
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockConnectorRequest {
    pub connector_id: u32,
}

impl UnlockConnectorRequest {
    pub fn new(connector_id: u32) -> Result<Self, ValidationError> {
        let message = Self { connector_id };
        message.validate()?;
        Ok(message)
    }
}

impl Validate for UnlockConnectorRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        physical_connector("connectorId", self.connector_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnlockConnectorResponse {
    pub status: UnlockStatus,
}

impl fmt::Display for UnlockConnectorRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UnlockConnector (connector {})", self.connector_id)
    }
}

impl fmt::Display for UnlockConnectorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UnlockConnector -> {}", self.status)
    }
}

impl XmlCodec for UnlockConnectorRequest {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element.with_text("connectorId", self.connector_id)
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            connector_id: element.parse_child("connectorId")?,
        })
    }
}

impl XmlCodec for UnlockConnectorResponse {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element.with_text("status", self.status)
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            status: element.parse_child("status")?,
        })
    }
}

message_pair!(V1_6, "UnlockConnector", UnlockConnectorRequest => UnlockConnectorResponse, xml: CP_NAMESPACE);

unconstrained!(
    ChangeAvailabilityRequest,
    ChangeAvailabilityResponse,
    ChangeConfigurationRequest,
    ChangeConfigurationResponse,
    ClearCacheRequest,
    ClearCacheResponse,
    GetConfigurationRequest,
    GetConfigurationResponse,
    RemoteStartTransactionResponse,
    RemoteStopTransactionRequest,
    RemoteStopTransactionResponse,
    ResetRequest,
    ResetResponse,
    UnlockConnectorResponse,
);
