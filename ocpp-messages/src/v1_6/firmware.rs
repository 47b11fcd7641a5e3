//! Firmware management: diagnostics upload and firmware update

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::*;
use super::{CP_NAMESPACE, CS_NAMESPACE};
use crate::common::{CiString255, Validate};
use crate::error::{ParseError, ValidationError};
use crate::xml::{XmlCodec, XmlElement};

// ============================================================================
// GetDiagnostics
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetDiagnosticsRequest {
    /// Upload directory URI
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retries: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_interval: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_time: Option<DateTime<Utc>>,
}

impl GetDiagnosticsRequest {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            retries: None,
            retry_interval: None,
            start_time: None,
            stop_time: None,
        }
    }
}

impl Validate for GetDiagnosticsRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        if let (Some(start), Some(stop)) = (self.start_time, self.stop_time) {
            if start > stop {
                return Err(ValidationError::new("stopTime", "lies before startTime"));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetDiagnosticsResponse {
    /// Absent when no diagnostics are available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<CiString255>,
}

impl fmt::Display for GetDiagnosticsRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GetDiagnostics (to {})", self.location)
    }
}

impl fmt::Display for GetDiagnosticsResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file_name {
            Some(name) => write!(f, "GetDiagnostics -> {}", name),
            None => f.write_str("GetDiagnostics -> nothing to upload"),
        }
    }
}

impl XmlCodec for GetDiagnosticsRequest {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element
            .with_text("location", &self.location)
            .with_opt_text("retries", self.retries.as_ref())
            .with_opt_text("retryInterval", self.retry_interval.as_ref())
            .with_opt_datetime("startTime", self.start_time.as_ref())
            .with_opt_datetime("stopTime", self.stop_time.as_ref())
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            location: element.parse_child("location")?,
            retries: element.opt_parse_child("retries")?,
            retry_interval: element.opt_parse_child("retryInterval")?,
            start_time: element.opt_datetime("startTime")?,
            stop_time: element.opt_datetime("stopTime")?,
        })
    }
}

impl XmlCodec for GetDiagnosticsResponse {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element.with_opt_text("fileName", self.file_name.as_ref())
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            file_name: element.opt_parse_child("fileName")?,
        })
    }
}

message_pair!(V1_6, "GetDiagnostics", GetDiagnosticsRequest => GetDiagnosticsResponse, xml: CP_NAMESPACE);

// ============================================================================
// UpdateFirmware
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFirmwareRequest {
    /// Firmware image URI
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retries: Option<u32>,
    pub retrieve_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_interval: Option<u32>,
}

impl UpdateFirmwareRequest {
    pub fn new(location: impl Into<String>, retrieve_date: DateTime<Utc>) -> Self {
        Self {
            location: location.into(),
            retries: None,
            retrieve_date,
            retry_interval: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UpdateFirmwareResponse {}

impl fmt::Display for UpdateFirmwareRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UpdateFirmware ({} at {})", self.location, self.retrieve_date)
    }
}

impl fmt::Display for UpdateFirmwareResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UpdateFirmware -> ok")
    }
}

impl XmlCodec for UpdateFirmwareRequest {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element
            .with_text("location", &self.location)
            .with_opt_text("retries", self.retries.as_ref())
            .with_datetime("retrieveDate", &self.retrieve_date)
            .with_opt_text("retryInterval", self.retry_interval.as_ref())
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            location: element.parse_child("location")?,
            retries: element.opt_parse_child("retries")?,
            retrieve_date: element.datetime("retrieveDate")?,
            retry_interval: element.opt_parse_child("retryInterval")?,
        })
    }
}

impl XmlCodec for UpdateFirmwareResponse {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element
    }

    fn read_xml(_element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {})
    }
}

message_pair!(V1_6, "UpdateFirmware", UpdateFirmwareRequest => UpdateFirmwareResponse, xml: CP_NAMESPACE);

// ============================================================================
// DiagnosticsStatusNotification
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiagnosticsStatusNotificationRequest {
    pub status: DiagnosticsStatus,
}

impl DiagnosticsStatusNotificationRequest {
    pub fn new(status: DiagnosticsStatus) -> Self {
        Self { status }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiagnosticsStatusNotificationResponse {}

impl fmt::Display for DiagnosticsStatusNotificationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DiagnosticsStatusNotification ({})", self.status)
    }
}

impl fmt::Display for DiagnosticsStatusNotificationResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DiagnosticsStatusNotification -> ok")
    }
}

impl XmlCodec for DiagnosticsStatusNotificationRequest {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element.with_text("status", self.status)
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            status: element.parse_child("status")?,
        })
    }
}

impl XmlCodec for DiagnosticsStatusNotificationResponse {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element
    }

    fn read_xml(_element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {})
    }
}

message_pair!(
    V1_6,
    "DiagnosticsStatusNotification",
    DiagnosticsStatusNotificationRequest => DiagnosticsStatusNotificationResponse,
    xml: CS_NAMESPACE
);

// ============================================================================
// FirmwareStatusNotification
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FirmwareStatusNotificationRequest {
    pub status: FirmwareStatus,
}

impl FirmwareStatusNotificationRequest {
    pub fn new(status: FirmwareStatus) -> Self {
        Self { status }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FirmwareStatusNotificationResponse {}

impl fmt::Display for FirmwareStatusNotificationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FirmwareStatusNotification ({})", self.status)
    }
}

impl fmt::Display for FirmwareStatusNotificationResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FirmwareStatusNotification -> ok")
    }
}

impl XmlCodec for FirmwareStatusNotificationRequest {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element.with_text("status", self.status)
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            status: element.parse_child("status")?,
        })
    }
}

impl XmlCodec for FirmwareStatusNotificationResponse {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element
    }

    fn read_xml(_element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {})
    }
}

message_pair!(
    V1_6,
    "FirmwareStatusNotification",
    FirmwareStatusNotificationRequest => FirmwareStatusNotificationResponse,
    xml: CS_NAMESPACE
);

unconstrained!(
    GetDiagnosticsResponse,
    UpdateFirmwareRequest,
    UpdateFirmwareResponse,
    DiagnosticsStatusNotificationRequest,
    DiagnosticsStatusNotificationResponse,
    FirmwareStatusNotificationRequest,
    FirmwareStatusNotificationResponse,
);
