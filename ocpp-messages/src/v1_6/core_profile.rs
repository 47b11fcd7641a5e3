//! Core profile messages initiated by the charge point
//!
//! Authorize, BootNotification, DataTransfer, Heartbeat, MeterValues,
//! StartTransaction, StatusNotification and StopTransaction. All of them
//! live in the central system namespace; DataTransfer may travel either
//! way and is accepted in both.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::*;
use super::{CP_NAMESPACE, CS_NAMESPACE};
use crate::common::{CiString20, CiString25, CiString255, CiString50, Validate};
use crate::error::{ParseError, ValidationError};
use crate::xml::{XmlCodec, XmlElement, XmlMessage};

// ============================================================================
// Authorize
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizeRequest {
    pub id_tag: IdToken,
}

impl AuthorizeRequest {
    pub fn new(id_tag: IdToken) -> Self {
        Self { id_tag }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizeResponse {
    pub id_tag_info: IdTagInfo,
}

impl AuthorizeResponse {
    pub fn new(id_tag_info: IdTagInfo) -> Self {
        Self { id_tag_info }
    }
}

impl fmt::Display for AuthorizeRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Authorize ({})", self.id_tag)
    }
}

impl fmt::Display for AuthorizeResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Authorize -> {}", self.id_tag_info.status)
    }
}

impl XmlCodec for AuthorizeRequest {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element.with_text("idTag", &self.id_tag)
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            id_tag: element.parse_child("idTag")?,
        })
    }
}

impl XmlCodec for AuthorizeResponse {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element.with_nested("idTagInfo", &self.id_tag_info)
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            id_tag_info: element.nested("idTagInfo")?,
        })
    }
}

message_pair!(V1_6, "Authorize", AuthorizeRequest => AuthorizeResponse, xml: CS_NAMESPACE);

// ============================================================================
// BootNotification
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BootNotificationRequest {
    pub charge_point_vendor: CiString20,
    pub charge_point_model: CiString20,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charge_point_serial_number: Option<CiString25>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charge_box_serial_number: Option<CiString25>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firmware_version: Option<CiString50>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iccid: Option<CiString20>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imsi: Option<CiString20>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meter_type: Option<CiString25>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meter_serial_number: Option<CiString25>,
}

impl BootNotificationRequest {
    pub fn new(vendor: CiString20, model: CiString20) -> Self {
        Self {
            charge_point_vendor: vendor,
            charge_point_model: model,
            charge_point_serial_number: None,
            charge_box_serial_number: None,
            firmware_version: None,
            iccid: None,
            imsi: None,
            meter_type: None,
            meter_serial_number: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BootNotificationResponse {
    pub status: RegistrationStatus,
    pub current_time: DateTime<Utc>,
    /// Heartbeat interval in seconds (retry interval when not accepted)
    pub interval: i32,
}

impl BootNotificationResponse {
    pub fn new(status: RegistrationStatus, current_time: DateTime<Utc>, interval: i32) -> Self {
        Self {
            status,
            current_time,
            interval,
        }
    }
}

impl fmt::Display for BootNotificationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BootNotification ({} {})",
            self.charge_point_vendor, self.charge_point_model
        )
    }
}

impl fmt::Display for BootNotificationResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BootNotification -> {} (interval {}s)", self.status, self.interval)
    }
}

impl XmlCodec for BootNotificationRequest {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element
            .with_text("chargePointVendor", &self.charge_point_vendor)
            .with_text("chargePointModel", &self.charge_point_model)
            .with_opt_text("chargePointSerialNumber", self.charge_point_serial_number.as_ref())
            .with_opt_text("chargeBoxSerialNumber", self.charge_box_serial_number.as_ref())
            .with_opt_text("firmwareVersion", self.firmware_version.as_ref())
            .with_opt_text("iccid", self.iccid.as_ref())
            .with_opt_text("imsi", self.imsi.as_ref())
            .with_opt_text("meterType", self.meter_type.as_ref())
            .with_opt_text("meterSerialNumber", self.meter_serial_number.as_ref())
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            charge_point_vendor: element.parse_child("chargePointVendor")?,
            charge_point_model: element.parse_child("chargePointModel")?,
            charge_point_serial_number: element.opt_parse_child("chargePointSerialNumber")?,
            charge_box_serial_number: element.opt_parse_child("chargeBoxSerialNumber")?,
            firmware_version: element.opt_parse_child("firmwareVersion")?,
            iccid: element.opt_parse_child("iccid")?,
            imsi: element.opt_parse_child("imsi")?,
            meter_type: element.opt_parse_child("meterType")?,
            meter_serial_number: element.opt_parse_child("meterSerialNumber")?,
        })
    }
}

impl XmlCodec for BootNotificationResponse {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element
            .with_text("status", self.status)
            .with_datetime("currentTime", &self.current_time)
            .with_text("interval", self.interval)
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            status: element.parse_child("status")?,
            current_time: element.datetime("currentTime")?,
            interval: element.parse_child("interval")?,
        })
    }
}

message_pair!(V1_6, "BootNotification", BootNotificationRequest => BootNotificationResponse, xml: CS_NAMESPACE);

// ============================================================================
// DataTransfer
// ============================================================================

/// Vendor-specific payload; may be sent by either side
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataTransferRequest {
    pub vendor_id: CiString255,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<CiString50>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl DataTransferRequest {
    pub fn new(vendor_id: CiString255) -> Result<Self, ValidationError> {
        let message = Self {
            vendor_id,
            message_id: None,
            data: None,
        };
        message.validate()?;
        Ok(message)
    }
}

impl Validate for DataTransferRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.vendor_id.is_empty() {
            return Err(ValidationError::new("vendorId", "must not be empty"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataTransferResponse {
    pub status: DataTransferStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl DataTransferResponse {
    pub fn new(status: DataTransferStatus) -> Self {
        Self { status, data: None }
    }
}

impl fmt::Display for DataTransferRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message_id {
            Some(message_id) => write!(f, "DataTransfer ({}/{})", self.vendor_id, message_id),
            None => write!(f, "DataTransfer ({})", self.vendor_id),
        }
    }
}

impl fmt::Display for DataTransferResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DataTransfer -> {}", self.status)
    }
}

impl XmlCodec for DataTransferRequest {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element
            .with_text("vendorId", &self.vendor_id)
            .with_opt_text("messageId", self.message_id.as_ref())
            .with_opt_text("data", self.data.as_ref())
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            vendor_id: element.parse_child("vendorId")?,
            message_id: element.opt_parse_child("messageId")?,
            data: element.text_of("data").map(str::to_string),
        })
    }
}

impl XmlCodec for DataTransferResponse {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element
            .with_text("status", self.status)
            .with_opt_text("data", self.data.as_ref())
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            status: element.parse_child("status")?,
            data: element.text_of("data").map(str::to_string),
        })
    }
}

message_pair!(V1_6, "DataTransfer", DataTransferRequest => DataTransferResponse);

impl XmlMessage for DataTransferRequest {
    const XML_NAMESPACE: &'static str = CS_NAMESPACE;

    fn accepts_namespace(namespace: &str) -> bool {
        namespace == CS_NAMESPACE || namespace == CP_NAMESPACE
    }
}

impl XmlMessage for DataTransferResponse {
    const XML_NAMESPACE: &'static str = CS_NAMESPACE;

    fn accepts_namespace(namespace: &str) -> bool {
        namespace == CS_NAMESPACE || namespace == CP_NAMESPACE
    }
}

// ============================================================================
// Heartbeat
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeartbeatRequest {}

impl HeartbeatRequest {
    pub fn new() -> Self {
        Self {}
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartbeatResponse {
    pub current_time: DateTime<Utc>,
}

impl HeartbeatResponse {
    pub fn new(current_time: DateTime<Utc>) -> Self {
        Self { current_time }
    }
}

impl fmt::Display for HeartbeatRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Heartbeat")
    }
}

impl fmt::Display for HeartbeatResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Heartbeat -> {}", self.current_time)
    }
}

impl XmlCodec for HeartbeatRequest {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element
    }

    fn read_xml(_element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {})
    }
}

impl XmlCodec for HeartbeatResponse {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element.with_datetime("currentTime", &self.current_time)
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            current_time: element.datetime("currentTime")?,
        })
    }
}

message_pair!(V1_6, "Heartbeat", HeartbeatRequest => HeartbeatResponse, xml: CS_NAMESPACE);

// ============================================================================
// MeterValues
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeterValuesRequest {
    /// 0 addresses the main meter of the charge point
    pub connector_id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<i32>,
    pub meter_value: Vec<MeterValue>,
}

impl MeterValuesRequest {
    pub fn new(connector_id: u32, meter_value: Vec<MeterValue>) -> Result<Self, ValidationError> {
        let message = Self {
            connector_id,
            transaction_id: None,
            meter_value,
        };
        message.validate()?;
        Ok(message)
    }
}

impl Validate for MeterValuesRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.meter_value.is_empty() {
            return Err(ValidationError::new("meterValue", "at least one meter value is required"));
        }
        validate_meter_values("meterValue", &self.meter_value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeterValuesResponse {}

impl MeterValuesResponse {
    pub fn new() -> Self {
        Self {}
    }
}

impl fmt::Display for MeterValuesRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MeterValues (connector {}, {} values)",
            self.connector_id,
            self.meter_value.len()
        )
    }
}

impl fmt::Display for MeterValuesResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MeterValues -> ok")
    }
}

impl XmlCodec for MeterValuesRequest {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element
            .with_text("connectorId", self.connector_id)
            .with_opt_text("transactionId", self.transaction_id.as_ref())
            .with_list("meterValue", &self.meter_value)
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            connector_id: element.parse_child("connectorId")?,
            transaction_id: element.opt_parse_child("transactionId")?,
            meter_value: element.list("meterValue")?,
        })
    }
}

impl XmlCodec for MeterValuesResponse {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element
    }

    fn read_xml(_element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {})
    }
}

message_pair!(V1_6, "MeterValues", MeterValuesRequest => MeterValuesResponse, xml: CS_NAMESPACE);

// ============================================================================
// StartTransaction
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartTransactionRequest {
    pub connector_id: u32,
    pub id_tag: IdToken,
    /// Meter reading in Wh at the start of the transaction
    pub meter_start: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation_id: Option<i32>,
    pub timestamp: DateTime<Utc>,
}

impl StartTransactionRequest {
    pub fn new(connector_id: u32, id_tag: IdToken, meter_start: i32, timestamp: DateTime<Utc>) -> Result<Self, ValidationError> {
        let message = Self {
            connector_id,
            id_tag,
            meter_start,
            reservation_id: None,
            timestamp,
        };
        message.validate()?;
        Ok(message)
    }
}

impl Validate for StartTransactionRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        physical_connector("connectorId", self.connector_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartTransactionResponse {
    pub id_tag_info: IdTagInfo,
    pub transaction_id: i32,
}

impl StartTransactionResponse {
    pub fn new(id_tag_info: IdTagInfo, transaction_id: i32) -> Self {
        Self {
            id_tag_info,
            transaction_id,
        }
    }
}

impl fmt::Display for StartTransactionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StartTransaction (connector {}, {})",
            self.connector_id, self.id_tag
        )
    }
}

impl fmt::Display for StartTransactionResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StartTransaction -> {} (transaction {})",
            self.id_tag_info.status, self.transaction_id
        )
    }
}

impl XmlCodec for StartTransactionRequest {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element
            .with_text("connectorId", self.connector_id)
            .with_text("idTag", &self.id_tag)
            .with_text("meterStart", self.meter_start)
            .with_opt_text("reservationId", self.reservation_id.as_ref())
            .with_datetime("timestamp", &self.timestamp)
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            connector_id: element.parse_child("connectorId")?,
            id_tag: element.parse_child("idTag")?,
            meter_start: element.parse_child("meterStart")?,
            reservation_id: element.opt_parse_child("reservationId")?,
            timestamp: element.datetime("timestamp")?,
        })
    }
}

impl XmlCodec for StartTransactionResponse {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element
            .with_nested("idTagInfo", &self.id_tag_info)
            .with_text("transactionId", self.transaction_id)
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            id_tag_info: element.nested("idTagInfo")?,
            transaction_id: element.parse_child("transactionId")?,
        })
    }
}

message_pair!(V1_6, "StartTransaction", StartTransactionRequest => StartTransactionResponse, xml: CS_NAMESPACE);

// ============================================================================
// StatusNotification
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusNotificationRequest {
    /// 0 reports the status of the charge point as a whole
    pub connector_id: u32,
    pub error_code: ChargePointErrorCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<CiString50>,
    pub status: ChargePointStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<CiString255>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_error_code: Option<CiString50>,
}

impl StatusNotificationRequest {
    pub fn new(connector_id: u32, error_code: ChargePointErrorCode, status: ChargePointStatus) -> Self {
        Self {
            connector_id,
            error_code,
            info: None,
            status,
            timestamp: None,
            vendor_id: None,
            vendor_error_code: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusNotificationResponse {}

impl StatusNotificationResponse {
    pub fn new() -> Self {
        Self {}
    }
}

impl fmt::Display for StatusNotificationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StatusNotification (connector {}: {}", self.connector_id, self.status)?;
        if self.error_code != ChargePointErrorCode::NoError {
            write!(f, ", {}", self.error_code)?;
        }
        f.write_str(")")
    }
}

impl fmt::Display for StatusNotificationResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StatusNotification -> ok")
    }
}

impl XmlCodec for StatusNotificationRequest {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element
            .with_text("connectorId", self.connector_id)
            .with_text("errorCode", self.error_code)
            .with_opt_text("info", self.info.as_ref())
            .with_text("status", self.status)
            .with_opt_datetime("timestamp", self.timestamp.as_ref())
            .with_opt_text("vendorId", self.vendor_id.as_ref())
            .with_opt_text("vendorErrorCode", self.vendor_error_code.as_ref())
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            connector_id: element.parse_child("connectorId")?,
            error_code: element.parse_child("errorCode")?,
            info: element.opt_parse_child("info")?,
            status: element.parse_child("status")?,
            timestamp: element.opt_datetime("timestamp")?,
            vendor_id: element.opt_parse_child("vendorId")?,
            vendor_error_code: element.opt_parse_child("vendorErrorCode")?,
        })
    }
}

impl XmlCodec for StatusNotificationResponse {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element
    }

    fn read_xml(_element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {})
    }
}

message_pair!(V1_6, "StatusNotification", StatusNotificationRequest => StatusNotificationResponse, xml: CS_NAMESPACE);

// ============================================================================
// StopTransaction
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopTransactionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_tag: Option<IdToken>,
    /// Meter reading in Wh at the end of the transaction
    pub meter_stop: i32,
    pub timestamp: DateTime<Utc>,
    pub transaction_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<Reason>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transaction_data: Vec<MeterValue>,
}

impl StopTransactionRequest {
    pub fn new(transaction_id: i32, meter_stop: i32, timestamp: DateTime<Utc>) -> Self {
        Self {
            id_tag: None,
            meter_stop,
            timestamp,
            transaction_id,
            reason: None,
            transaction_data: Vec::new(),
        }
    }
}

impl Validate for StopTransactionRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_meter_values("transactionData", &self.transaction_data)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopTransactionResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_tag_info: Option<IdTagInfo>,
}

impl StopTransactionResponse {
    pub fn new() -> Self {
        Self::default()
    }
}

impl fmt::Display for StopTransactionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopTransaction (transaction {}", self.transaction_id)?;
        if let Some(reason) = self.reason {
            write!(f, ", {}", reason)?;
        }
        f.write_str(")")
    }
}

impl fmt::Display for StopTransactionResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id_tag_info {
            Some(info) => write!(f, "StopTransaction -> {}", info.status),
            None => f.write_str("StopTransaction -> ok"),
        }
    }
}

impl XmlCodec for StopTransactionRequest {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element
            .with_opt_text("idTag", self.id_tag.as_ref())
            .with_text("meterStop", self.meter_stop)
            .with_datetime("timestamp", &self.timestamp)
            .with_text("transactionId", self.transaction_id)
            .with_opt_text("reason", self.reason.as_ref())
            .with_list("transactionData", &self.transaction_data)
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            id_tag: element.opt_parse_child("idTag")?,
            meter_stop: element.parse_child("meterStop")?,
            timestamp: element.datetime("timestamp")?,
            transaction_id: element.parse_child("transactionId")?,
            reason: element.opt_parse_child("reason")?,
            transaction_data: element.list("transactionData")?,
        })
    }
}

impl XmlCodec for StopTransactionResponse {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element.with_opt_nested("idTagInfo", self.id_tag_info.as_ref())
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            id_tag_info: element.opt_nested("idTagInfo")?,
        })
    }
}

message_pair!(V1_6, "StopTransaction", StopTransactionRequest => StopTransactionResponse, xml: CS_NAMESPACE);

unconstrained!(
    AuthorizeRequest,
    AuthorizeResponse,
    BootNotificationRequest,
    BootNotificationResponse,
    DataTransferResponse,
    HeartbeatRequest,
    HeartbeatResponse,
    MeterValuesResponse,
    StartTransactionResponse,
    StatusNotificationRequest,
    StatusNotificationResponse,
    StopTransactionResponse,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::OcppMessage;
    use crate::config::CodecConfig;
    use chrono::TimeZone;
    use serde_json::json;
    use std::collections::HashSet;

    fn tag(value: &str) -> IdToken {
        IdToken::new(value).unwrap()
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_boot_notification_json() {
        let json = json!({
            "chargePointVendor": "ACME",
            "chargePointModel": "Wallbox 22",
            "firmwareVersion": "1.4.2"
        });

        let boot = BootNotificationRequest::try_from_json(&json).unwrap();
        assert_eq!(boot.charge_point_vendor, "ACME");
        assert!(boot.iccid.is_none());
        // Absent optionals stay absent
        assert_eq!(boot.to_json(), json);
        assert_eq!(boot.to_string(), "BootNotification (ACME Wallbox 22)");
    }

    #[test]
    fn test_mandatory_field_missing() {
        let err = BootNotificationRequest::try_from_json(&json!({"chargePointVendor": "ACME"})).unwrap_err();
        assert_eq!(err, ParseError::MissingField("chargePointModel".to_string()));

        let xml = XmlElement::new("bootNotificationRequest")
            .in_namespace(CS_NAMESPACE)
            .with_text("chargePointVendor", "ACME");
        let err = BootNotificationRequest::try_from_xml(&xml).unwrap_err();
        assert_eq!(err, ParseError::MissingField("chargePointModel".to_string()));
    }

    #[test]
    fn test_string_bound_enforced() {
        let json = json!({"idTag": "X".repeat(21)});
        assert!(AuthorizeRequest::try_from_json(&json).is_err());
        assert!(AuthorizeRequest::try_from_json(&json!({"idTag": "X".repeat(20)})).is_ok());
    }

    #[test]
    fn test_unknown_enum_value_rejected() {
        let json = json!({"connectorId": 1, "errorCode": "NoError", "status": "Sleeping"});
        assert!(StatusNotificationRequest::try_from_json(&json).is_err());

        let xml = StatusNotificationRequest::new(1, ChargePointErrorCode::NoError, ChargePointStatus::Available)
            .to_xml();
        let mut broken = xml.clone();
        for child in &mut broken.children {
            if child.name == "status" {
                child.text = "Sleeping".to_string();
            }
        }
        let err = StatusNotificationRequest::try_from_xml(&broken).unwrap_err();
        assert!(matches!(err, ParseError::InvalidField { ref field, .. } if field == "status"));
    }

    #[test]
    fn test_start_transaction_connector_zero() {
        let err = StartTransactionRequest::new(0, tag("04A2B1"), 1500, noon()).unwrap_err();
        assert_eq!(err.field, "connectorId");

        let mut start = StartTransactionRequest::new(1, tag("04A2B1"), 1500, noon()).unwrap();
        assert!(StartTransactionRequest::try_from_json(&start.to_json()).is_ok());

        start.connector_id = 0;
        let err = StartTransactionRequest::try_from_json(&start.to_json()).unwrap_err();
        assert!(matches!(err, ParseError::Validation(ref e) if e.field == "connectorId"));
        assert!(StartTransactionRequest::try_from_xml(&start.to_xml()).is_err());
    }

    #[test]
    fn test_meter_values_xml_roundtrip() {
        let mut sample = SampledValue::new("1234.5");
        sample.measurand = Some(Measurand::EnergyActiveImportRegister);
        sample.unit = Some(UnitOfMeasure::KWh);
        sample.context = Some(ReadingContext::SamplePeriodic);

        let value = MeterValue::new(noon(), vec![sample, SampledValue::new("230")]).unwrap();
        let mut request = MeterValuesRequest::new(2, vec![value]).unwrap();
        request.transaction_id = Some(42);

        let xml = request.to_xml();
        assert_eq!(xml.children_named("meterValue").count(), 1);
        let text = format!("{:#}", xml);
        assert_eq!(MeterValuesRequest::try_from_xml_str(&text).unwrap(), request);
        assert_eq!(MeterValuesRequest::try_from_json(&request.to_json()).unwrap(), request);
    }

    #[test]
    fn test_meter_values_must_not_be_empty() {
        assert_eq!(MeterValuesRequest::new(1, vec![]).unwrap_err().field, "meterValue");

        let empty = json!({"connectorId": 1, "meterValue": []});
        assert!(MeterValuesRequest::try_from_json(&empty).is_err());

        let no_samples = json!({
            "connectorId": 1,
            "meterValue": [{"timestamp": "2024-03-01T12:00:00Z", "sampledValue": []}]
        });
        let err = MeterValuesRequest::try_from_json(&no_samples).unwrap_err();
        assert!(matches!(err, ParseError::Validation(ref e) if e.field == "meterValue[0].sampledValue"));
    }

    #[test]
    fn test_data_transfer_both_namespaces() {
        let mut request = DataTransferRequest::new("com.acme".parse().unwrap()).unwrap();
        request.data = Some("{\"level\":3}".to_string());

        let from_cp = request.to_xml();
        let from_cs = request.to_xml_in(CP_NAMESPACE);
        assert_eq!(DataTransferRequest::try_from_xml(&from_cp).unwrap(), request);
        assert_eq!(DataTransferRequest::try_from_xml(&from_cs).unwrap(), request);

        let foreign = request.to_xml_in("urn://Other");
        assert!(matches!(
            DataTransferRequest::try_from_xml(&foreign),
            Err(ParseError::UnexpectedNamespace { .. })
        ));
        let lenient = CodecConfig::new().lenient_namespaces();
        assert!(DataTransferRequest::try_from_xml_with(&foreign, &lenient, None).is_ok());
    }

    #[test]
    fn test_data_transfer_empty_vendor() {
        assert!(DataTransferRequest::try_from_json(&json!({"vendorId": ""})).is_err());
        assert_eq!(DataTransferRequest::new(CiString255::default()).unwrap_err().field, "vendorId");
    }

    #[test]
    fn test_wrong_root_element() {
        let xml = HeartbeatRequest::new().to_xml();
        let err = HeartbeatResponse::try_from_xml(&xml).unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedElement { .. }));
    }

    #[test]
    fn test_stop_transaction_optional_data() {
        let stop = StopTransactionRequest::new(42, 20500, noon());
        let json = stop.to_json();
        assert!(json.get("transactionData").is_none());
        assert!(json.get("idTag").is_none());
        assert_eq!(StopTransactionRequest::from_json(&json), stop);
    }

    #[test]
    fn test_equality_and_hash() {
        let a = StartTransactionResponse::new(IdTagInfo::new(AuthorizationStatus::Accepted), 7);
        let b = StartTransactionResponse::try_from_json(&a.to_json()).unwrap();
        let c = StartTransactionResponse::new(IdTagInfo::new(AuthorizationStatus::Blocked), 7);

        let set: HashSet<_> = [a.clone(), b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&a));
    }

    #[test]
    fn test_context_and_hooks() {
        assert_eq!(
            HeartbeatRequest::context(),
            "https://open.charging.cloud/context/ocpp/v1.6/heartbeatRequest"
        );
        let ld = HeartbeatRequest::new().to_json_ld();
        assert_eq!(ld["@context"], HeartbeatRequest::context());

        let hook = |_: &serde_json::Value, mut r: StartTransactionRequest| {
            r.meter_start += 1;
            r
        };
        let start = StartTransactionRequest::new(1, tag("A"), 10, noon()).unwrap();
        let parsed = StartTransactionRequest::try_from_json_with(&start.to_json(), Some(&hook)).unwrap();
        assert_eq!(parsed.meter_start, 11);
    }

    #[test]
    #[should_panic(expected = "invalid Authorize Request")]
    fn test_from_json_panics() {
        AuthorizeRequest::from_json(&json!({}));
    }
}
