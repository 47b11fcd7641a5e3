//! Provisioning: boot, heartbeat, reset and the device model variables

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::*;
use crate::common::{CiString1000, CiString2500, Validate};
use crate::error::ValidationError;

// ============================================================================
// BootNotification
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BootNotificationRequest {
    pub charging_station: ChargingStation,
    pub reason: BootReason,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl BootNotificationRequest {
    pub fn new(charging_station: ChargingStation, reason: BootReason) -> Self {
        Self {
            charging_station,
            reason,
            custom_data: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BootNotificationResponse {
    pub current_time: DateTime<Utc>,
    /// Heartbeat interval in seconds (retry interval when not accepted)
    pub interval: i32,
    pub status: RegistrationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_info: Option<StatusInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl BootNotificationResponse {
    pub fn new(status: RegistrationStatus, current_time: DateTime<Utc>, interval: i32) -> Self {
        Self {
            current_time,
            interval,
            status,
            status_info: None,
            custom_data: None,
        }
    }
}

impl fmt::Display for BootNotificationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BootNotification ({} {}, {})",
            self.charging_station.vendor_name, self.charging_station.model, self.reason
        )
    }
}

impl fmt::Display for BootNotificationResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BootNotification -> {} (interval {}s)", self.status, self.interval)
    }
}

message_pair!(V2_1, "BootNotification", BootNotificationRequest => BootNotificationResponse);

// ============================================================================
// Heartbeat
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartbeatRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl HeartbeatRequest {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartbeatResponse {
    pub current_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl HeartbeatResponse {
    pub fn new(current_time: DateTime<Utc>) -> Self {
        Self {
            current_time,
            custom_data: None,
        }
    }
}

impl fmt::Display for HeartbeatRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Heartbeat")
    }
}

impl fmt::Display for HeartbeatResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Heartbeat -> {}", self.current_time.to_rfc3339())
    }
}

message_pair!(V2_1, "Heartbeat", HeartbeatRequest => HeartbeatResponse);

// ============================================================================
// Reset
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetRequest {
    #[serde(rename = "type")]
    pub reset_type: ResetType,
    /// Reset a single EVSE instead of the whole station
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evse_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl ResetRequest {
    pub fn new(reset_type: ResetType) -> Self {
        Self {
            reset_type,
            evse_id: None,
            custom_data: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetResponse {
    pub status: ResetStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_info: Option<StatusInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl ResetResponse {
    pub fn new(status: ResetStatus) -> Self {
        Self {
            status,
            status_info: None,
            custom_data: None,
        }
    }
}

impl Validate for ResetRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        match self.evse_id {
            Some(id) => positive_id("evseId", id),
            None => Ok(()),
        }
    }
}

impl fmt::Display for ResetRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.evse_id {
            Some(id) => write!(f, "Reset ({}, evse {})", self.reset_type, id),
            None => write!(f, "Reset ({})", self.reset_type),
        }
    }
}

impl fmt::Display for ResetResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reset -> {}", self.status)
    }
}

message_pair!(V2_1, "Reset", ResetRequest => ResetResponse);

// ============================================================================
// GetVariables
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetVariableData {
    /// Defaults to `Actual`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_type: Option<Attribute>,
    pub component: Component,
    pub variable: Variable,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl GetVariableData {
    pub fn new(component: Component, variable: Variable) -> Self {
        Self {
            attribute_type: None,
            component,
            variable,
            custom_data: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetVariableResult {
    pub attribute_status: GetVariableStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_status_info: Option<StatusInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_type: Option<Attribute>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_value: Option<CiString2500>,
    pub component: Component,
    pub variable: Variable,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl GetVariableResult {
    pub fn new(status: GetVariableStatus, component: Component, variable: Variable) -> Self {
        Self {
            attribute_status: status,
            attribute_status_info: None,
            attribute_type: None,
            attribute_value: None,
            component,
            variable,
            custom_data: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetVariablesRequest {
    pub get_variable_data: Vec<GetVariableData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl GetVariablesRequest {
    pub fn new(data: Vec<GetVariableData>) -> Result<Self, ValidationError> {
        let message = Self {
            get_variable_data: data,
            custom_data: None,
        };
        message.validate()?;
        Ok(message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetVariablesResponse {
    pub get_variable_result: Vec<GetVariableResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl GetVariablesResponse {
    pub fn new(results: Vec<GetVariableResult>) -> Result<Self, ValidationError> {
        let message = Self {
            get_variable_result: results,
            custom_data: None,
        };
        message.validate()?;
        Ok(message)
    }
}

impl Validate for GetVariablesRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        non_empty("getVariableData", &self.get_variable_data)
    }
}

impl Validate for GetVariablesResponse {
    fn validate(&self) -> Result<(), ValidationError> {
        non_empty("getVariableResult", &self.get_variable_result)
    }
}

impl fmt::Display for GetVariablesRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GetVariables (")?;
        for (index, data) in self.get_variable_data.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}.{}", data.component, data.variable)?;
        }
        f.write_str(")")
    }
}

impl fmt::Display for GetVariablesResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GetVariables -> {} results", self.get_variable_result.len())
    }
}

message_pair!(V2_1, "GetVariables", GetVariablesRequest => GetVariablesResponse);

// ============================================================================
// SetVariables
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetVariableData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_type: Option<Attribute>,
    pub attribute_value: CiString1000,
    pub component: Component,
    pub variable: Variable,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl SetVariableData {
    pub fn new(component: Component, variable: Variable, value: CiString1000) -> Self {
        Self {
            attribute_type: None,
            attribute_value: value,
            component,
            variable,
            custom_data: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetVariableResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_type: Option<Attribute>,
    pub attribute_status: SetVariableStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_status_info: Option<StatusInfo>,
    pub component: Component,
    pub variable: Variable,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl SetVariableResult {
    pub fn new(status: SetVariableStatus, component: Component, variable: Variable) -> Self {
        Self {
            attribute_type: None,
            attribute_status: status,
            attribute_status_info: None,
            component,
            variable,
            custom_data: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetVariablesRequest {
    pub set_variable_data: Vec<SetVariableData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl SetVariablesRequest {
    pub fn new(data: Vec<SetVariableData>) -> Result<Self, ValidationError> {
        let message = Self {
            set_variable_data: data,
            custom_data: None,
        };
        message.validate()?;
        Ok(message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetVariablesResponse {
    pub set_variable_result: Vec<SetVariableResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl SetVariablesResponse {
    pub fn new(results: Vec<SetVariableResult>) -> Result<Self, ValidationError> {
        let message = Self {
            set_variable_result: results,
            custom_data: None,
        };
        message.validate()?;
        Ok(message)
    }
}

impl Validate for SetVariablesRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        non_empty("setVariableData", &self.set_variable_data)
    }
}

impl Validate for SetVariablesResponse {
    fn validate(&self) -> Result<(), ValidationError> {
        non_empty("setVariableResult", &self.set_variable_result)
    }
}

impl fmt::Display for SetVariablesRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SetVariables (")?;
        for (index, data) in self.set_variable_data.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}.{}={}", data.component, data.variable, data.attribute_value)?;
        }
        f.write_str(")")
    }
}

impl fmt::Display for SetVariablesResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SetVariables -> {} results", self.set_variable_result.len())
    }
}

message_pair!(V2_1, "SetVariables", SetVariablesRequest => SetVariablesResponse);

unconstrained!(
    BootNotificationRequest,
    BootNotificationResponse,
    HeartbeatRequest,
    HeartbeatResponse,
    ResetResponse,
);
