//! Smart charging profile
//!
//! Profiles are installed per connector; connector 0 addresses the charge
//! point as a whole. `ChargePointMaxProfile` may only be set there and
//! `TxProfile` only on a physical connector.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::*;
use super::CP_NAMESPACE;
use crate::common::Validate;
use crate::error::{ParseError, ValidationError};
use crate::xml::{XmlCodec, XmlElement};

// ============================================================================
// SetChargingProfile
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetChargingProfileRequest {
    pub connector_id: u32,
    #[serde(rename = "csChargingProfiles")]
    pub cs_charging_profiles: ChargingProfile,
}

impl SetChargingProfileRequest {
    pub fn new(connector_id: u32, profile: ChargingProfile) -> Result<Self, ValidationError> {
        let message = Self {
            connector_id,
            cs_charging_profiles: profile,
        };
        message.validate()?;
        Ok(message)
    }
}

impl Validate for SetChargingProfileRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        let purpose = self.cs_charging_profiles.charging_profile_purpose;
        match purpose {
            ChargingProfilePurpose::ChargePointMaxProfile if self.connector_id != 0 => {
                return Err(ValidationError::new("connectorId", "ChargePointMaxProfile requires connector 0"));
            }
            ChargingProfilePurpose::TxProfile if self.connector_id == 0 => {
                return Err(ValidationError::new("connectorId", "TxProfile requires a connector > 0"));
            }
            _ => {}
        }
        self.cs_charging_profiles
            .validate()
            .map_err(|e| e.within("csChargingProfiles"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SetChargingProfileResponse {
    pub status: ChargingProfileStatus,
}

impl SetChargingProfileResponse {
    pub fn new(status: ChargingProfileStatus) -> Self {
        Self { status }
    }
}

impl fmt::Display for SetChargingProfileRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SetChargingProfile (#{} {} on connector {})",
            self.cs_charging_profiles.charging_profile_id,
            self.cs_charging_profiles.charging_profile_purpose,
            self.connector_id
        )
    }
}

impl fmt::Display for SetChargingProfileResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SetChargingProfile -> {}", self.status)
    }
}

impl XmlCodec for SetChargingProfileRequest {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element
            .with_text("connectorId", self.connector_id)
            .with_nested("csChargingProfiles", &self.cs_charging_profiles)
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            connector_id: element.parse_child("connectorId")?,
            cs_charging_profiles: element.nested("csChargingProfiles")?,
        })
    }
}

impl XmlCodec for SetChargingProfileResponse {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element.with_text("status", self.status)
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            status: element.parse_child("status")?,
        })
    }
}

message_pair!(V1_6, "SetChargingProfile", SetChargingProfileRequest => SetChargingProfileResponse, xml: CP_NAMESPACE);

// ============================================================================
// ClearChargingProfile
// ============================================================================

/// Every present field narrows the set of profiles to clear
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearChargingProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connector_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charging_profile_purpose: Option<ChargingProfilePurpose>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_level: Option<u32>,
}

impl ClearChargingProfileRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_id(id: i32) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClearChargingProfileResponse {
    pub status: ClearChargingProfileStatus,
}

impl fmt::Display for ClearChargingProfileRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "ClearChargingProfile (#{})", id),
            None => f.write_str("ClearChargingProfile (by filter)"),
        }
    }
}

impl fmt::Display for ClearChargingProfileResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClearChargingProfile -> {}", self.status)
    }
}

impl XmlCodec for ClearChargingProfileRequest {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element
            .with_opt_text("id", self.id.as_ref())
            .with_opt_text("connectorId", self.connector_id.as_ref())
            .with_opt_text("chargingProfilePurpose", self.charging_profile_purpose.as_ref())
            .with_opt_text("stackLevel", self.stack_level.as_ref())
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            id: element.opt_parse_child("id")?,
            connector_id: element.opt_parse_child("connectorId")?,
            charging_profile_purpose: element.opt_parse_child("chargingProfilePurpose")?,
            stack_level: element.opt_parse_child("stackLevel")?,
        })
    }
}

impl XmlCodec for ClearChargingProfileResponse {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element.with_text("status", self.status)
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            status: element.parse_child("status")?,
        })
    }
}

message_pair!(V1_6, "ClearChargingProfile", ClearChargingProfileRequest => ClearChargingProfileResponse, xml: CP_NAMESPACE);

// ============================================================================
// GetCompositeSchedule
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCompositeScheduleRequest {
    pub connector_id: u32,
    /// Length of the requested schedule in seconds
    pub duration: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charging_rate_unit: Option<ChargingRateUnit>,
}

impl GetCompositeScheduleRequest {
    pub fn new(connector_id: u32, duration: u32) -> Self {
        Self {
            connector_id,
            duration,
            charging_rate_unit: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCompositeScheduleResponse {
    pub status: GetCompositeScheduleStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connector_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_start: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charging_schedule: Option<ChargingSchedule>,
}

impl GetCompositeScheduleResponse {
    pub fn rejected() -> Self {
        Self {
            status: GetCompositeScheduleStatus::Rejected,
            connector_id: None,
            schedule_start: None,
            charging_schedule: None,
        }
    }
}

impl Validate for GetCompositeScheduleResponse {
    fn validate(&self) -> Result<(), ValidationError> {
        match &self.charging_schedule {
            Some(schedule) => schedule.validate().map_err(|e| e.within("chargingSchedule")),
            None => Ok(()),
        }
    }
}

impl fmt::Display for GetCompositeScheduleRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GetCompositeSchedule (connector {}, {}s)",
            self.connector_id, self.duration
        )
    }
}

impl fmt::Display for GetCompositeScheduleResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GetCompositeSchedule -> {}", self.status)
    }
}

impl XmlCodec for GetCompositeScheduleRequest {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element
            .with_text("connectorId", self.connector_id)
            .with_text("duration", self.duration)
            .with_opt_text("chargingRateUnit", self.charging_rate_unit.as_ref())
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            connector_id: element.parse_child("connectorId")?,
            duration: element.parse_child("duration")?,
            charging_rate_unit: element.opt_parse_child("chargingRateUnit")?,
        })
    }
}

impl XmlCodec for GetCompositeScheduleResponse {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element
            .with_text("status", self.status)
            .with_opt_text("connectorId", self.connector_id.as_ref())
            .with_opt_datetime("scheduleStart", self.schedule_start.as_ref())
            .with_opt_nested("chargingSchedule", self.charging_schedule.as_ref())
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            status: element.parse_child("status")?,
            connector_id: element.opt_parse_child("connectorId")?,
            schedule_start: element.opt_datetime("scheduleStart")?,
            charging_schedule: element.opt_nested("chargingSchedule")?,
        })
    }
}

message_pair!(V1_6, "GetCompositeSchedule", GetCompositeScheduleRequest => GetCompositeScheduleResponse, xml: CP_NAMESPACE);

unconstrained!(
    SetChargingProfileResponse,
    ClearChargingProfileRequest,
    ClearChargingProfileResponse,
    GetCompositeScheduleRequest,
);
