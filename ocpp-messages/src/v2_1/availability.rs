//! Availability and connector status

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::*;
use crate::common::Validate;
use crate::error::ValidationError;

// ============================================================================
// ChangeAvailability
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeAvailabilityRequest {
    /// Absent for the whole charging station
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evse: Option<Evse>,
    pub operational_status: OperationalStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl ChangeAvailabilityRequest {
    pub fn new(operational_status: OperationalStatus) -> Self {
        Self {
            evse: None,
            operational_status,
            custom_data: None,
        }
    }

    pub fn for_evse(evse: Evse, operational_status: OperationalStatus) -> Result<Self, ValidationError> {
        let message = Self {
            evse: Some(evse),
            operational_status,
            custom_data: None,
        };
        message.validate()?;
        Ok(message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeAvailabilityResponse {
    pub status: ChangeAvailabilityStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_info: Option<StatusInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl ChangeAvailabilityResponse {
    pub fn new(status: ChangeAvailabilityStatus) -> Self {
        Self {
            status,
            status_info: None,
            custom_data: None,
        }
    }
}

impl Validate for ChangeAvailabilityRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(evse) = &self.evse {
            positive_id("evse.id", evse.id)?;
        }
        Ok(())
    }
}

impl fmt::Display for ChangeAvailabilityRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.evse {
            Some(evse) => write!(f, "ChangeAvailability (evse {} {})", evse.id, self.operational_status),
            None => write!(f, "ChangeAvailability (station {})", self.operational_status),
        }
    }
}

impl fmt::Display for ChangeAvailabilityResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChangeAvailability -> {}", self.status)
    }
}

message_pair!(V2_1, "ChangeAvailability", ChangeAvailabilityRequest => ChangeAvailabilityResponse);

// ============================================================================
// StatusNotification
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusNotificationRequest {
    pub timestamp: DateTime<Utc>,
    pub connector_status: ConnectorStatus,
    pub evse_id: u32,
    pub connector_id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl StatusNotificationRequest {
    pub fn new(timestamp: DateTime<Utc>, connector_status: ConnectorStatus, evse_id: u32, connector_id: u32) -> Result<Self, ValidationError> {
        let message = Self {
            timestamp,
            connector_status,
            evse_id,
            connector_id,
            custom_data: None,
        };
        message.validate()?;
        Ok(message)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusNotificationResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl StatusNotificationResponse {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Validate for StatusNotificationRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        positive_id("evseId", self.evse_id)?;
        positive_id("connectorId", self.connector_id)
    }
}

impl fmt::Display for StatusNotificationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StatusNotification (evse {} connector {}: {})",
            self.evse_id, self.connector_id, self.connector_status
        )
    }
}

impl fmt::Display for StatusNotificationResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StatusNotification -> ok")
    }
}

message_pair!(V2_1, "StatusNotification", StatusNotificationRequest => StatusNotificationResponse);

unconstrained!(ChangeAvailabilityResponse, StatusNotificationResponse);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::OcppMessage;
    use crate::error::ParseError;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_change_availability_scope() {
        let station = ChangeAvailabilityRequest::new(OperationalStatus::Inoperative);
        assert_eq!(station.to_json(), json!({"operationalStatus": "Inoperative"}));

        let mut evse = Evse::new(1);
        evse.connector_id = Some(2);
        let request = ChangeAvailabilityRequest::for_evse(evse, OperationalStatus::Operative).unwrap();
        assert_eq!(
            request.to_json(),
            json!({"evse": {"id": 1, "connectorId": 2}, "operationalStatus": "Operative"})
        );
        assert_eq!(request.to_string(), "ChangeAvailability (evse 1 Operative)");

        let err = ChangeAvailabilityRequest::try_from_json(&json!({"evse": {"id": 0}, "operationalStatus": "Operative"}))
            .unwrap_err();
        assert!(matches!(err, ParseError::Validation(ref v) if v.field == "evse.id"));
        assert!(ChangeAvailabilityRequest::for_evse(Evse::new(0), OperationalStatus::Operative).is_err());
    }

    #[test]
    fn test_status_notification_json() {
        let at = Utc.with_ymd_and_hms(2025, 1, 20, 10, 15, 0).unwrap();
        let request = StatusNotificationRequest::new(at, ConnectorStatus::Occupied, 1, 1).unwrap();
        assert!(StatusNotificationRequest::new(at, ConnectorStatus::Occupied, 0, 1).is_err());
        let json = request.to_json();
        assert_eq!(
            json,
            json!({"timestamp": "2025-01-20T10:15:00Z", "connectorStatus": "Occupied", "evseId": 1, "connectorId": 1})
        );
        assert_eq!(StatusNotificationRequest::from_json(&json), request);

        // 1.6 statuses do not exist in 2.1
        let mut charging = json.clone();
        charging["connectorStatus"] = json!("Charging");
        assert!(StatusNotificationRequest::try_from_json(&charging).is_err());

        assert_eq!(StatusNotificationResponse::from_json(&json!({})), StatusNotificationResponse::new());
    }
}
