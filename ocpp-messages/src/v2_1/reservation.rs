//! Reservations

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::*;
use crate::common::{CiString20, Validate};
use crate::error::ValidationError;

// ============================================================================
// ReserveNow
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveNowRequest {
    pub id: i32,
    pub expiry_date_time: DateTime<Utc>,
    /// Connector type (e.g. `cCCS2`) when any EVSE with that type will do
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connector_type: Option<CiString20>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evse_id: Option<u32>,
    pub id_token: IdToken,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id_token: Option<IdToken>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl ReserveNowRequest {
    pub fn new(id: i32, expiry_date_time: DateTime<Utc>, id_token: IdToken) -> Self {
        Self {
            id,
            expiry_date_time,
            connector_type: None,
            evse_id: None,
            id_token,
            group_id_token: None,
            custom_data: None,
        }
    }
}

impl Validate for ReserveNowRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        match self.evse_id {
            Some(id) => positive_id("evseId", id),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveNowResponse {
    pub status: ReserveNowStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_info: Option<StatusInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl ReserveNowResponse {
    pub fn new(status: ReserveNowStatus) -> Self {
        Self {
            status,
            status_info: None,
            custom_data: None,
        }
    }
}

impl fmt::Display for ReserveNowRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.evse_id {
            Some(evse) => write!(f, "ReserveNow (#{} evse {} for {})", self.id, evse, self.id_token),
            None => write!(f, "ReserveNow (#{} for {})", self.id, self.id_token),
        }
    }
}

impl fmt::Display for ReserveNowResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ReserveNow -> {}", self.status)
    }
}

message_pair!(V2_1, "ReserveNow", ReserveNowRequest => ReserveNowResponse);

// ============================================================================
// CancelReservation
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelReservationRequest {
    pub reservation_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl CancelReservationRequest {
    pub fn new(reservation_id: i32) -> Self {
        Self {
            reservation_id,
            custom_data: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelReservationResponse {
    pub status: CancelReservationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_info: Option<StatusInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl CancelReservationResponse {
    pub fn new(status: CancelReservationStatus) -> Self {
        Self {
            status,
            status_info: None,
            custom_data: None,
        }
    }
}

impl fmt::Display for CancelReservationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CancelReservation (#{})", self.reservation_id)
    }
}

impl fmt::Display for CancelReservationResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CancelReservation -> {}", self.status)
    }
}

message_pair!(V2_1, "CancelReservation", CancelReservationRequest => CancelReservationResponse);

unconstrained!(ReserveNowResponse, CancelReservationRequest, CancelReservationResponse);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::OcppMessage;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_reserve_now_roundtrip() {
        let expiry = Utc.with_ymd_and_hms(2025, 6, 1, 18, 30, 0).unwrap();
        let token = IdToken::new("04A2B1".parse().unwrap(), IdTokenKind::Iso14443);
        let mut request = ReserveNowRequest::new(17, expiry, token);
        request.connector_type = Some("cCCS2".parse().unwrap());

        let json = request.to_json();
        assert_eq!(json["expiryDateTime"], "2025-06-01T18:30:00Z");
        assert_eq!(json["connectorType"], "cCCS2");
        assert_eq!(ReserveNowRequest::from_json(&json), request);
        assert_eq!(request.to_string(), "ReserveNow (#17 for ISO14443:04A2B1)");
    }

    #[test]
    fn test_cancel_reservation() {
        let response = CancelReservationResponse::from_json(&json!({"status": "Rejected"}));
        assert_eq!(response.status, CancelReservationStatus::Rejected);
        assert!(CancelReservationRequest::try_from_json(&json!({"reservationId": "17"})).is_err());
    }
}
