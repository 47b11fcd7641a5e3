//! Reservation profile

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::*;
use super::CP_NAMESPACE;
use crate::error::ParseError;
use crate::xml::{XmlCodec, XmlElement};

// ============================================================================
// ReserveNow
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveNowRequest {
    /// 0 reserves any connector of the charge point
    pub connector_id: u32,
    pub expiry_date: DateTime<Utc>,
    pub id_tag: IdToken,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id_tag: Option<IdToken>,
    pub reservation_id: i32,
}

impl ReserveNowRequest {
    pub fn new(connector_id: u32, expiry_date: DateTime<Utc>, id_tag: IdToken, reservation_id: i32) -> Self {
        Self {
            connector_id,
            expiry_date,
            id_tag,
            parent_id_tag: None,
            reservation_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReserveNowResponse {
    pub status: ReservationStatus,
}

impl fmt::Display for ReserveNowRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ReserveNow (#{} connector {} for {})",
            self.reservation_id, self.connector_id, self.id_tag
        )
    }
}

impl fmt::Display for ReserveNowResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ReserveNow -> {}", self.status)
    }
}

impl XmlCodec for ReserveNowRequest {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element
            .with_text("connectorId", self.connector_id)
            .with_datetime("expiryDate", &self.expiry_date)
            .with_text("idTag", &self.id_tag)
            .with_opt_text("parentIdTag", self.parent_id_tag.as_ref())
            .with_text("reservationId", self.reservation_id)
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            connector_id: element.parse_child("connectorId")?,
            expiry_date: element.datetime("expiryDate")?,
            id_tag: element.parse_child("idTag")?,
            parent_id_tag: element.opt_parse_child("parentIdTag")?,
            reservation_id: element.parse_child("reservationId")?,
        })
    }
}

impl XmlCodec for ReserveNowResponse {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element.with_text("status", self.status)
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            status: element.parse_child("status")?,
        })
    }
}

message_pair!(V1_6, "ReserveNow", ReserveNowRequest => ReserveNowResponse, xml: CP_NAMESPACE);

// ============================================================================
// CancelReservation
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelReservationRequest {
    pub reservation_id: i32,
}

impl CancelReservationRequest {
    pub fn new(reservation_id: i32) -> Self {
        Self { reservation_id }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CancelReservationResponse {
    pub status: CancelReservationStatus,
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

impl XmlCodec for CancelReservationRequest {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element.with_text("reservationId", self.reservation_id)
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            reservation_id: element.parse_child("reservationId")?,
        })
    }
}

impl XmlCodec for CancelReservationResponse {
    fn write_xml(&self, element: XmlElement) -> XmlElement {
        element.with_text("status", self.status)
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Ok(Self {
            status: element.parse_child("status")?,
        })
    }
}

message_pair!(V1_6, "CancelReservation", CancelReservationRequest => CancelReservationResponse, xml: CP_NAMESPACE);

unconstrained!(
    ReserveNowRequest,
    ReserveNowResponse,
    CancelReservationRequest,
    CancelReservationResponse,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::OcppMessage;
    use crate::xml::XmlMessage;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_reserve_now_roundtrip() {
        let expiry = Utc.with_ymd_and_hms(2024, 6, 1, 18, 30, 0).unwrap();
        let mut request = ReserveNowRequest::new(0, expiry, "04A2B1".parse().unwrap(), 17);
        request.parent_id_tag = Some("FLEET-1".parse().unwrap());

        let json = request.to_json();
        assert_eq!(json["expiryDate"], "2024-06-01T18:30:00Z");
        assert_eq!(ReserveNowRequest::from_json(&json), request);
        assert_eq!(ReserveNowRequest::from_xml(&request.to_xml()), request);
        assert_eq!(request.to_string(), "ReserveNow (#17 connector 0 for 04A2B1)");
    }

    #[test]
    fn test_cancel_reservation_status() {
        let response = CancelReservationResponse::try_from_json(&json!({"status": "Rejected"})).unwrap();
        assert_eq!(response.status, CancelReservationStatus::Rejected);
        assert!(CancelReservationResponse::try_from_json(&json!({"status": "Faulted"})).is_err());
    }
}
