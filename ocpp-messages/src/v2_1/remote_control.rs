//! Remote transaction control, connector unlock and message triggers

use std::fmt;

use serde::{Deserialize, Serialize};

use super::types::*;
use crate::common::{CiString36, CiString50, Validate};
use crate::error::ValidationError;

// ============================================================================
// RequestStartTransaction
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestStartTransactionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evse_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id_token: Option<IdToken>,
    pub id_token: IdToken,
    /// Echoed in the TransactionEvent that starts the transaction
    pub remote_start_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charging_profile: Option<ChargingProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl RequestStartTransactionRequest {
    pub fn new(id_token: IdToken, remote_start_id: i32) -> Self {
        Self {
            evse_id: None,
            group_id_token: None,
            id_token,
            remote_start_id,
            charging_profile: None,
            custom_data: None,
        }
    }
}

impl Validate for RequestStartTransactionRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(id) = self.evse_id {
            positive_id("evseId", id)?;
        }
        if let Some(profile) = &self.charging_profile {
            if profile.charging_profile_purpose != ChargingProfilePurpose::TxProfile {
                return Err(ValidationError::new(
                    "chargingProfile.chargingProfilePurpose",
                    "must be TxProfile",
                ));
            }
            // the transaction does not exist yet
            if profile.transaction_id.is_some() {
                return Err(ValidationError::new("chargingProfile.transactionId", "must not be set"));
            }
            profile.validate().map_err(|e| e.within("chargingProfile"))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestStartTransactionResponse {
    pub status: RequestStartStopStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_info: Option<StatusInfo>,
    /// Set when a transaction was already running (e.g. started by plug-in)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<CiString36>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl RequestStartTransactionResponse {
    pub fn new(status: RequestStartStopStatus) -> Self {
        Self {
            status,
            status_info: None,
            transaction_id: None,
            custom_data: None,
        }
    }
}

impl fmt::Display for RequestStartTransactionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RequestStartTransaction (#{} for {}", self.remote_start_id, self.id_token)?;
        if let Some(id) = self.evse_id {
            write!(f, " on evse {}", id)?;
        }
        f.write_str(")")
    }
}

impl fmt::Display for RequestStartTransactionResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RequestStartTransaction -> {}", self.status)
    }
}

message_pair!(V2_1, "RequestStartTransaction", RequestStartTransactionRequest => RequestStartTransactionResponse);

// ============================================================================
// RequestStopTransaction
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestStopTransactionRequest {
    pub transaction_id: CiString36,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl RequestStopTransactionRequest {
    pub fn new(transaction_id: CiString36) -> Self {
        Self {
            transaction_id,
            custom_data: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestStopTransactionResponse {
    pub status: RequestStartStopStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_info: Option<StatusInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl RequestStopTransactionResponse {
    pub fn new(status: RequestStartStopStatus) -> Self {
        Self {
            status,
            status_info: None,
            custom_data: None,
        }
    }
}

impl fmt::Display for RequestStopTransactionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RequestStopTransaction ({})", self.transaction_id)
    }
}

impl fmt::Display for RequestStopTransactionResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RequestStopTransaction -> {}", self.status)
    }
}

message_pair!(V2_1, "RequestStopTransaction", RequestStopTransactionRequest => RequestStopTransactionResponse);

// ============================================================================
// UnlockConnector
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockConnectorRequest {
    pub evse_id: u32,
    pub connector_id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl UnlockConnectorRequest {
    pub fn new(evse_id: u32, connector_id: u32) -> Result<Self, ValidationError> {
        let message = Self {
            evse_id,
            connector_id,
            custom_data: None,
        };
        message.validate()?;
        Ok(message)
    }
}

impl Validate for UnlockConnectorRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        positive_id("evseId", self.evse_id)?;
        positive_id("connectorId", self.connector_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockConnectorResponse {
    pub status: UnlockStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_info: Option<StatusInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl UnlockConnectorResponse {
    pub fn new(status: UnlockStatus) -> Self {
        Self {
            status,
            status_info: None,
            custom_data: None,
        }
    }
}

impl fmt::Display for UnlockConnectorRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UnlockConnector (evse {} connector {})", self.evse_id, self.connector_id)
    }
}

impl fmt::Display for UnlockConnectorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UnlockConnector -> {}", self.status)
    }
}

message_pair!(V2_1, "UnlockConnector", UnlockConnectorRequest => UnlockConnectorResponse);

// ============================================================================
// TriggerMessage
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerMessageRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evse: Option<Evse>,
    pub requested_message: MessageTrigger,
    /// Vendor trigger name, only with `CustomTrigger`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_trigger: Option<CiString50>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl TriggerMessageRequest {
    pub fn new(requested_message: MessageTrigger) -> Result<Self, ValidationError> {
        let message = Self {
            evse: None,
            requested_message,
            custom_trigger: None,
            custom_data: None,
        };
        message.validate()?;
        Ok(message)
    }

    pub fn custom(trigger: CiString50) -> Self {
        Self {
            evse: None,
            requested_message: MessageTrigger::CustomTrigger,
            custom_trigger: Some(trigger),
            custom_data: None,
        }
    }
}

impl Validate for TriggerMessageRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        let is_custom = self.requested_message == MessageTrigger::CustomTrigger;
        match (is_custom, &self.custom_trigger) {
            (true, None) => Err(ValidationError::new("customTrigger", "required for CustomTrigger")),
            (false, Some(_)) => Err(ValidationError::new("customTrigger", "only allowed with CustomTrigger")),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerMessageResponse {
    pub status: TriggerMessageStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_info: Option<StatusInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl TriggerMessageResponse {
    pub fn new(status: TriggerMessageStatus) -> Self {
        Self {
            status,
            status_info: None,
            custom_data: None,
        }
    }
}

impl fmt::Display for TriggerMessageRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.custom_trigger {
            Some(name) => write!(f, "TriggerMessage ({})", name),
            None => write!(f, "TriggerMessage ({})", self.requested_message),
        }
    }
}

impl fmt::Display for TriggerMessageResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TriggerMessage -> {}", self.status)
    }
}

message_pair!(V2_1, "TriggerMessage", TriggerMessageRequest => TriggerMessageResponse);

unconstrained!(
    RequestStartTransactionResponse,
    RequestStopTransactionRequest,
    RequestStopTransactionResponse,
    UnlockConnectorResponse,
    TriggerMessageResponse,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{Decimal, OcppMessage};
    use crate::error::ParseError;
    use serde_json::json;

    fn token() -> IdToken {
        IdToken::new("04A2B1C3".parse().unwrap(), IdTokenKind::Iso14443)
    }

    fn profile(purpose: ChargingProfilePurpose) -> ChargingProfile {
        let period = ChargingSchedulePeriod::new(0, Decimal::from(16u32)).unwrap();
        let schedule = ChargingSchedule::new(1, ChargingRateUnit::A, vec![period]).unwrap();
        ChargingProfile::new(5, 0, purpose, ChargingProfileKind::Relative, vec![schedule]).unwrap()
    }

    #[test]
    fn test_request_start_with_profile() {
        let mut request = RequestStartTransactionRequest::new(token(), 77);
        request.evse_id = Some(1);
        request.charging_profile = Some(profile(ChargingProfilePurpose::TxProfile));
        assert!(request.validate().is_ok());
        assert_eq!(RequestStartTransactionRequest::from_json(&request.to_json()), request);
        assert_eq!(request.to_string(), "RequestStartTransaction (#77 for ISO14443:04A2B1C3 on evse 1)");

        request.charging_profile = Some(profile(ChargingProfilePurpose::TxDefaultProfile));
        assert_eq!(request.validate().unwrap_err().field, "chargingProfile.chargingProfilePurpose");

        let mut with_tx = profile(ChargingProfilePurpose::TxProfile);
        with_tx.transaction_id = Some("tx-1".parse().unwrap());
        request.charging_profile = Some(with_tx);
        assert_eq!(request.validate().unwrap_err().field, "chargingProfile.transactionId");
    }

    #[test]
    fn test_request_start_evse_zero() {
        let json = json!({"evseId": 0, "idToken": {"idToken": "X", "type": "Central"}, "remoteStartId": 1});
        let err = RequestStartTransactionRequest::try_from_json(&json).unwrap_err();
        assert!(matches!(err, ParseError::Validation(ref v) if v.field == "evseId"));
    }

    #[test]
    fn test_request_stop_transaction_id_bound() {
        let long = "t".repeat(37);
        assert!(RequestStopTransactionRequest::try_from_json(&json!({"transactionId": long})).is_err());
        let request = RequestStopTransactionRequest::from_json(&json!({"transactionId": "tx-42"}));
        assert_eq!(request.to_string(), "RequestStopTransaction (tx-42)");
    }

    #[test]
    fn test_custom_trigger_rules() {
        let err = TriggerMessageRequest::try_from_json(&json!({"requestedMessage": "CustomTrigger"})).unwrap_err();
        assert!(matches!(err, ParseError::Validation(ref v) if v.field == "customTrigger"));

        let request = TriggerMessageRequest::custom("com.acme.Diagnostics".parse().unwrap());
        assert_eq!(
            request.to_json(),
            json!({"requestedMessage": "CustomTrigger", "customTrigger": "com.acme.Diagnostics"})
        );
        assert!(request.validate().is_ok());

        let mut heartbeat = TriggerMessageRequest::new(MessageTrigger::Heartbeat).unwrap();
        assert!(heartbeat.validate().is_ok());
        heartbeat.custom_trigger = Some("x".parse().unwrap());
        assert!(heartbeat.validate().is_err());
    }

    #[test]
    fn test_unlock_connector() {
        assert_eq!(UnlockConnectorRequest::new(1, 0).unwrap_err().field, "connectorId");
        assert_eq!(UnlockConnectorRequest::new(0, 1).unwrap_err().field, "evseId");
        assert!(UnlockConnectorRequest::new(1, 1).is_ok());
        let response = UnlockConnectorResponse::from_json(&json!({"status": "OngoingAuthorizedTransaction"}));
        assert_eq!(response.status, UnlockStatus::OngoingAuthorizedTransaction);
    }
}
