//! OCPP 2.1 message catalog
//!
//! 21 actions, JSON only (OCPP-J). Every message and composite type
//! accepts an optional `customData` vendor extension.
//! - `provisioning`: boot, heartbeat, reset, device model variables
//! - `authorization`, `local_auth_list`: token checks and the local list
//! - `availability`, `remote_control`, `reservation`
//! - `smart_charging`, `metering`, `data_transfer`

pub mod types;
pub mod provisioning;
pub mod authorization;
pub mod local_auth_list;
pub mod availability;
pub mod remote_control;
pub mod reservation;
pub mod smart_charging;
pub mod metering;
pub mod data_transfer;

pub use authorization::*;
pub use availability::*;
pub use data_transfer::*;
pub use local_auth_list::*;
pub use metering::*;
pub use provisioning::*;
pub use remote_control::*;
pub use reservation::*;
pub use smart_charging::*;
pub use types::*;

wire_enum! {
    /// Every OCPP 2.1 action in this catalog
    pub enum Action {
        Authorize => "Authorize",
        BootNotification => "BootNotification",
        CancelReservation => "CancelReservation",
        ChangeAvailability => "ChangeAvailability",
        ClearCache => "ClearCache",
        ClearChargingProfile => "ClearChargingProfile",
        DataTransfer => "DataTransfer",
        GetLocalListVersion => "GetLocalListVersion",
        GetVariables => "GetVariables",
        Heartbeat => "Heartbeat",
        MeterValues => "MeterValues",
        RequestStartTransaction => "RequestStartTransaction",
        RequestStopTransaction => "RequestStopTransaction",
        ReserveNow => "ReserveNow",
        Reset => "Reset",
        SendLocalList => "SendLocalList",
        SetChargingProfile => "SetChargingProfile",
        SetVariables => "SetVariables",
        StatusNotification => "StatusNotification",
        TriggerMessage => "TriggerMessage",
        UnlockConnector => "UnlockConnector",
    }
}

message_set! {
    /// Any OCPP 2.1 request
    pub enum Request for Action {
        Authorize(AuthorizeRequest),
        BootNotification(BootNotificationRequest),
        CancelReservation(CancelReservationRequest),
        ChangeAvailability(ChangeAvailabilityRequest),
        ClearCache(ClearCacheRequest),
        ClearChargingProfile(ClearChargingProfileRequest),
        DataTransfer(DataTransferRequest),
        GetLocalListVersion(GetLocalListVersionRequest),
        GetVariables(GetVariablesRequest),
        Heartbeat(HeartbeatRequest),
        MeterValues(MeterValuesRequest),
        RequestStartTransaction(RequestStartTransactionRequest),
        RequestStopTransaction(RequestStopTransactionRequest),
        ReserveNow(ReserveNowRequest),
        Reset(ResetRequest),
        SendLocalList(SendLocalListRequest),
        SetChargingProfile(SetChargingProfileRequest),
        SetVariables(SetVariablesRequest),
        StatusNotification(StatusNotificationRequest),
        TriggerMessage(TriggerMessageRequest),
        UnlockConnector(UnlockConnectorRequest),
    }
}

message_set! {
    /// Any OCPP 2.1 response
    pub enum Response for Action {
        Authorize(AuthorizeResponse),
        BootNotification(BootNotificationResponse),
        CancelReservation(CancelReservationResponse),
        ChangeAvailability(ChangeAvailabilityResponse),
        ClearCache(ClearCacheResponse),
        ClearChargingProfile(ClearChargingProfileResponse),
        DataTransfer(DataTransferResponse),
        GetLocalListVersion(GetLocalListVersionResponse),
        GetVariables(GetVariablesResponse),
        Heartbeat(HeartbeatResponse),
        MeterValues(MeterValuesResponse),
        RequestStartTransaction(RequestStartTransactionResponse),
        RequestStopTransaction(RequestStopTransactionResponse),
        ReserveNow(ReserveNowResponse),
        Reset(ResetResponse),
        SendLocalList(SendLocalListResponse),
        SetChargingProfile(SetChargingProfileResponse),
        SetVariables(SetVariablesResponse),
        StatusNotification(StatusNotificationResponse),
        TriggerMessage(TriggerMessageResponse),
        UnlockConnector(UnlockConnectorResponse),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::OcppMessage;
    use crate::error::ParseError;
    use serde_json::json;

    #[test]
    fn test_action_table_is_complete() {
        assert_eq!(Action::ALL.len(), 21);
        for action in Action::ALL {
            assert_eq!(action.as_str().parse::<Action>().unwrap(), *action);
        }
        // 1.6 only
        assert!("RemoteStartTransaction".parse::<Action>().is_err());
    }

    #[test]
    fn test_dispatch_by_action() {
        let request = Request::try_from_json(Action::Reset, &json!({"type": "ImmediateAndResume"})).unwrap();
        assert_eq!(request, Request::Reset(ResetRequest::new(ResetType::ImmediateAndResume)));
        assert_eq!(request.action(), Action::Reset);
        assert_eq!(request.to_string(), "Reset (ImmediateAndResume)");

        let response = Response::try_from_json(Action::Heartbeat, &json!({})).unwrap_err();
        assert!(matches!(response, ParseError::MissingField(ref f) if f == "currentTime"));
    }

    #[test]
    fn test_json_ld_context() {
        let request: Request = ClearCacheRequest::new().into();
        assert_eq!(
            request.to_json_ld(),
            json!({"@context": "https://open.charging.cloud/context/ocpp/v2.1/clearCacheRequest"})
        );
        assert_eq!(ClearCacheRequest::VERSION, crate::OcppVersion::V2_1);
    }
}
