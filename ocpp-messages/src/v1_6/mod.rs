//! OCPP 1.6 message catalog
//!
//! All 28 actions, each with a JSON codec (OCPP-J) and an XML codec for
//! the SOAP binding (OCPP-S):
//! - `core_profile`: authorization, boot, transactions, status and meter values
//! - `remote`: configuration and remote control sent by the central system
//! - `firmware`: diagnostics and firmware management
//! - `local_auth_list`, `reservation`, `smart_charging`, `trigger`
//! - `soap`: SOAP 1.2 envelope with the OCPP WS-Addressing header

pub mod types;
pub mod core_profile;
pub mod remote;
pub mod firmware;
pub mod local_auth_list;
pub mod reservation;
pub mod smart_charging;
pub mod trigger;
pub mod soap;

pub use core_profile::*;
pub use firmware::*;
pub use local_auth_list::*;
pub use remote::*;
pub use reservation::*;
pub use smart_charging::*;
pub use soap::{SoapHeader, SoapMessage};
pub use trigger::*;
pub use types::*;

/// Central system service namespace (messages initiated by the charge point)
pub const CS_NAMESPACE: &str = "urn://Ocpp/Cs/2015/10/";

/// Charge point service namespace (messages initiated by the central system)
pub const CP_NAMESPACE: &str = "urn://Ocpp/Cp/2015/10/";

wire_enum! {
    /// Every OCPP 1.6 action
    pub enum Action {
        Authorize => "Authorize",
        BootNotification => "BootNotification",
        CancelReservation => "CancelReservation",
        ChangeAvailability => "ChangeAvailability",
        ChangeConfiguration => "ChangeConfiguration",
        ClearCache => "ClearCache",
        ClearChargingProfile => "ClearChargingProfile",
        DataTransfer => "DataTransfer",
        DiagnosticsStatusNotification => "DiagnosticsStatusNotification",
        FirmwareStatusNotification => "FirmwareStatusNotification",
        GetCompositeSchedule => "GetCompositeSchedule",
        GetConfiguration => "GetConfiguration",
        GetDiagnostics => "GetDiagnostics",
        GetLocalListVersion => "GetLocalListVersion",
        Heartbeat => "Heartbeat",
        MeterValues => "MeterValues",
        RemoteStartTransaction => "RemoteStartTransaction",
        RemoteStopTransaction => "RemoteStopTransaction",
        ReserveNow => "ReserveNow",
        Reset => "Reset",
        SendLocalList => "SendLocalList",
        SetChargingProfile => "SetChargingProfile",
        StartTransaction => "StartTransaction",
        StatusNotification => "StatusNotification",
        StopTransaction => "StopTransaction",
        TriggerMessage => "TriggerMessage",
        UnlockConnector => "UnlockConnector",
        UpdateFirmware => "UpdateFirmware",
    }
}

message_set! {
    xml
    /// Any OCPP 1.6 request
    pub enum Request for Action {
        Authorize(AuthorizeRequest),
        BootNotification(BootNotificationRequest),
        CancelReservation(CancelReservationRequest),
        ChangeAvailability(ChangeAvailabilityRequest),
        ChangeConfiguration(ChangeConfigurationRequest),
        ClearCache(ClearCacheRequest),
        ClearChargingProfile(ClearChargingProfileRequest),
        DataTransfer(DataTransferRequest),
        DiagnosticsStatusNotification(DiagnosticsStatusNotificationRequest),
        FirmwareStatusNotification(FirmwareStatusNotificationRequest),
        GetCompositeSchedule(GetCompositeScheduleRequest),
        GetConfiguration(GetConfigurationRequest),
        GetDiagnostics(GetDiagnosticsRequest),
        GetLocalListVersion(GetLocalListVersionRequest),
        Heartbeat(HeartbeatRequest),
        MeterValues(MeterValuesRequest),
        RemoteStartTransaction(RemoteStartTransactionRequest),
        RemoteStopTransaction(RemoteStopTransactionRequest),
        ReserveNow(ReserveNowRequest),
        Reset(ResetRequest),
        SendLocalList(SendLocalListRequest),
        SetChargingProfile(SetChargingProfileRequest),
        StartTransaction(StartTransactionRequest),
        StatusNotification(StatusNotificationRequest),
        StopTransaction(StopTransactionRequest),
        TriggerMessage(TriggerMessageRequest),
        UnlockConnector(UnlockConnectorRequest),
        UpdateFirmware(UpdateFirmwareRequest),
    }
}

message_set! {
    xml
    /// Any OCPP 1.6 response
    pub enum Response for Action {
        Authorize(AuthorizeResponse),
        BootNotification(BootNotificationResponse),
        CancelReservation(CancelReservationResponse),
        ChangeAvailability(ChangeAvailabilityResponse),
        ChangeConfiguration(ChangeConfigurationResponse),
        ClearCache(ClearCacheResponse),
        ClearChargingProfile(ClearChargingProfileResponse),
        DataTransfer(DataTransferResponse),
        DiagnosticsStatusNotification(DiagnosticsStatusNotificationResponse),
        FirmwareStatusNotification(FirmwareStatusNotificationResponse),
        GetCompositeSchedule(GetCompositeScheduleResponse),
        GetConfiguration(GetConfigurationResponse),
        GetDiagnostics(GetDiagnosticsResponse),
        GetLocalListVersion(GetLocalListVersionResponse),
        Heartbeat(HeartbeatResponse),
        MeterValues(MeterValuesResponse),
        RemoteStartTransaction(RemoteStartTransactionResponse),
        RemoteStopTransaction(RemoteStopTransactionResponse),
        ReserveNow(ReserveNowResponse),
        Reset(ResetResponse),
        SendLocalList(SendLocalListResponse),
        SetChargingProfile(SetChargingProfileResponse),
        StartTransaction(StartTransactionResponse),
        StatusNotification(StatusNotificationResponse),
        StopTransaction(StopTransactionResponse),
        TriggerMessage(TriggerMessageResponse),
        UnlockConnector(UnlockConnectorResponse),
        UpdateFirmware(UpdateFirmwareResponse),
    }
}

impl Action {
    /// Service namespace of this action's SOAP messages
    pub fn namespace(&self) -> &'static str {
        match self {
            Action::Authorize
            | Action::BootNotification
            | Action::DataTransfer
            | Action::DiagnosticsStatusNotification
            | Action::FirmwareStatusNotification
            | Action::Heartbeat
            | Action::MeterValues
            | Action::StartTransaction
            | Action::StatusNotification
            | Action::StopTransaction => CS_NAMESPACE,
            _ => CP_NAMESPACE,
        }
    }
}
