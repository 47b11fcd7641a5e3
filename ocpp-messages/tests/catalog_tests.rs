//! Every action of both catalogs, dispatched by action name.
//!
//! Each sample carries only the mandatory fields, so dropping any one of
//! them must fail the parse.

use ocpp_messages::xml::XmlElement;
use ocpp_messages::{v1_6, v2_1, ParseError};
use serde_json::{json, Value};

const AT: &str = "2024-03-01T12:00:00Z";

fn v16_requests() -> Vec<(v1_6::Action, Value)> {
    use v1_6::Action::*;
    vec![
        (Authorize, json!({"idTag": "04A2B1"})),
        (BootNotification, json!({"chargePointVendor": "Elektrokombinacija", "chargePointModel": "EK3"})),
        (CancelReservation, json!({"reservationId": 7})),
        (ChangeAvailability, json!({"connectorId": 1, "type": "Operative"})),
        (ChangeConfiguration, json!({"key": "HeartbeatInterval", "value": "300"})),
        (ClearCache, json!({})),
        (ClearChargingProfile, json!({})),
        (DataTransfer, json!({"vendorId": "com.acme"})),
        (DiagnosticsStatusNotification, json!({"status": "Uploading"})),
        (FirmwareStatusNotification, json!({"status": "Idle"})),
        (GetCompositeSchedule, json!({"connectorId": 1, "duration": 3600})),
        (GetConfiguration, json!({})),
        (GetDiagnostics, json!({"location": "ftp://diag.example.com/ek3"})),
        (GetLocalListVersion, json!({})),
        (Heartbeat, json!({})),
        (
            MeterValues,
            json!({"connectorId": 1, "meterValue": [{"timestamp": AT, "sampledValue": [{"value": "12.5"}]}]}),
        ),
        (RemoteStartTransaction, json!({"idTag": "04A2B1"})),
        (RemoteStopTransaction, json!({"transactionId": 42})),
        (
            ReserveNow,
            json!({"connectorId": 1, "expiryDate": AT, "idTag": "04A2B1", "reservationId": 7}),
        ),
        (Reset, json!({"type": "Soft"})),
        (SendLocalList, json!({"listVersion": 3, "updateType": "Full"})),
        (
            SetChargingProfile,
            json!({
                "connectorId": 1,
                "csChargingProfiles": {
                    "chargingProfileId": 1,
                    "stackLevel": 0,
                    "chargingProfilePurpose": "TxDefaultProfile",
                    "chargingProfileKind": "Absolute",
                    "chargingSchedule": {
                        "chargingRateUnit": "A",
                        "chargingSchedulePeriod": [{"startPeriod": 0, "limit": 16.0}]
                    }
                }
            }),
        ),
        (
            StartTransaction,
            json!({"connectorId": 1, "idTag": "04A2B1", "meterStart": 1500, "timestamp": AT}),
        ),
        (StatusNotification, json!({"connectorId": 1, "errorCode": "NoError", "status": "Available"})),
        (StopTransaction, json!({"meterStop": 20500, "timestamp": AT, "transactionId": 42})),
        (TriggerMessage, json!({"requestedMessage": "Heartbeat"})),
        (UnlockConnector, json!({"connectorId": 1})),
        (UpdateFirmware, json!({"location": "https://fw.example.com/ek3.bin", "retrieveDate": AT})),
    ]
}

fn v16_responses() -> Vec<(v1_6::Action, Value)> {
    use v1_6::Action::*;
    vec![
        (Authorize, json!({"idTagInfo": {"status": "Accepted"}})),
        (BootNotification, json!({"status": "Accepted", "currentTime": AT, "interval": 300})),
        (CancelReservation, json!({"status": "Accepted"})),
        (ChangeAvailability, json!({"status": "Scheduled"})),
        (ChangeConfiguration, json!({"status": "RebootRequired"})),
        (ClearCache, json!({"status": "Accepted"})),
        (ClearChargingProfile, json!({"status": "Unknown"})),
        (DataTransfer, json!({"status": "UnknownVendorId"})),
        (DiagnosticsStatusNotification, json!({})),
        (FirmwareStatusNotification, json!({})),
        (GetCompositeSchedule, json!({"status": "Rejected"})),
        (GetConfiguration, json!({})),
        (GetDiagnostics, json!({})),
        (GetLocalListVersion, json!({"listVersion": 5})),
        (Heartbeat, json!({"currentTime": AT})),
        (MeterValues, json!({})),
        (RemoteStartTransaction, json!({"status": "Accepted"})),
        (RemoteStopTransaction, json!({"status": "Rejected"})),
        (ReserveNow, json!({"status": "Occupied"})),
        (Reset, json!({"status": "Accepted"})),
        (SendLocalList, json!({"status": "VersionMismatch"})),
        (SetChargingProfile, json!({"status": "NotSupported"})),
        (StartTransaction, json!({"idTagInfo": {"status": "Accepted"}, "transactionId": 42})),
        (StatusNotification, json!({})),
        (StopTransaction, json!({})),
        (TriggerMessage, json!({"status": "NotImplemented"})),
        (UnlockConnector, json!({"status": "Unlocked"})),
        (UpdateFirmware, json!({})),
    ]
}

fn token() -> Value {
    json!({"idToken": "04A2B1", "type": "ISO14443"})
}

fn v21_requests() -> Vec<(v2_1::Action, Value)> {
    use v2_1::Action::*;
    vec![
        (Authorize, json!({"idToken": token()})),
        (
            BootNotification,
            json!({"chargingStation": {"model": "EK3", "vendorName": "Elektrokombinacija"}, "reason": "PowerUp"}),
        ),
        (CancelReservation, json!({"reservationId": 7})),
        (ChangeAvailability, json!({"operationalStatus": "Inoperative"})),
        (ClearCache, json!({})),
        (ClearChargingProfile, json!({})),
        (DataTransfer, json!({"vendorId": "com.acme"})),
        (GetLocalListVersion, json!({})),
        (
            GetVariables,
            json!({"getVariableData": [{"component": {"name": "OCPPCommCtrlr"}, "variable": {"name": "OfflineThreshold"}}]}),
        ),
        (Heartbeat, json!({})),
        (
            MeterValues,
            json!({"evseId": 1, "meterValue": [{"timestamp": AT, "sampledValue": [{"value": 12.5}]}]}),
        ),
        (RequestStartTransaction, json!({"idToken": token(), "remoteStartId": 77})),
        (RequestStopTransaction, json!({"transactionId": "tx-9"})),
        (ReserveNow, json!({"id": 7, "expiryDateTime": AT, "idToken": token()})),
        (Reset, json!({"type": "OnIdle"})),
        (SendLocalList, json!({"versionNumber": 3, "updateType": "Full"})),
        (
            SetChargingProfile,
            json!({
                "evseId": 1,
                "chargingProfile": {
                    "id": 9,
                    "stackLevel": 0,
                    "chargingProfilePurpose": "TxDefaultProfile",
                    "chargingProfileKind": "Absolute",
                    "chargingSchedule": [{
                        "id": 1,
                        "chargingRateUnit": "W",
                        "chargingSchedulePeriod": [{"startPeriod": 0, "limit": 11000.0}]
                    }]
                }
            }),
        ),
        (
            SetVariables,
            json!({"setVariableData": [{
                "attributeValue": "60",
                "component": {"name": "OCPPCommCtrlr"},
                "variable": {"name": "OfflineThreshold"}
            }]}),
        ),
        (
            StatusNotification,
            json!({"timestamp": AT, "connectorStatus": "Available", "evseId": 1, "connectorId": 1}),
        ),
        (TriggerMessage, json!({"requestedMessage": "Heartbeat"})),
        (UnlockConnector, json!({"evseId": 1, "connectorId": 1})),
    ]
}

fn v21_responses() -> Vec<(v2_1::Action, Value)> {
    use v2_1::Action::*;
    let variable = json!({"component": {"name": "OCPPCommCtrlr"}, "variable": {"name": "OfflineThreshold"}});
    let mut get_result = variable.clone();
    get_result["attributeStatus"] = json!("Accepted");
    let mut set_result = variable;
    set_result["attributeStatus"] = json!("RebootRequired");
    vec![
        (Authorize, json!({"idTokenInfo": {"status": "Accepted"}})),
        (BootNotification, json!({"currentTime": AT, "interval": 300, "status": "Pending"})),
        (CancelReservation, json!({"status": "Accepted"})),
        (ChangeAvailability, json!({"status": "Scheduled"})),
        (ClearCache, json!({"status": "Rejected"})),
        (ClearChargingProfile, json!({"status": "Accepted"})),
        (DataTransfer, json!({"status": "Accepted"})),
        (GetLocalListVersion, json!({"versionNumber": 12})),
        (GetVariables, json!({"getVariableResult": [get_result]})),
        (Heartbeat, json!({"currentTime": AT})),
        (MeterValues, json!({})),
        (RequestStartTransaction, json!({"status": "Accepted"})),
        (RequestStopTransaction, json!({"status": "Rejected"})),
        (ReserveNow, json!({"status": "Faulted"})),
        (Reset, json!({"status": "Scheduled"})),
        (SendLocalList, json!({"status": "Failed"})),
        (SetChargingProfile, json!({"status": "Rejected"})),
        (SetVariables, json!({"setVariableResult": [set_result]})),
        (StatusNotification, json!({})),
        (TriggerMessage, json!({"status": "Accepted"})),
        (UnlockConnector, json!({"status": "UnknownConnector"})),
    ]
}

/// The sample with one top-level key removed, for every key
fn without_each_key(sample: &Value) -> Vec<(String, Value)> {
    let map = sample.as_object().cloned().unwrap_or_default();
    map.keys()
        .map(|key| {
            let mut reduced = map.clone();
            reduced.remove(key);
            (key.clone(), Value::Object(reduced))
        })
        .collect()
}

fn without_child(element: &XmlElement, name: &str) -> XmlElement {
    let mut reduced = element.clone();
    reduced.children.retain(|child| child.name != name);
    reduced
}

fn assert_missing(action: &str, key: &str, result: Result<(), ParseError>) {
    match result {
        Err(ParseError::MissingField(field)) => assert_eq!(field, key, "{} without {}", action, key),
        Err(other) => panic!("{} without {}: expected a missing field, got {}", action, key, other),
        Ok(()) => panic!("{} without {} was accepted", action, key),
    }
}

// ============================================================================
// Coverage
// ============================================================================

#[test]
fn test_samples_cover_every_action() {
    assert_eq!(v16_requests().len(), v1_6::Action::ALL.len());
    assert_eq!(v16_responses().len(), v1_6::Action::ALL.len());
    assert_eq!(v21_requests().len(), v2_1::Action::ALL.len());
    assert_eq!(v21_responses().len(), v2_1::Action::ALL.len());

    for (index, (action, _)) in v16_requests().iter().enumerate() {
        assert_eq!(*action, v1_6::Action::ALL[index]);
        assert_eq!(v16_responses()[index].0, *action);
    }
    for (index, (action, _)) in v21_requests().iter().enumerate() {
        assert_eq!(*action, v2_1::Action::ALL[index]);
        assert_eq!(v21_responses()[index].0, *action);
    }
}

// ============================================================================
// OCPP 1.6
// ============================================================================

#[test]
fn test_v16_requests_roundtrip_both_codecs() {
    for (action, sample) in v16_requests() {
        let request = v1_6::Request::try_from_json(action, &sample)
            .unwrap_or_else(|e| panic!("{} request: {}", action, e));
        assert_eq!(request.action(), action);

        let json = request.to_json();
        assert!(json.is_object(), "{} request JSON is {}", action, json);
        assert_eq!(v1_6::Request::try_from_json(action, &json).unwrap(), request);

        let xml = request.to_xml();
        assert_eq!(v1_6::Request::try_from_xml(&xml).unwrap(), request, "{} request XML", action);
        let text = format!("{:#}", xml);
        assert_eq!(v1_6::Request::try_from_xml(&XmlElement::parse(&text).unwrap()).unwrap(), request);
    }
}

#[test]
fn test_v16_responses_roundtrip_both_codecs() {
    for (action, sample) in v16_responses() {
        let response = v1_6::Response::try_from_json(action, &sample)
            .unwrap_or_else(|e| panic!("{} response: {}", action, e));
        assert_eq!(response.action(), action);

        let json = response.to_json();
        assert!(json.is_object(), "{} response JSON is {}", action, json);
        assert_eq!(v1_6::Response::try_from_json(action, &json).unwrap(), response);

        let xml = response.to_xml();
        assert_eq!(v1_6::Response::try_from_xml(&xml).unwrap(), response, "{} response XML", action);
    }
}

#[test]
fn test_v16_missing_json_fields_rejected() {
    for (action, sample) in v16_requests() {
        for (key, reduced) in without_each_key(&sample) {
            let result = v1_6::Request::try_from_json(action, &reduced).map(|_| ());
            assert_missing(action.as_str(), &key, result);
        }
    }
    for (action, sample) in v16_responses() {
        for (key, reduced) in without_each_key(&sample) {
            let result = v1_6::Response::try_from_json(action, &reduced).map(|_| ());
            assert_missing(action.as_str(), &key, result);
        }
    }
}

#[test]
fn test_v16_missing_xml_children_rejected() {
    for (action, sample) in v16_requests() {
        let xml = v1_6::Request::try_from_json(action, &sample).unwrap().to_xml();
        for child in &xml.children {
            let reduced = without_child(&xml, &child.name);
            assert!(
                v1_6::Request::try_from_xml(&reduced).is_err(),
                "{} request XML without <{}> was accepted",
                action,
                child.name
            );
        }
    }
    for (action, sample) in v16_responses() {
        let xml = v1_6::Response::try_from_json(action, &sample).unwrap().to_xml();
        for child in &xml.children {
            let reduced = without_child(&xml, &child.name);
            assert!(
                v1_6::Response::try_from_xml(&reduced).is_err(),
                "{} response XML without <{}> was accepted",
                action,
                child.name
            );
        }
    }
}

#[test]
fn test_v16_payload_of_other_action_rejected() {
    let reset = json!({"type": "Soft"});
    assert!(v1_6::Request::try_from_json(v1_6::Action::UnlockConnector, &reset).is_err());

    let xml = v1_6::Request::try_from_json(v1_6::Action::Reset, &reset).unwrap().to_xml();
    assert!(v1_6::Response::try_from_xml(&xml).is_err());
}

// ============================================================================
// OCPP 2.1
// ============================================================================

#[test]
fn test_v21_requests_roundtrip_json() {
    for (action, sample) in v21_requests() {
        let request = v2_1::Request::try_from_json(action, &sample)
            .unwrap_or_else(|e| panic!("{} request: {}", action, e));
        assert_eq!(request.action(), action);

        let json = request.to_json();
        assert!(json.is_object(), "{} request JSON is {}", action, json);
        assert_eq!(v2_1::Request::try_from_json(action, &json).unwrap(), request);
        assert!(request.to_json_ld()["@context"].as_str().is_some_and(|c| c.contains("/v2.1/")));
    }
}

#[test]
fn test_v21_responses_roundtrip_json() {
    for (action, sample) in v21_responses() {
        let response = v2_1::Response::try_from_json(action, &sample)
            .unwrap_or_else(|e| panic!("{} response: {}", action, e));
        assert_eq!(response.action(), action);

        let json = response.to_json();
        assert!(json.is_object(), "{} response JSON is {}", action, json);
        assert_eq!(v2_1::Response::try_from_json(action, &json).unwrap(), response);
    }
}

#[test]
fn test_v21_missing_json_fields_rejected() {
    for (action, sample) in v21_requests() {
        for (key, reduced) in without_each_key(&sample) {
            let result = v2_1::Request::try_from_json(action, &reduced).map(|_| ());
            assert_missing(action.as_str(), &key, result);
        }
    }
    for (action, sample) in v21_responses() {
        for (key, reduced) in without_each_key(&sample) {
            let result = v2_1::Response::try_from_json(action, &reduced).map(|_| ());
            assert_missing(action.as_str(), &key, result);
        }
    }
}

#[test]
fn test_v21_wrong_type_rejected() {
    let err = v2_1::Request::try_from_json(v2_1::Action::Reset, &json!({"type": 1})).unwrap_err();
    assert!(matches!(err, ParseError::Json(_)));
    assert!(!err.to_string().is_empty());

    let err = v2_1::Response::try_from_json(v2_1::Action::Heartbeat, &json!([])).unwrap_err();
    assert!(matches!(err, ParseError::Json(_)));
}
