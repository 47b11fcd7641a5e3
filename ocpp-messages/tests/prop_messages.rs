//! Property tests for the message codecs
//!
//! For generated, valid messages:
//! - JSON and XML both reproduce an equal value
//! - equal values hash equally, and a changed field breaks equality

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, TimeZone, Utc};
use ocpp_messages::common::{Decimal, OcppMessage};
use ocpp_messages::v1_6;
use ocpp_messages::v2_1;
use ocpp_messages::xml::XmlMessage;
use proptest::prelude::*;

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

// ============================================================================
// Strategies
// ============================================================================

/// Whole seconds between 2020 and 2033
fn timestamp() -> impl Strategy<Value = DateTime<Utc>> {
    (1_577_836_800i64..2_000_000_000i64).prop_map(|secs| Utc.timestamp_opt(secs, 0).unwrap())
}

/// Token text, leading and trailing blanks included
fn token(max: usize) -> impl Strategy<Value = String> {
    proptest::string::string_regex(&format!("[A-Za-z0-9 ][A-Za-z0-9 <>&*._-]{{0,{}}}", max - 1)).unwrap()
}

fn limit() -> impl Strategy<Value = Decimal> {
    (0u32..500_000).prop_map(|tenths| Decimal::new(f64::from(tenths) / 10.0).unwrap())
}

fn v16_id_tag_info() -> impl Strategy<Value = v1_6::IdTagInfo> {
    (
        prop::sample::select(v1_6::AuthorizationStatus::ALL),
        prop::option::of(timestamp()),
        prop::option::of(token(20)),
    )
        .prop_map(|(status, expiry, parent)| {
            let mut info = v1_6::IdTagInfo::new(status);
            info.expiry_date = expiry;
            info.parent_id_tag = parent.map(|p| p.parse().unwrap());
            info
        })
}

fn v16_send_local_list() -> impl Strategy<Value = v1_6::SendLocalListRequest> {
    (
        0i32..10_000,
        prop::collection::btree_set(token(20), 0..6),
        prop::collection::vec(v16_id_tag_info(), 6),
    )
        .prop_map(|(version, tags, infos)| {
            // BTreeSet keeps the tags unique; a Full update carries every info
            let mut seen = std::collections::HashSet::new();
            let entries = tags
                .into_iter()
                .filter(|tag| seen.insert(tag.to_ascii_lowercase()))
                .zip(infos)
                .map(|(tag, info)| v1_6::AuthorizationData {
                    id_tag: tag.parse().unwrap(),
                    id_tag_info: Some(info),
                })
                .collect();
            v1_6::SendLocalListRequest::new(version, v1_6::UpdateType::Full, entries).unwrap()
        })
}

fn v16_sampled_value() -> impl Strategy<Value = v1_6::SampledValue> {
    (
        (0u32..1_000_000).prop_map(|v| v.to_string()),
        prop::option::of(prop::sample::select(v1_6::Measurand::ALL)),
        prop::option::of(prop::sample::select(v1_6::Phase::ALL)),
        prop::option::of(prop::sample::select(v1_6::UnitOfMeasure::ALL)),
    )
        .prop_map(|(value, measurand, phase, unit)| {
            let mut sample = v1_6::SampledValue::new(value);
            sample.measurand = measurand;
            sample.phase = phase;
            sample.unit = unit;
            sample
        })
}

fn v16_meter_values() -> impl Strategy<Value = v1_6::MeterValuesRequest> {
    (
        0u32..8,
        prop::option::of(1i32..100_000),
        prop::collection::vec(
            (timestamp(), prop::collection::vec(v16_sampled_value(), 1..4)),
            1..4,
        ),
    )
        .prop_map(|(connector, transaction, readings)| {
            let values = readings
                .into_iter()
                .map(|(timestamp, sampled_value)| v1_6::MeterValue::new(timestamp, sampled_value).unwrap())
                .collect();
            let mut request = v1_6::MeterValuesRequest::new(connector, values).unwrap();
            request.transaction_id = transaction;
            request
        })
}

/// Strictly increasing start periods beginning at 0
fn start_periods() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(1u32..3600, 0..5).prop_map(|gaps| {
        let mut start = 0;
        let mut periods = vec![0];
        for gap in gaps {
            start += gap;
            periods.push(start);
        }
        periods
    })
}

fn v16_set_charging_profile() -> impl Strategy<Value = v1_6::SetChargingProfileRequest> {
    (
        1u32..8,
        1i32..1000,
        0u32..10,
        start_periods(),
        prop::collection::vec(limit(), 6),
        prop::sample::select(v1_6::ChargingRateUnit::ALL),
    )
        .prop_map(|(connector, id, stack, starts, limits, unit)| {
            let periods = starts
                .into_iter()
                .zip(limits)
                .map(|(start, limit)| v1_6::ChargingSchedulePeriod::new(start, limit).unwrap())
                .collect();
            let schedule = v1_6::ChargingSchedule::new(unit, periods).unwrap();
            let profile = v1_6::ChargingProfile::new(
                id,
                stack,
                v1_6::ChargingProfilePurpose::TxDefaultProfile,
                v1_6::ChargingProfileKind::Absolute,
                schedule,
            )
            .unwrap();
            v1_6::SetChargingProfileRequest::new(connector, profile).unwrap()
        })
}

fn v21_set_variables() -> impl Strategy<Value = v2_1::SetVariablesRequest> {
    prop::collection::vec(
        (
            token(50),
            prop::option::of(token(50)),
            token(50),
            token(1000),
            prop::option::of(prop::sample::select(v2_1::Attribute::ALL)),
            prop::option::of(1u32..4),
        ),
        1..5,
    )
    .prop_map(|entries| {
        let data = entries
            .into_iter()
            .map(|(component, instance, variable, value, attribute, evse)| {
                let mut component = v2_1::Component::new(component.parse().unwrap());
                component.instance = instance.map(|i| i.parse().unwrap());
                component.evse = evse.map(v2_1::Evse::new);
                let variable = v2_1::Variable::new(variable.parse().unwrap());
                let mut data = v2_1::SetVariableData::new(component, variable, value.parse().unwrap());
                data.attribute_type = attribute;
                data
            })
            .collect();
        v2_1::SetVariablesRequest::new(data).unwrap()
    })
}

// ============================================================================
// Codec Properties
// ============================================================================

proptest! {
    #[test]
    fn send_local_list_survives_both_codecs(request in v16_send_local_list()) {
        let json = request.to_json();
        prop_assert_eq!(&v1_6::SendLocalListRequest::try_from_json(&json).unwrap(), &request);

        let xml = request.to_xml();
        prop_assert_eq!(&v1_6::SendLocalListRequest::try_from_xml(&xml).unwrap(), &request);

        // Through the document text as well, escaping included
        let text = xml.to_string();
        prop_assert_eq!(&v1_6::SendLocalListRequest::try_from_xml_str(&text).unwrap(), &request);
    }

    #[test]
    fn padded_data_transfer_survives_xml(vendor in token(255), data in token(200)) {
        let mut request = v1_6::DataTransferRequest::new(vendor.parse().unwrap()).unwrap();
        request.data = Some(format!("  {}  ", data));

        let text = format!("{:#}", request.to_xml());
        let parsed = v1_6::DataTransferRequest::try_from_xml_str(&text).unwrap();
        prop_assert_eq!(&parsed.data, &request.data);
        prop_assert_eq!(&parsed, &request);
    }

    #[test]
    fn meter_values_survive_both_codecs(request in v16_meter_values()) {
        let parsed = v1_6::MeterValuesRequest::try_from_json(&request.to_json()).unwrap();
        prop_assert_eq!(&parsed, &request);
        prop_assert_eq!(hash_of(&parsed), hash_of(&request));

        let from_xml = v1_6::MeterValuesRequest::try_from_xml(&request.to_xml()).unwrap();
        prop_assert_eq!(&from_xml, &request);
    }

    #[test]
    fn set_charging_profile_survives_both_codecs(request in v16_set_charging_profile()) {
        let from_json = v1_6::SetChargingProfileRequest::try_from_json(&request.to_json()).unwrap();
        prop_assert_eq!(&from_json, &request);

        let text = format!("{:#}", request.to_xml());
        let from_xml = v1_6::SetChargingProfileRequest::try_from_xml_str(&text).unwrap();
        prop_assert_eq!(&from_xml, &request);
    }

    #[test]
    fn set_variables_survive_json(request in v21_set_variables()) {
        let parsed = v2_1::SetVariablesRequest::try_from_json(&request.to_json()).unwrap();
        prop_assert_eq!(&parsed, &request);
        prop_assert_eq!(hash_of(&parsed), hash_of(&request));

        let text = request.to_json().to_string();
        prop_assert_eq!(&v2_1::SetVariablesRequest::try_from_json_str(&text).unwrap(), &request);
    }
}

// ============================================================================
// Equality Properties
// ============================================================================

proptest! {
    #[test]
    fn changed_connector_breaks_equality(request in v16_meter_values()) {
        let mut other = request.clone();
        other.connector_id += 1;
        prop_assert_ne!(&other, &request);
        prop_assert_eq!(hash_of(&request.clone()), hash_of(&request));
    }

    #[test]
    fn changed_limit_breaks_equality(request in v16_set_charging_profile(), bump in 1u32..100) {
        let mut other = request.clone();
        let period = &mut other.cs_charging_profiles.charging_schedule.charging_schedule_period[0];
        period.limit = Decimal::new(period.limit.value() + f64::from(bump)).unwrap();
        prop_assert_ne!(&other, &request);
    }

    #[test]
    fn extra_variable_breaks_equality(request in v21_set_variables()) {
        let mut other = request.clone();
        let first = other.set_variable_data[0].clone();
        other.set_variable_data.push(first);
        prop_assert_ne!(other, request);
    }
}
