//! Smart charging: installing and clearing charging profiles

use std::fmt;

use serde::{Deserialize, Serialize};

use super::types::*;
use crate::common::Validate;
use crate::error::ValidationError;

// ============================================================================
// SetChargingProfile
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetChargingProfileRequest {
    /// 0 targets the charging station as a whole
    pub evse_id: u32,
    pub charging_profile: ChargingProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl SetChargingProfileRequest {
    pub fn new(evse_id: u32, charging_profile: ChargingProfile) -> Result<Self, ValidationError> {
        let message = Self {
            evse_id,
            charging_profile,
            custom_data: None,
        };
        message.validate()?;
        Ok(message)
    }
}

impl Validate for SetChargingProfileRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        let purpose = self.charging_profile.charging_profile_purpose;
        match purpose {
            ChargingProfilePurpose::ChargingStationMaxProfile
            | ChargingProfilePurpose::ChargingStationExternalConstraints
                if self.evse_id != 0 =>
            {
                return Err(ValidationError::new(
                    "evseId",
                    format!("{} is only allowed on evse 0", purpose),
                ));
            }
            ChargingProfilePurpose::TxProfile if self.evse_id == 0 => {
                return Err(ValidationError::new("evseId", "TxProfile needs an evse greater than 0"));
            }
            _ => {}
        }
        self.charging_profile
            .validate()
            .map_err(|e| e.within("chargingProfile"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetChargingProfileResponse {
    pub status: ChargingProfileStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_info: Option<StatusInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl SetChargingProfileResponse {
    pub fn new(status: ChargingProfileStatus) -> Self {
        Self {
            status,
            status_info: None,
            custom_data: None,
        }
    }
}

impl fmt::Display for SetChargingProfileRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SetChargingProfile (#{} {} on evse {})",
            self.charging_profile.id, self.charging_profile.charging_profile_purpose, self.evse_id
        )
    }
}

impl fmt::Display for SetChargingProfileResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SetChargingProfile -> {}", self.status)
    }
}

message_pair!(V2_1, "SetChargingProfile", SetChargingProfileRequest => SetChargingProfileResponse);

// ============================================================================
// ClearChargingProfile
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearChargingProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charging_profile_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charging_profile_criteria: Option<ClearChargingProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl ClearChargingProfileRequest {
    /// Clear every installed profile
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_id(charging_profile_id: i32) -> Self {
        Self {
            charging_profile_id: Some(charging_profile_id),
            ..Self::default()
        }
    }

    pub fn matching(criteria: ClearChargingProfile) -> Self {
        Self {
            charging_profile_criteria: Some(criteria),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearChargingProfileResponse {
    pub status: ClearChargingProfileStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_info: Option<StatusInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl ClearChargingProfileResponse {
    pub fn new(status: ClearChargingProfileStatus) -> Self {
        Self {
            status,
            status_info: None,
            custom_data: None,
        }
    }
}

impl fmt::Display for ClearChargingProfileRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.charging_profile_id, &self.charging_profile_criteria) {
            (Some(id), _) => write!(f, "ClearChargingProfile (#{})", id),
            (None, Some(_)) => f.write_str("ClearChargingProfile (by criteria)"),
            (None, None) => f.write_str("ClearChargingProfile (all)"),
        }
    }
}

impl fmt::Display for ClearChargingProfileResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClearChargingProfile -> {}", self.status)
    }
}

message_pair!(V2_1, "ClearChargingProfile", ClearChargingProfileRequest => ClearChargingProfileResponse);

unconstrained!(
    SetChargingProfileResponse,
    ClearChargingProfileRequest,
    ClearChargingProfileResponse,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{Decimal, OcppMessage};
    use crate::error::ParseError;
    use serde_json::json;

    fn profile(purpose: ChargingProfilePurpose) -> ChargingProfile {
        let periods = vec![
            ChargingSchedulePeriod::new(0, Decimal::from(11000u32)).unwrap(),
            ChargingSchedulePeriod::new(3600, Decimal::from(7400u32)).unwrap(),
        ];
        let schedule = ChargingSchedule::new(1, ChargingRateUnit::W, periods).unwrap();
        ChargingProfile::new(9, 1, purpose, ChargingProfileKind::Absolute, vec![schedule]).unwrap()
    }

    #[test]
    fn test_station_profiles_only_on_evse_zero() {
        let max = profile(ChargingProfilePurpose::ChargingStationMaxProfile);
        assert!(SetChargingProfileRequest::new(0, max.clone()).is_ok());
        assert_eq!(SetChargingProfileRequest::new(2, max).unwrap_err().field, "evseId");

        let tx = profile(ChargingProfilePurpose::TxProfile);
        assert!(SetChargingProfileRequest::new(0, tx.clone()).is_err());
        assert!(SetChargingProfileRequest::new(1, tx).is_ok());
    }

    #[test]
    fn test_nested_schedule_errors_carry_path() {
        let json = json!({
            "evseId": 1,
            "chargingProfile": {
                "id": 1,
                "stackLevel": 0,
                "chargingProfilePurpose": "TxDefaultProfile",
                "chargingProfileKind": "Dynamic",
                "chargingSchedule": [{
                    "id": 1,
                    "chargingRateUnit": "A",
                    "chargingSchedulePeriod": [{"startPeriod": 0, "limit": -1}]
                }]
            }
        });
        let err = SetChargingProfileRequest::try_from_json(&json).unwrap_err();
        assert!(matches!(
            err,
            ParseError::Validation(ref v)
                if v.field == "chargingProfile.chargingSchedule[0].chargingSchedulePeriod[0].limit"
        ));
    }

    #[test]
    fn test_set_profile_json_shape() {
        let request = SetChargingProfileRequest::new(1, profile(ChargingProfilePurpose::TxDefaultProfile)).unwrap();
        let json = request.to_json();
        assert_eq!(json["chargingProfile"]["chargingSchedule"][0]["chargingSchedulePeriod"][1]["limit"], 7400.0);
        assert_eq!(SetChargingProfileRequest::from_json(&json), request);
        assert_eq!(request.to_string(), "SetChargingProfile (#9 TxDefaultProfile on evse 1)");
    }

    #[test]
    fn test_clear_charging_profile_forms() {
        assert_eq!(ClearChargingProfileRequest::new().to_json(), json!({}));
        assert_eq!(ClearChargingProfileRequest::by_id(4).to_json(), json!({"chargingProfileId": 4}));

        let criteria = ClearChargingProfile {
            evse_id: Some(0),
            charging_profile_purpose: Some(ChargingProfilePurpose::LocalGeneration),
            ..ClearChargingProfile::default()
        };
        let request = ClearChargingProfileRequest::matching(criteria);
        assert_eq!(
            request.to_json(),
            json!({"chargingProfileCriteria": {"evseId": 0, "chargingProfilePurpose": "LocalGeneration"}})
        );
        assert_eq!(request.to_string(), "ClearChargingProfile (by criteria)");
    }
}
