//! Meter values outside of transactions

use std::fmt;

use serde::{Deserialize, Serialize};

use super::types::*;
use crate::common::Validate;
use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeterValuesRequest {
    /// 0 is the main energy meter of the station
    pub evse_id: u32,
    pub meter_value: Vec<MeterValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl MeterValuesRequest {
    pub fn new(evse_id: u32, meter_value: Vec<MeterValue>) -> Result<Self, ValidationError> {
        let message = Self {
            evse_id,
            meter_value,
            custom_data: None,
        };
        message.validate()?;
        Ok(message)
    }
}

impl Validate for MeterValuesRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        non_empty("meterValue", &self.meter_value)?;
        validate_each("meterValue", &self.meter_value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeterValuesResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl MeterValuesResponse {
    pub fn new() -> Self {
        Self::default()
    }
}

impl fmt::Display for MeterValuesRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let samples: usize = self.meter_value.iter().map(|v| v.sampled_value.len()).sum();
        write!(
            f,
            "MeterValues (evse {}, {} readings, {} samples)",
            self.evse_id,
            self.meter_value.len(),
            samples
        )
    }
}

impl fmt::Display for MeterValuesResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MeterValues -> ok")
    }
}

message_pair!(V2_1, "MeterValues", MeterValuesRequest => MeterValuesResponse);

unconstrained!(MeterValuesResponse);
