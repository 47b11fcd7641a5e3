//! Vendor specific data transfer, in either direction

use std::fmt;

use serde::{Deserialize, Serialize};

use super::types::*;
use crate::common::{CiString255, CiString50, Validate};
use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataTransferRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<CiString50>,
    /// Any JSON value, not just strings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<AnyValue>,
    pub vendor_id: CiString255,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl DataTransferRequest {
    pub fn new(vendor_id: CiString255) -> Result<Self, ValidationError> {
        let message = Self {
            message_id: None,
            data: None,
            vendor_id,
            custom_data: None,
        };
        message.validate()?;
        Ok(message)
    }
}

impl Validate for DataTransferRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.vendor_id.is_empty() {
            return Err(ValidationError::new("vendorId", "must not be empty"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataTransferResponse {
    pub status: DataTransferStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_info: Option<StatusInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<AnyValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl DataTransferResponse {
    pub fn new(status: DataTransferStatus) -> Self {
        Self {
            status,
            status_info: None,
            data: None,
            custom_data: None,
        }
    }
}

impl fmt::Display for DataTransferRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message_id {
            Some(id) => write!(f, "DataTransfer ({}/{})", self.vendor_id, id),
            None => write!(f, "DataTransfer ({})", self.vendor_id),
        }
    }
}

impl fmt::Display for DataTransferResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DataTransfer -> {}", self.status)
    }
}

message_pair!(V2_1, "DataTransfer", DataTransferRequest => DataTransferResponse);

unconstrained!(DataTransferResponse);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::OcppMessage;
    use crate::error::ParseError;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn test_structured_data_roundtrip() {
        let json = json!({
            "vendorId": "com.acme",
            "messageId": "SetTariff",
            "data": {"currency": "EUR", "steps": [0.25, 0.31]}
        });
        let request = DataTransferRequest::from_json(&json);
        assert_eq!(request.data.as_ref().unwrap().0["currency"], "EUR");
        assert_eq!(request.to_json(), json);
        assert_eq!(request.to_string(), "DataTransfer (com.acme/SetTariff)");
    }

    #[test]
    fn test_empty_vendor_rejected() {
        let err = DataTransferRequest::try_from_json(&json!({"vendorId": ""})).unwrap_err();
        assert!(matches!(err, ParseError::Validation(ref v) if v.field == "vendorId"));

        assert_eq!(DataTransferRequest::new(CiString255::default()).unwrap_err().field, "vendorId");
        assert!(DataTransferRequest::new("com.acme".parse().unwrap()).is_ok());
    }

    #[test]
    fn test_data_participates_in_hash() {
        let mut a = DataTransferResponse::new(DataTransferStatus::Accepted);
        a.data = Some(json!([1, 2]).into());
        let mut b = a.clone();
        b.data = Some(json!([2, 1]).into());

        let set: HashSet<_> = [a.clone(), a.clone(), b].into_iter().collect();
        assert_eq!(set.len(), 2);
    }
}
