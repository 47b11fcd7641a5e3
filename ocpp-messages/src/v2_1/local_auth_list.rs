//! Local authorization list management

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::types::*;
use crate::common::Validate;
use crate::error::ValidationError;

// ============================================================================
// GetLocalListVersion
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetLocalListVersionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl GetLocalListVersionRequest {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetLocalListVersionResponse {
    /// 0 when no list is installed
    pub version_number: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl GetLocalListVersionResponse {
    pub fn new(version_number: i32) -> Self {
        Self {
            version_number,
            custom_data: None,
        }
    }
}

impl fmt::Display for GetLocalListVersionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("GetLocalListVersion")
    }
}

impl fmt::Display for GetLocalListVersionResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GetLocalListVersion -> {}", self.version_number)
    }
}

message_pair!(V2_1, "GetLocalListVersion", GetLocalListVersionRequest => GetLocalListVersionResponse);

// ============================================================================
// SendLocalList
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendLocalListRequest {
    pub version_number: i32,
    pub update_type: UpdateType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub local_authorization_list: Vec<AuthorizationData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl SendLocalListRequest {
    pub fn new(version_number: i32, update_type: UpdateType, entries: Vec<AuthorizationData>) -> Result<Self, ValidationError> {
        let message = Self {
            version_number,
            update_type,
            local_authorization_list: entries,
            custom_data: None,
        };
        message.validate()?;
        Ok(message)
    }
}

impl Validate for SendLocalListRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut seen = HashSet::new();
        for (index, entry) in self.local_authorization_list.iter().enumerate() {
            let field = format!("localAuthorizationList[{}]", index);
            entry.validate().map_err(|e| e.within(&field))?;
            let key = (entry.id_token.token_type, entry.id_token.id_token.to_ascii_lowercase());
            if !seen.insert(key) {
                return Err(ValidationError::new(
                    format!("{}.idToken", field),
                    format!("duplicate idToken '{}'", entry.id_token),
                ));
            }
            if self.update_type == UpdateType::Full && entry.id_token_info.is_none() {
                return Err(ValidationError::new(
                    format!("{}.idTokenInfo", field),
                    "required in a Full update",
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendLocalListResponse {
    pub status: SendLocalListStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_info: Option<StatusInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl SendLocalListResponse {
    pub fn new(status: SendLocalListStatus) -> Self {
        Self {
            status,
            status_info: None,
            custom_data: None,
        }
    }
}

impl fmt::Display for SendLocalListRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SendLocalList ({} v{}, {} entries)",
            self.update_type,
            self.version_number,
            self.local_authorization_list.len()
        )
    }
}

impl fmt::Display for SendLocalListResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SendLocalList -> {}", self.status)
    }
}

message_pair!(V2_1, "SendLocalList", SendLocalListRequest => SendLocalListResponse);

unconstrained!(GetLocalListVersionRequest, GetLocalListVersionResponse, SendLocalListResponse);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::OcppMessage;
    use crate::error::ParseError;
    use serde_json::json;

    fn entry(token: &str, status: Option<AuthorizationStatus>) -> AuthorizationData {
        AuthorizationData {
            id_token: IdToken::new(token.parse().unwrap(), IdTokenKind::Iso14443),
            id_token_info: status.map(IdTokenInfo::new),
            custom_data: None,
        }
    }

    #[test]
    fn test_full_update_needs_token_info() {
        let entries = vec![entry("AA01", Some(AuthorizationStatus::Accepted)), entry("AA02", None)];
        let err = SendLocalListRequest::new(3, UpdateType::Full, entries.clone()).unwrap_err();
        assert_eq!(err.field, "localAuthorizationList[1].idTokenInfo");

        assert!(SendLocalListRequest::new(3, UpdateType::Differential, entries).is_ok());
    }

    #[test]
    fn test_duplicate_tokens_rejected() {
        let json = json!({
            "versionNumber": 4,
            "updateType": "Differential",
            "localAuthorizationList": [
                {"idToken": {"idToken": "aa01", "type": "ISO14443"}},
                {"idToken": {"idToken": "AA01", "type": "ISO14443"}}
            ]
        });
        let err = SendLocalListRequest::try_from_json(&json).unwrap_err();
        assert!(matches!(err, ParseError::Validation(ref v) if v.field == "localAuthorizationList[1].idToken"));
    }

    #[test]
    fn test_same_value_different_kind_allowed() {
        let mut other = entry("AA01", None);
        other.id_token.token_type = IdTokenKind::KeyCode;
        assert!(SendLocalListRequest::new(1, UpdateType::Differential, vec![entry("AA01", None), other]).is_ok());

        let err = SendLocalListRequest::new(1, UpdateType::Differential, vec![entry("AA01", None), entry("aa01", None)])
            .unwrap_err();
        assert_eq!(err.field, "localAuthorizationList[1].idToken");
    }

    #[test]
    fn test_list_version_response() {
        let response = GetLocalListVersionResponse::from_json(&json!({"versionNumber": 12}));
        assert_eq!(response.to_string(), "GetLocalListVersion -> 12");
        assert!(matches!(
            GetLocalListVersionResponse::try_from_json(&json!({})),
            Err(ParseError::MissingField(ref f)) if f == "versionNumber"
        ));
    }
}
