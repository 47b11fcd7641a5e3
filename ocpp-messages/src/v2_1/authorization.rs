//! Authorization and the authorization cache

use std::fmt;

use serde::{Deserialize, Serialize};

use super::types::*;
use crate::common::{CiString, Validate};
use crate::error::ValidationError;

wire_enum! {
    /// Result of checking the contract certificate sent with an Authorize
    pub enum AuthorizeCertificateStatus {
        Accepted => "Accepted",
        SignatureError => "SignatureError",
        CertificateExpired => "CertificateExpired",
        CertificateRevoked => "CertificateRevoked",
        NoCertificateAvailable => "NoCertificateAvailable",
        CertChainError => "CertChainError",
        ContractCancelled => "ContractCancelled",
    }
}

/// PEM encoded X.509 certificate chain
pub type CertificateChain = CiString<10000>;

// ============================================================================
// Authorize
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizeRequest {
    pub id_token: IdToken,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<CertificateChain>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl AuthorizeRequest {
    pub fn new(id_token: IdToken) -> Self {
        Self {
            id_token,
            certificate: None,
            custom_data: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizeResponse {
    pub id_token_info: IdTokenInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_status: Option<AuthorizeCertificateStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl AuthorizeResponse {
    pub fn new(id_token_info: IdTokenInfo) -> Result<Self, ValidationError> {
        let message = Self {
            id_token_info,
            certificate_status: None,
            custom_data: None,
        };
        message.validate()?;
        Ok(message)
    }
}

impl Validate for AuthorizeResponse {
    fn validate(&self) -> Result<(), ValidationError> {
        self.id_token_info.validate().map_err(|e| e.within("idTokenInfo"))
    }
}

impl fmt::Display for AuthorizeRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Authorize ({})", self.id_token)
    }
}

impl fmt::Display for AuthorizeResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Authorize -> {}", self.id_token_info.status)
    }
}

message_pair!(V2_1, "Authorize", AuthorizeRequest => AuthorizeResponse);

// ============================================================================
// ClearCache
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearCacheRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl ClearCacheRequest {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearCacheResponse {
    pub status: ClearCacheStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_info: Option<StatusInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl ClearCacheResponse {
    pub fn new(status: ClearCacheStatus) -> Self {
        Self {
            status,
            status_info: None,
            custom_data: None,
        }
    }
}

impl fmt::Display for ClearCacheRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClearCache")
    }
}

impl fmt::Display for ClearCacheResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClearCache -> {}", self.status)
    }
}

message_pair!(V2_1, "ClearCache", ClearCacheRequest => ClearCacheResponse);

unconstrained!(AuthorizeRequest, ClearCacheRequest, ClearCacheResponse);
