//! # OCPP Messages
//!
//! Message types for OCPP 1.6 and OCPP 2.1, one Rust type per message,
//! each with a JSON codec and (for 1.6) a SOAP/XML codec.
//!
//! ## Layout
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │ v1_6            v2_1                             │
//! │ 28 actions      21 actions                       │
//! │ JSON + XML      JSON                             │
//! ├──────────────────────────────────────────────────┤
//! │ common: OcppMessage / OcppRequest / OcppResponse │
//! │         Envelope, CiString<N>, Decimal           │
//! ├────────────────────────┬─────────────────────────┤
//! │ xml: XmlElement,       │ rpc: CALL / CALLRESULT /│
//! │ XmlCodec, XmlMessage   │ CALLERROR / SEND frames │
//! └────────────────────────┴─────────────────────────┘
//! ```
//!
//! ## Parse convention
//!
//! | Operation | Failure |
//! |-----------|---------|
//! | `try_from_json` / `try_from_xml` | `Err(ParseError)`, never panics |
//! | `from_json` / `from_xml` | panics with the `ParseError` message |
//!
//! ## Usage
//!
//! ```
//! use ocpp_messages::common::OcppMessage;
//! use ocpp_messages::v1_6::{ResetRequest, ResetType};
//! use ocpp_messages::xml::XmlMessage;
//!
//! let reset = ResetRequest::new(ResetType::Hard);
//!
//! let json = reset.to_json();
//! assert_eq!(json["type"], "Hard");
//! assert_eq!(ResetRequest::try_from_json(&json).unwrap(), reset);
//!
//! let xml = reset.to_xml();
//! assert_eq!(xml.name, "resetRequest");
//! assert_eq!(ResetRequest::try_from_xml(&xml).unwrap(), reset);
//! ```

#[macro_use]
mod macros;

pub mod error;
pub mod config;
pub mod common;
pub mod xml;
pub mod rpc;
pub mod v1_6;
pub mod v2_1;

pub use config::CodecConfig;
pub use error::{ParseError, ValidationError};

// Re-export key types
pub use common::{
    Envelope, MessageKind, OcppMessage, OcppRequest, OcppResponse, OcppVersion, RequestId,
    Signature, Validate,
};
pub use rpc::{Call, CallError, CallResult, ErrorCode, Frame};
pub use xml::{XmlCodec, XmlElement, XmlMessage};
