//! Building blocks shared by the OCPP 1.6 and 2.1 catalogs
//!
//! - `message`: `OcppMessage` / `OcppRequest` / `OcppResponse` traits
//! - `envelope`: correlation id, timestamp and signatures around a payload
//! - `strings`: length-bounded `CiString<N>`
//! - `decimal`: hashable finite decimal

pub mod message;
pub mod envelope;
pub mod strings;
pub mod decimal;

pub use message::*;
pub use envelope::{Envelope, RequestId, Signature};
pub use strings::*;
pub use decimal::Decimal;
