//! SOAP 1.2 binding for OCPP 1.6 (OCPP-S)
//!
//! ```text
//! <Envelope xmlns="http://www.w3.org/2003/05/soap-envelope">
//!   <Header>
//!     <chargeBoxIdentity xmlns="urn://Ocpp/Cs/2015/10/">CP-001</chargeBoxIdentity>
//!     <Action xmlns="http://www.w3.org/2005/08/addressing">/Heartbeat</Action>
//!     <MessageID xmlns="...">uuid</MessageID>
//!     <RelatesTo xmlns="...">uuid</RelatesTo>        (responses)
//!     <From><Address>..</Address></From>            (optional)
//!     <ReplyTo><Address>..</Address></ReplyTo>      (optional)
//!     <To>..</To>                                   (optional)
//!   </Header>
//!   <Body><heartbeatRequest xmlns="urn://Ocpp/Cs/2015/10/"/></Body>
//! </Envelope>
//! ```
//!
//! The body is the message's own XML form; the WS-Addressing `Action` is
//! `/{Action}` for requests and `/{Action}Response` for responses.
//!
//! `MessageID` and `RelatesTo` carry UUID request ids as `urn:uuid:` URIs.
//! The prefix is stripped when reading, so the ids match their OCPP-J form.

use tracing::debug;
use uuid::Uuid;

use crate::common::{Envelope, MessageKind, OcppMessage, OcppRequest, OcppResponse, RequestId};
use crate::config::CodecConfig;
use crate::error::ParseError;
use crate::xml::{XmlElement, XmlMessage};

/// SOAP 1.2 envelope namespace
pub const SOAP_NAMESPACE: &str = "http://www.w3.org/2003/05/soap-envelope";

/// WS-Addressing namespace
pub const ADDRESSING_NAMESPACE: &str = "http://www.w3.org/2005/08/addressing";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

const UUID_URN_PREFIX: &str = "urn:uuid:";

/// Request id as a WS-Addressing message id URI
fn addressing_uri(id: &RequestId) -> String {
    match Uuid::parse_str(id.as_str()) {
        Ok(_) => format!("{}{}", UUID_URN_PREFIX, id.as_str()),
        Err(_) => id.as_str().to_string(),
    }
}

fn addressing_id(field: &str, text: &str) -> Result<RequestId, ParseError> {
    let text = text.trim();
    let id = text.strip_prefix(UUID_URN_PREFIX).unwrap_or(text);
    RequestId::parse(id).map_err(|e| match e {
        ParseError::MissingField(_) => ParseError::MissingField(field.to_string()),
        ParseError::InvalidField { reason, .. } => ParseError::invalid(field, reason),
        other => other,
    })
}

/// OCPP SOAP header
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SoapHeader {
    pub charge_box_identity: String,
    /// WS-Addressing action, e.g. `/Reset` or `/ResetResponse`
    pub action: String,
    pub message_id: RequestId,
    pub relates_to: Option<RequestId>,
    pub from: Option<String>,
    pub reply_to: Option<String>,
    pub to: Option<String>,
}

impl SoapHeader {
    pub fn new(charge_box_identity: impl Into<String>, action: impl Into<String>, message_id: RequestId) -> Self {
        Self {
            charge_box_identity: charge_box_identity.into(),
            action: action.into(),
            message_id,
            relates_to: None,
            from: None,
            reply_to: None,
            to: None,
        }
    }

    fn write_xml(&self, service_namespace: &str) -> XmlElement {
        let addressed = |name: &str, text: &str| {
            XmlElement::text_element(name, text).in_namespace(ADDRESSING_NAMESPACE)
        };
        let endpoint = |name: &str, address: &str| {
            XmlElement::new(name)
                .in_namespace(ADDRESSING_NAMESPACE)
                .with_child(addressed("Address", address))
        };

        let mut header = XmlElement::new("Header")
            .with_child(
                XmlElement::text_element("chargeBoxIdentity", self.charge_box_identity.as_str())
                    .in_namespace(service_namespace),
            )
            .with_child(addressed("Action", &self.action))
            .with_child(addressed("MessageID", &addressing_uri(&self.message_id)));

        if let Some(relates_to) = &self.relates_to {
            header.push(addressed("RelatesTo", &addressing_uri(relates_to)));
        }
        if let Some(from) = &self.from {
            header.push(endpoint("From", from));
        }
        if let Some(reply_to) = &self.reply_to {
            header.push(endpoint("ReplyTo", reply_to));
        }
        if let Some(to) = &self.to {
            header.push(addressed("To", to));
        }
        header
    }

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError> {
        let address = |name: &str| {
            element.child(name).map(|endpoint| match endpoint.child("Address") {
                Some(address) => address.text.clone(),
                None => endpoint.text.clone(),
            })
        };
        let relates_to = element
            .text_of("RelatesTo")
            .map(|text| addressing_id("RelatesTo", text))
            .transpose()?;

        Ok(Self {
            charge_box_identity: element.parse_child("chargeBoxIdentity")?,
            action: element.parse_child("Action")?,
            message_id: addressing_id("MessageID", &element.required_child("MessageID")?.text)?,
            relates_to,
            from: address("From"),
            reply_to: address("ReplyTo"),
            to: element.text_of("To").map(str::to_string),
        })
    }
}

/// WS-Addressing action of a message type
pub fn soap_action<T: OcppMessage>() -> String {
    match T::KIND {
        MessageKind::Request => format!("/{}", T::ACTION),
        MessageKind::Response => format!("/{}Response", T::ACTION),
    }
}

/// A SOAP envelope carrying one OCPP 1.6 message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapMessage {
    pub header: SoapHeader,
    pub body: XmlElement,
}

impl SoapMessage {
    /// Wrap a request; its request id becomes the `MessageID`
    pub fn request<T>(charge_box_identity: impl Into<String>, envelope: &Envelope<T>) -> Self
    where
        T: XmlMessage + OcppRequest,
    {
        Self {
            header: SoapHeader::new(charge_box_identity, soap_action::<T>(), envelope.request_id.clone()),
            body: envelope.payload.to_xml(),
        }
    }

    /// Wrap a response; `RelatesTo` carries the id of the request it answers
    pub fn response<T>(charge_box_identity: impl Into<String>, envelope: &Envelope<T>) -> Self
    where
        T: XmlMessage + OcppResponse,
    {
        let mut header = SoapHeader::new(charge_box_identity, soap_action::<T>(), RequestId::new());
        header.relates_to = Some(envelope.request_id.clone());
        Self {
            header,
            body: envelope.payload.to_xml(),
        }
    }

    pub fn with_from(mut self, address: impl Into<String>) -> Self {
        self.header.from = Some(address.into());
        self
    }

    pub fn with_reply_to(mut self, address: impl Into<String>) -> Self {
        self.header.reply_to = Some(address.into());
        self
    }

    pub fn with_to(mut self, address: impl Into<String>) -> Self {
        self.header.to = Some(address.into());
        self
    }

    /// OCPP action name without the WS-Addressing decoration
    pub fn action(&self) -> &str {
        let action = self.header.action.trim_start_matches('/');
        if self.header.relates_to.is_some() {
            return action.strip_suffix("Response").unwrap_or(action);
        }
        action
    }

    pub fn to_xml(&self) -> XmlElement {
        let namespace = self.body.namespace.as_deref().unwrap_or_default();
        XmlElement::new("Envelope")
            .in_namespace(SOAP_NAMESPACE)
            .with_child(self.header.write_xml(namespace))
            .with_child(XmlElement::new("Body").with_child(self.body.clone()))
    }

    /// Full document text, with the declaration when configured
    pub fn to_document(&self, config: &CodecConfig) -> String {
        let rendered = config.render_xml(&self.to_xml());
        if !config.xml_declaration {
            return rendered;
        }
        let separator = if config.pretty { "\n" } else { "" };
        format!("{}{}{}", XML_DECLARATION, separator, rendered)
    }

    pub fn from_xml(envelope: &XmlElement) -> Result<Self, ParseError> {
        if envelope.name != "Envelope" {
            return Err(ParseError::UnexpectedElement {
                expected: "Envelope".to_string(),
                found: envelope.name.clone(),
            });
        }
        let namespace = envelope.namespace.as_deref().unwrap_or_default();
        if namespace != SOAP_NAMESPACE {
            return Err(ParseError::UnexpectedNamespace {
                element: envelope.name.clone(),
                expected: SOAP_NAMESPACE.to_string(),
                found: namespace.to_string(),
            });
        }

        let header = SoapHeader::read_xml(envelope.required_child("Header")?)?;
        let body = envelope
            .required_child("Body")?
            .children
            .first()
            .cloned()
            .ok_or_else(|| ParseError::MissingField("Body".to_string()))?;

        debug!("SOAP {} from {}", header.action, header.charge_box_identity);
        Ok(Self { header, body })
    }

    pub fn parse(document: &str) -> Result<Self, ParseError> {
        Self::from_xml(&XmlElement::parse(document)?)
    }

    /// Parse the body as `T`, checking the WS-Addressing action first
    pub fn body<T: XmlMessage>(&self) -> Result<T, ParseError> {
        let expected = soap_action::<T>();
        if self.header.action != expected {
            return Err(ParseError::ActionMismatch {
                expected,
                found: self.header.action.clone(),
            });
        }
        T::try_from_xml(&self.body)
    }

    /// Convert into an envelope; responses take their id from `RelatesTo`
    pub fn into_envelope<T: XmlMessage>(&self) -> Result<Envelope<T>, ParseError> {
        let payload = self.body::<T>()?;
        let request_id = match (T::KIND, &self.header.relates_to) {
            (MessageKind::Response, Some(relates_to)) => relates_to.clone(),
            (MessageKind::Response, None) => return Err(ParseError::MissingField("RelatesTo".to_string())),
            (MessageKind::Request, _) => self.header.message_id.clone(),
        };
        Ok(Envelope::new(payload).with_request_id(request_id))
    }
}
