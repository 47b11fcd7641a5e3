//! Parse a payload in one representation and render it in another

use std::io::{self, Read};
use std::path::Path;

use clap::ValueEnum;
use ocpp_messages::v1_6::{self, SoapHeader, SoapMessage};
use ocpp_messages::{v2_1, CodecConfig, MessageKind, OcppVersion, ParseError, RequestId, XmlElement};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

/// Protocol version selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Version {
    #[value(name = "1.6")]
    V16,
    #[value(name = "2.1")]
    V21,
}

impl From<Version> for OcppVersion {
    fn from(version: Version) -> Self {
        match version {
            Version::V16 => OcppVersion::V1_6,
            Version::V21 => OcppVersion::V2_1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Kind {
    Request,
    Response,
}

impl From<Kind> for MessageKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Request => MessageKind::Request,
            Kind::Response => MessageKind::Response,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    Json,
    Xml,
    Soap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    JsonLd,
    Xml,
    Soap,
}

/// Conversion errors
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),

    #[error("--action is required for {0} input")]
    MissingAction(&'static str),

    #[error("OCPP {version} has no {format} binding")]
    Unsupported { version: OcppVersion, format: &'static str },
}

/// One conversion job
#[derive(Debug, Clone)]
pub struct Conversion {
    pub version: Version,
    pub kind: Kind,
    /// Needed for JSON input; XML and SOAP carry the action themselves
    pub action: Option<String>,
    pub from: InputFormat,
    pub to: OutputFormat,
    /// Charge box identity written into generated SOAP headers
    pub identity: String,
    /// MessageID (requests) or RelatesTo (responses) of generated SOAP headers
    pub message_id: Option<RequestId>,
    pub config: CodecConfig,
}

/// A parsed message of any version and direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    V16Request(v1_6::Request),
    V16Response(v1_6::Response),
    V21Request(v2_1::Request),
    V21Response(v2_1::Response),
}

impl Message {
    pub fn action(&self) -> &'static str {
        match self {
            Message::V16Request(m) => m.action().as_str(),
            Message::V16Response(m) => m.action().as_str(),
            Message::V21Request(m) => m.action().as_str(),
            Message::V21Response(m) => m.action().as_str(),
        }
    }

    pub fn kind(&self) -> MessageKind {
        match self {
            Message::V16Request(_) | Message::V21Request(_) => MessageKind::Request,
            Message::V16Response(_) | Message::V21Response(_) => MessageKind::Response,
        }
    }

    /// WS-Addressing action: `/{Action}` or `/{Action}Response`
    pub fn soap_action(&self) -> String {
        match self.kind() {
            MessageKind::Request => format!("/{}", self.action()),
            MessageKind::Response => format!("/{}Response", self.action()),
        }
    }

    pub fn version(&self) -> OcppVersion {
        match self {
            Message::V16Request(_) | Message::V16Response(_) => OcppVersion::V1_6,
            Message::V21Request(_) | Message::V21Response(_) => OcppVersion::V2_1,
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Message::V16Request(m) => m.to_json(),
            Message::V16Response(m) => m.to_json(),
            Message::V21Request(m) => m.to_json(),
            Message::V21Response(m) => m.to_json(),
        }
    }

    fn to_json_ld(&self) -> Value {
        match self {
            Message::V16Request(m) => m.to_json_ld(),
            Message::V16Response(m) => m.to_json_ld(),
            Message::V21Request(m) => m.to_json_ld(),
            Message::V21Response(m) => m.to_json_ld(),
        }
    }

    fn to_xml(&self) -> Option<XmlElement> {
        match self {
            Message::V16Request(m) => Some(m.to_xml()),
            Message::V16Response(m) => Some(m.to_xml()),
            Message::V21Request(_) | Message::V21Response(_) => None,
        }
    }
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Message::V16Request(m) => std::fmt::Display::fmt(m, f),
            Message::V16Response(m) => std::fmt::Display::fmt(m, f),
            Message::V21Request(m) => std::fmt::Display::fmt(m, f),
            Message::V21Response(m) => std::fmt::Display::fmt(m, f),
        }
    }
}

/// Read the whole payload from `path`, or from stdin when absent
pub fn read_input(path: Option<&Path>) -> io::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

impl Conversion {
    pub fn run(&self, input: &str) -> Result<String, ConvertError> {
        let (message, header) = self.parse(input)?;
        info!("Parsed {}", message);
        self.render(&message, header)
    }

    /// Parse `input`, returning the SOAP header too when there was one
    pub fn parse(&self, input: &str) -> Result<(Message, Option<SoapHeader>), ConvertError> {
        match self.from {
            InputFormat::Json => {
                let action = self.action.as_deref().ok_or(ConvertError::MissingAction("JSON"))?;
                let json: Value = serde_json::from_str(input).map_err(ParseError::from)?;
                Ok((self.parse_json(action, &json)?, None))
            }
            InputFormat::Xml => {
                self.require_xml("XML")?;
                let element = XmlElement::parse(input)?;
                Ok((self.parse_xml(&element)?, None))
            }
            InputFormat::Soap => {
                self.require_xml("SOAP")?;
                let soap = SoapMessage::parse(input)?;
                debug!("SOAP header: {:?}", soap.header);
                let message = self.parse_xml(&soap.body)?;
                let expected = message.soap_action();
                if soap.header.action.trim() != expected {
                    return Err(ParseError::ActionMismatch {
                        expected,
                        found: soap.header.action,
                    }
                    .into());
                }
                Ok((message, Some(soap.header)))
            }
        }
    }

    fn require_xml(&self, format: &'static str) -> Result<(), ConvertError> {
        match self.version {
            Version::V16 => Ok(()),
            Version::V21 => Err(ConvertError::Unsupported {
                version: OcppVersion::V2_1,
                format,
            }),
        }
    }

    fn parse_json(&self, action: &str, json: &Value) -> Result<Message, ParseError> {
        let message = match (self.version, self.kind) {
            (Version::V16, Kind::Request) => Message::V16Request(v1_6::Request::try_from_json(action.parse()?, json)?),
            (Version::V16, Kind::Response) => {
                Message::V16Response(v1_6::Response::try_from_json(action.parse()?, json)?)
            }
            (Version::V21, Kind::Request) => Message::V21Request(v2_1::Request::try_from_json(action.parse()?, json)?),
            (Version::V21, Kind::Response) => {
                Message::V21Response(v2_1::Response::try_from_json(action.parse()?, json)?)
            }
        };
        Ok(message)
    }

    fn parse_xml(&self, element: &XmlElement) -> Result<Message, ParseError> {
        let message = match self.kind {
            Kind::Request => Message::V16Request(v1_6::Request::try_from_xml_in(element, &self.config)?),
            Kind::Response => Message::V16Response(v1_6::Response::try_from_xml_in(element, &self.config)?),
        };
        if let Some(expected) = &self.action {
            if expected != message.action() {
                return Err(ParseError::ActionMismatch {
                    expected: expected.clone(),
                    found: message.action().to_string(),
                });
            }
        }
        Ok(message)
    }

    pub fn render(&self, message: &Message, header: Option<SoapHeader>) -> Result<String, ConvertError> {
        let config = &self.config;
        match self.to {
            OutputFormat::Json => Ok(config.render_json(&message.to_json())),
            OutputFormat::JsonLd => Ok(config.render_json(&message.to_json_ld())),
            OutputFormat::Xml => {
                let element = self.xml_of(message, "XML")?;
                Ok(config.render_xml(&element))
            }
            OutputFormat::Soap => {
                let body = self.xml_of(message, "SOAP")?;
                let header = header.unwrap_or_else(|| self.header_for(message));
                Ok(SoapMessage { header, body }.to_document(config))
            }
        }
    }

    fn xml_of(&self, message: &Message, format: &'static str) -> Result<XmlElement, ConvertError> {
        message.to_xml().ok_or(ConvertError::Unsupported {
            version: message.version(),
            format,
        })
    }

    fn header_for(&self, message: &Message) -> SoapHeader {
        let id = self.message_id.clone().unwrap_or_default();
        match message.kind() {
            MessageKind::Request => SoapHeader::new(&self.identity, message.soap_action(), id),
            MessageKind::Response => {
                let mut header = SoapHeader::new(&self.identity, message.soap_action(), RequestId::new());
                header.relates_to = Some(id);
                header
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn conversion(version: Version, kind: Kind, from: InputFormat, to: OutputFormat) -> Conversion {
        Conversion {
            version,
            kind,
            action: None,
            from,
            to,
            identity: "CP-TEST".to_string(),
            message_id: Some(RequestId::parse("msg-1").unwrap()),
            config: CodecConfig::new().with_xml_declaration(false),
        }
    }

    #[test]
    fn test_json_file_to_xml() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"type": "Hard"}}"#).unwrap();

        let input = read_input(Some(file.path())).unwrap();
        let mut job = conversion(Version::V16, Kind::Request, InputFormat::Json, OutputFormat::Xml);
        job.action = Some("Reset".to_string());

        assert_eq!(
            job.run(&input).unwrap(),
            r#"<resetRequest xmlns="urn://Ocpp/Cp/2015/10/"><type>Hard</type></resetRequest>"#
        );
    }

    #[test]
    fn test_xml_to_json_ld() {
        let job = conversion(Version::V16, Kind::Response, InputFormat::Xml, OutputFormat::JsonLd);
        let output = job
            .run(r#"<resetResponse xmlns="urn://Ocpp/Cp/2015/10/"><status>Accepted</status></resetResponse>"#)
            .unwrap();
        let json: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["status"], "Accepted");
        assert_eq!(json["@context"], "https://open.charging.cloud/context/ocpp/v1.6/resetResponse");
    }

    #[test]
    fn test_soap_output_for_response() {
        let mut job = conversion(Version::V16, Kind::Response, InputFormat::Json, OutputFormat::Soap);
        job.action = Some("Heartbeat".to_string());
        let document = job.run(r#"{"currentTime": "2025-05-05T05:05:05Z"}"#).unwrap();

        let soap = SoapMessage::parse(&document).unwrap();
        assert_eq!(soap.header.action, "/HeartbeatResponse");
        assert_eq!(soap.header.relates_to.as_ref().map(RequestId::as_str), Some("msg-1"));
        assert_eq!(soap.header.charge_box_identity, "CP-TEST");
        assert_eq!(soap.body.namespace.as_deref(), Some(v1_6::CS_NAMESPACE));
    }

    #[test]
    fn test_soap_header_is_kept() {
        let request = v1_6::HeartbeatRequest::new();
        let envelope = ocpp_messages::Envelope::new(request).with_request_id(RequestId::parse("hb-77").unwrap());
        let document = SoapMessage::request("CP-9", &envelope).to_document(&CodecConfig::default());

        let job = conversion(Version::V16, Kind::Request, InputFormat::Soap, OutputFormat::Soap);
        let soap = SoapMessage::parse(&job.run(&document).unwrap()).unwrap();
        assert_eq!(soap.header.message_id.as_str(), "hb-77");
        assert_eq!(soap.header.charge_box_identity, "CP-9");
    }

    #[test]
    fn test_soap_header_action_must_match_body() {
        let envelope = ocpp_messages::Envelope::new(v1_6::HeartbeatRequest::new());
        let mut soap = SoapMessage::request("CP-9", &envelope);
        soap.header.action = "/Reset".to_string();
        let document = soap.to_document(&CodecConfig::default());

        let job = conversion(Version::V16, Kind::Request, InputFormat::Soap, OutputFormat::Json);
        let err = job.run(&document).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::Parse(ParseError::ActionMismatch { ref expected, ref found })
                if expected == "/Heartbeat" && found == "/Reset"
        ));

        soap.header.action = "/HeartbeatResponse".to_string();
        let document = soap.to_document(&CodecConfig::default());
        assert!(job.run(&document).is_err());

        soap.header.action = "/Heartbeat".to_string();
        let document = soap.to_document(&CodecConfig::default());
        assert_eq!(job.run(&document).unwrap(), "{}");
    }

    #[test]
    fn test_v21_has_no_xml() {
        let mut job = conversion(Version::V21, Kind::Request, InputFormat::Json, OutputFormat::Xml);
        job.action = Some("Heartbeat".to_string());
        assert!(matches!(job.run("{}"), Err(ConvertError::Unsupported { .. })));

        job.to = OutputFormat::Json;
        assert_eq!(job.run("{}").unwrap(), "{}");

        job.from = InputFormat::Soap;
        assert!(matches!(job.run("<Envelope/>"), Err(ConvertError::Unsupported { .. })));
    }

    #[test]
    fn test_errors_surface() {
        let job = conversion(Version::V21, Kind::Request, InputFormat::Json, OutputFormat::Json);
        assert!(matches!(job.run("{}"), Err(ConvertError::MissingAction("JSON"))));

        let mut job = job;
        job.action = Some("Reset".to_string());
        let err = job.run(r#"{"type": "Hard"}"#).unwrap_err();
        assert!(matches!(err, ConvertError::Parse(ParseError::Json(_))));

        job.action = Some("Reboot".to_string());
        let err = job.run("{}").unwrap_err();
        assert!(matches!(err, ConvertError::Parse(ParseError::UnknownVariant { .. })));
    }

    #[test]
    fn test_xml_action_must_match() {
        let mut job = conversion(Version::V16, Kind::Request, InputFormat::Xml, OutputFormat::Json);
        job.action = Some("Heartbeat".to_string());
        let err = job
            .run(r#"<resetRequest xmlns="urn://Ocpp/Cp/2015/10/"><type>Soft</type></resetRequest>"#)
            .unwrap_err();
        assert!(matches!(err, ConvertError::Parse(ParseError::ActionMismatch { .. })));
    }

    #[test]
    fn test_lenient_namespaces() {
        let body = r#"<authorizeRequest xmlns="urn://Ocpp/Cp/2015/10/"><idTag>04A2B1</idTag></authorizeRequest>"#;
        let mut job = conversion(Version::V16, Kind::Request, InputFormat::Xml, OutputFormat::Json);
        assert!(matches!(
            job.run(body),
            Err(ConvertError::Parse(ParseError::UnexpectedNamespace { .. }))
        ));

        job.config = job.config.lenient_namespaces();
        assert_eq!(job.run(body).unwrap(), r#"{"idTag":"04A2B1"}"#);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        assert!(read_input(Some(&missing)).is_err());
    }
}
