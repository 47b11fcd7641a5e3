//! XML codec traits
//!
//! `XmlCodec` maps a value onto the children of an element; every
//! composite OCPP 1.6 type and every 1.6 message implements it.
//! `XmlMessage` adds the SOAP body conventions: root element name,
//! service namespace, validation and the parse-failure convention.

use tracing::{debug, trace};

use crate::common::OcppMessage;
use crate::config::CodecConfig;
use crate::error::ParseError;
use crate::xml::XmlElement;

/// Hook applied after the built-in XML parser
pub type CustomXmlParser<T> = dyn Fn(&XmlElement, T) -> T;

/// Hook applied after the built-in XML serializer
pub type CustomXmlSerializer<T> = dyn Fn(&T, XmlElement) -> XmlElement;

/// Field-level XML mapping
pub trait XmlCodec: Sized {
    /// Append this value's fields to `element` and return it
    fn write_xml(&self, element: XmlElement) -> XmlElement;

    fn read_xml(element: &XmlElement) -> Result<Self, ParseError>;
}

/// A message with an OCPP 1.6 SOAP representation
pub trait XmlMessage: OcppMessage + XmlCodec {
    /// Service namespace of the root element
    const XML_NAMESPACE: &'static str;

    /// Body element name, e.g. `resetRequest`
    fn xml_name() -> String {
        Self::message_name()
    }

    fn accepts_namespace(namespace: &str) -> bool {
        namespace == Self::XML_NAMESPACE
    }

    fn to_xml(&self) -> XmlElement {
        self.to_xml_in(Self::XML_NAMESPACE)
    }

    fn to_xml_in(&self, namespace: &str) -> XmlElement {
        self.write_xml(XmlElement::new(Self::xml_name()).in_namespace(namespace))
    }

    fn to_xml_with(&self, custom: Option<&CustomXmlSerializer<Self>>) -> XmlElement {
        let element = self.to_xml();
        match custom {
            Some(hook) => hook(self, element),
            None => element,
        }
    }

    /// Parse and validate a body element. Never panics.
    fn try_from_xml(element: &XmlElement) -> Result<Self, ParseError> {
        Self::try_from_xml_with(element, &CodecConfig::default(), None)
    }

    fn try_from_xml_with(
        element: &XmlElement,
        config: &CodecConfig,
        custom: Option<&CustomXmlParser<Self>>,
    ) -> Result<Self, ParseError> {
        let result = check_root::<Self>(element, config)
            .and_then(|_| Self::read_xml(element))
            .map(|message| match custom {
                Some(hook) => hook(element, message),
                None => message,
            })
            .and_then(|message| {
                message.validate()?;
                Ok(message)
            });

        match &result {
            Ok(_) => trace!("Parsed {} {} from XML", Self::ACTION, Self::KIND),
            Err(e) => debug!("Rejected {} {} XML: {}", Self::ACTION, Self::KIND, e),
        }
        result
    }

    fn try_from_xml_str(text: &str) -> Result<Self, ParseError> {
        let element = XmlElement::parse(text)?;
        Self::try_from_xml(&element)
    }

    /// Parse a body element that is known to be valid.
    ///
    /// # Panics
    ///
    /// Panics with the parse error when the element is invalid.
    #[track_caller]
    fn from_xml(element: &XmlElement) -> Self {
        match Self::try_from_xml(element) {
            Ok(message) => message,
            Err(e) => panic!("invalid {} {}: {}", Self::ACTION, Self::KIND, e),
        }
    }
}

fn check_root<T: XmlMessage>(element: &XmlElement, config: &CodecConfig) -> Result<(), ParseError> {
    let expected = T::xml_name();
    if element.name != expected {
        return Err(ParseError::UnexpectedElement {
            expected,
            found: element.name.clone(),
        });
    }

    if config.strict_namespaces {
        let namespace = element.namespace.as_deref().unwrap_or_default();
        if !T::accepts_namespace(namespace) {
            return Err(ParseError::UnexpectedNamespace {
                element: element.name.clone(),
                expected: T::XML_NAMESPACE.to_string(),
                found: namespace.to_string(),
            });
        }
    }
    Ok(())
}
