//! Minimal XML element tree for the OCPP 1.6 SOAP binding
//!
//! `XmlElement::parse` reads a document with namespace resolution (default
//! and prefixed namespaces both resolve to the URI), dropping comments,
//! declarations and processing instructions. `Display` writes the tree back:
//! `{}` renders compact XML, `{:#}` renders it indented.
//!
//! Leaf text is kept verbatim, surrounding whitespace included. Whitespace
//! between child elements is layout and is dropped.
//!
//! Namespaces are inherited: a child without a namespace is written inside
//! its parent's default namespace, and reads back with the parent's URI.

pub mod codec;

pub use codec::{CustomXmlParser, CustomXmlSerializer, XmlCodec, XmlMessage};

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

use crate::error::ParseError;

/// One element with its text content and child elements.
/// Attributes other than namespace declarations are not modelled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    /// Local name (without prefix)
    pub name: String,
    pub namespace: Option<String>,
    pub text: String,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn text_element(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn push(&mut self, child: XmlElement) {
        self.children.push(child);
    }

    // ------------------------------------------------------------------
    // Builders
    // ------------------------------------------------------------------

    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_text(self, name: &str, value: impl fmt::Display) -> Self {
        self.with_child(XmlElement::text_element(name, value.to_string()))
    }

    pub fn with_opt_text<T: fmt::Display>(self, name: &str, value: Option<&T>) -> Self {
        match value {
            Some(value) => self.with_text(name, value),
            None => self,
        }
    }

    /// One element per value, all named `name`
    pub fn with_texts<T: fmt::Display>(self, name: &str, values: &[T]) -> Self {
        values.iter().fold(self, |element, value| element.with_text(name, value))
    }

    pub fn with_datetime(self, name: &str, value: &DateTime<Utc>) -> Self {
        self.with_text(name, format_datetime(value))
    }

    pub fn with_opt_datetime(self, name: &str, value: Option<&DateTime<Utc>>) -> Self {
        match value {
            Some(value) => self.with_datetime(name, value),
            None => self,
        }
    }

    pub fn with_nested<T: XmlCodec>(self, name: &str, value: &T) -> Self {
        self.with_child(value.write_xml(XmlElement::new(name)))
    }

    pub fn with_opt_nested<T: XmlCodec>(self, name: &str, value: Option<&T>) -> Self {
        match value {
            Some(value) => self.with_nested(name, value),
            None => self,
        }
    }

    pub fn with_list<T: XmlCodec>(self, name: &str, values: &[T]) -> Self {
        values.iter().fold(self, |element, value| element.with_nested(name, value))
    }

    // ------------------------------------------------------------------
    // Readers
    // ------------------------------------------------------------------

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }

    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|child| child.name == name)
    }

    pub fn required_child(&self, name: &str) -> Result<&XmlElement, ParseError> {
        self.child(name)
            .ok_or_else(|| ParseError::MissingField(name.to_string()))
    }

    pub fn text_of(&self, name: &str) -> Option<&str> {
        self.child(name).map(|child| child.text.as_str())
    }

    pub fn parse_child<T>(&self, name: &str) -> Result<T, ParseError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let child = self.required_child(name)?;
        parse_text(name, &child.text)
    }

    pub fn opt_parse_child<T>(&self, name: &str) -> Result<Option<T>, ParseError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        self.child(name)
            .map(|child| parse_text(name, &child.text))
            .transpose()
    }

    pub fn parse_children<T>(&self, name: &str) -> Result<Vec<T>, ParseError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        self.children_named(name)
            .map(|child| parse_text(name, &child.text))
            .collect()
    }

    /// `xs:boolean`: accepts `true`, `false`, `1` and `0`
    pub fn bool_child(&self, name: &str) -> Result<bool, ParseError> {
        let child = self.required_child(name)?;
        match child.text.trim() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(ParseError::invalid(name, format!("'{}' is not a boolean", other))),
        }
    }

    pub fn datetime(&self, name: &str) -> Result<DateTime<Utc>, ParseError> {
        let child = self.required_child(name)?;
        parse_datetime(name, &child.text)
    }

    pub fn opt_datetime(&self, name: &str) -> Result<Option<DateTime<Utc>>, ParseError> {
        self.child(name)
            .map(|child| parse_datetime(name, &child.text))
            .transpose()
    }

    pub fn nested<T: XmlCodec>(&self, name: &str) -> Result<T, ParseError> {
        let child = self.required_child(name)?;
        T::read_xml(child).map_err(|e| scoped(e, name))
    }

    pub fn opt_nested<T: XmlCodec>(&self, name: &str) -> Result<Option<T>, ParseError> {
        self.child(name)
            .map(|child| T::read_xml(child).map_err(|e| scoped(e, name)))
            .transpose()
    }

    pub fn list<T: XmlCodec>(&self, name: &str) -> Result<Vec<T>, ParseError> {
        self.children_named(name)
            .map(|child| T::read_xml(child).map_err(|e| scoped(e, name)))
            .collect()
    }

    // ------------------------------------------------------------------
    // Document I/O
    // ------------------------------------------------------------------

    /// Parse a document and return its root element
    pub fn parse(input: &str) -> Result<XmlElement, ParseError> {
        let mut reader = NsReader::from_str(input);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            let position = reader.buffer_position();
            let (namespace, event) = match reader.read_resolved_event() {
                Ok((resolved, event)) => (resolved_namespace(resolved), event),
                Err(e) => {
                    return Err(ParseError::Xml(format!("{} (near byte {})", e, position)));
                }
            };

            match event {
                Event::Start(start) => stack.push(opened(namespace, &start)?),
                Event::Empty(start) => {
                    let element = opened(namespace, &start)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let mut element = stack
                        .pop()
                        .ok_or_else(|| ParseError::Xml("unbalanced end tag".to_string()))?;
                    if !element.children.is_empty() {
                        // Mixed content is not modelled
                        element.text = element.text.trim().to_string();
                    }
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(text) => {
                    let text = text.unescape().map_err(|e| ParseError::Xml(e.to_string()))?;
                    match stack.last_mut() {
                        Some(top) => top.text.push_str(&text),
                        None if text.trim().is_empty() => {}
                        None => {
                            return Err(ParseError::Xml("text outside of the root element".to_string()))
                        }
                    }
                }
                Event::CData(data) => {
                    let bytes = data.into_inner();
                    let text = std::str::from_utf8(&bytes).map_err(|e| ParseError::Xml(e.to_string()))?;
                    if let Some(top) = stack.last_mut() {
                        top.text.push_str(text);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(ParseError::Xml(format!("unclosed element <{}>", open.name)));
        }
        root.ok_or_else(|| ParseError::Xml("document has no root element".to_string()))
    }

    fn write(&self, f: &mut fmt::Formatter<'_>, parent_ns: Option<&str>, depth: Option<usize>) -> fmt::Result {
        if let Some(depth) = depth {
            write!(f, "{:indent$}", "", indent = depth * 2)?;
        }
        write!(f, "<{}", self.name)?;

        let own_ns = self.namespace.as_deref();
        if let Some(ns) = own_ns {
            if Some(ns) != parent_ns {
                write!(f, " xmlns=\"{}\"", escape(ns))?;
            }
        }
        let effective_ns = own_ns.or(parent_ns);

        if self.children.is_empty() {
            if self.text.is_empty() {
                return f.write_str("/>");
            }
            return write!(f, ">{}</{}>", escape(&self.text), self.name);
        }

        f.write_str(">")?;
        if !self.text.is_empty() {
            write!(f, "{}", escape(&self.text))?;
        }
        for child in &self.children {
            if depth.is_some() {
                f.write_str("\n")?;
            }
            child.write(f, effective_ns, depth.map(|d| d + 1))?;
        }
        if let Some(depth) = depth {
            write!(f, "\n{:indent$}", "", indent = depth * 2)?;
        }
        write!(f, "</{}>", self.name)
    }
}

impl fmt::Display for XmlElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let depth = if f.alternate() { Some(0) } else { None };
        self.write(f, None, depth)
    }
}

impl FromStr for XmlElement {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// `xs:dateTime` as written by this crate: RFC 3339, UTC, `Z` suffix
pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn parse_datetime(name: &str, text: &str) -> Result<DateTime<Utc>, ParseError> {
    DateTime::parse_from_rfc3339(text.trim())
        .map(|value| value.with_timezone(&Utc))
        .map_err(|e| ParseError::invalid(name, format!("'{}': {}", text, e)))
}

/// Text is tried verbatim first; numbers and enumerations may carry
/// surrounding whitespace, which is then stripped
fn parse_text<T>(name: &str, text: &str) -> Result<T, ParseError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    text.parse::<T>().or_else(|e| {
        let trimmed = text.trim();
        if trimmed.len() == text.len() {
            return Err(ParseError::invalid(name, e));
        }
        trimmed.parse::<T>().map_err(|e| ParseError::invalid(name, e))
    })
}

/// Prefix field paths of a nested element's error with the element name
fn scoped(err: ParseError, name: &str) -> ParseError {
    match err {
        ParseError::MissingField(field) => ParseError::MissingField(format!("{}.{}", name, field)),
        ParseError::InvalidField { field, reason } => ParseError::InvalidField {
            field: format!("{}.{}", name, field),
            reason,
        },
        ParseError::Validation(e) => ParseError::Validation(e.within(name)),
        other => other,
    }
}

fn resolved_namespace(resolved: ResolveResult<'_>) -> Option<String> {
    match resolved {
        ResolveResult::Bound(Namespace(uri)) => Some(String::from_utf8_lossy(uri).into_owned()),
        _ => None,
    }
}

fn opened(namespace: Option<String>, start: &BytesStart<'_>) -> Result<XmlElement, ParseError> {
    let local = start.local_name();
    let name = std::str::from_utf8(local.as_ref()).map_err(|e| ParseError::Xml(e.to_string()))?;
    Ok(XmlElement {
        name: name.to_string(),
        namespace,
        ..Default::default()
    })
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), ParseError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(ParseError::Xml(format!("second root element <{}>", element.name)));
    }
    *root = Some(element);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CP_NS: &str = "urn://Ocpp/Cp/2015/10/";

    #[test]
    fn test_parse_resolves_prefixed_namespace() {
        let doc = r#"<?xml version="1.0"?>
            <!-- reset -->
            <ns:resetRequest xmlns:ns="urn://Ocpp/Cp/2015/10/">
                <ns:type>Hard</ns:type>
            </ns:resetRequest>"#;

        let root = XmlElement::parse(doc).unwrap();
        assert_eq!(root.name, "resetRequest");
        assert_eq!(root.namespace.as_deref(), Some(CP_NS));
        assert_eq!(root.text_of("type"), Some("Hard"));
        assert_eq!(root.children[0].namespace.as_deref(), Some(CP_NS));
    }

    #[test]
    fn test_display_roundtrip_with_escaping() {
        let element = XmlElement::new("dataTransferRequest")
            .in_namespace(CP_NS)
            .with_text("vendorId", "ACME & Sons")
            .with_text("data", "<payload/>")
            .with_child(XmlElement::new("empty"));

        let compact = element.to_string();
        assert!(compact.contains("ACME &amp; Sons"));
        assert!(compact.contains("<empty/>"));

        for text in [compact, format!("{:#}", element)] {
            let parsed = XmlElement::parse(&text).unwrap();
            assert_eq!(parsed.text_of("vendorId"), Some("ACME & Sons"));
            assert_eq!(parsed.text_of("data"), Some("<payload/>"));
            assert_eq!(parsed.namespace.as_deref(), Some(CP_NS));
        }
    }

    #[test]
    fn test_parse_rejects_broken_documents() {
        assert!(XmlElement::parse("").is_err());
        assert!(XmlElement::parse("<a><b></a>").is_err());
        assert!(XmlElement::parse("<a/><b/>").is_err());
        assert!(XmlElement::parse("<a>").is_err());
    }

    #[test]
    fn test_reader_errors_name_the_field() {
        let element = XmlElement::new("x").with_text("connectorId", "minus one");

        let err = element.parse_child::<u32>("connectorId").unwrap_err();
        assert!(matches!(err, ParseError::InvalidField { ref field, .. } if field == "connectorId"));

        let err = element.parse_child::<u32>("transactionId").unwrap_err();
        assert_eq!(err, ParseError::MissingField("transactionId".to_string()));
    }

    #[test]
    fn test_leaf_whitespace_is_kept() {
        let doc = "\n<dataTransferRequest>\n  <vendorId>com.acme</vendorId>\n  <data>  two  words </data>\n  <messageId> </messageId>\n</dataTransferRequest>\n";
        let root = XmlElement::parse(doc).unwrap();
        assert_eq!(root.text, "");
        assert_eq!(root.children.len(), 3);
        assert_eq!(root.text_of("data"), Some("  two  words "));
        assert_eq!(root.text_of("messageId"), Some(" "));

        let reparsed = XmlElement::parse(&format!("{:#}", root)).unwrap();
        assert_eq!(reparsed, root);
    }

    #[test]
    fn test_padded_numbers_still_parse() {
        let root = XmlElement::parse("<x><connectorId>\n 2 \n</connectorId><ok> true </ok></x>").unwrap();
        assert_eq!(root.parse_child::<u32>("connectorId").unwrap(), 2);
        assert!(root.bool_child("ok").unwrap());
        assert!(XmlElement::parse("<x/>trailing").is_err());
    }

    #[test]
    fn test_cdata_and_bool() {
        let root = XmlElement::parse("<kv><readonly>1</readonly><value><![CDATA[a<b]]></value></kv>").unwrap();
        assert!(root.bool_child("readonly").unwrap());
        assert_eq!(root.text_of("value"), Some("a<b"));
    }
}
