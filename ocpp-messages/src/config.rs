//! Codec configuration
//!
//! Controls how messages are rendered and how strictly XML input is
//! checked. `CodecConfig::default()` is what the plain `to_*` / `try_from_*`
//! methods use.

use serde_json::Value;

use crate::xml::XmlElement;

/// Base URI for JSON-LD contexts; the version and message name are appended
pub const DEFAULT_CONTEXT_BASE: &str = "https://open.charging.cloud/context/ocpp";

/// Rendering and parsing options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Indent JSON and XML output
    pub pretty: bool,

    /// Emit `<?xml ...?>` in front of SOAP documents
    pub xml_declaration: bool,

    /// Reject XML messages whose root element is in a foreign namespace
    pub strict_namespaces: bool,

    /// JSON-LD context base URI
    pub context_base: String,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            pretty: false,
            xml_declaration: true,
            strict_namespaces: true,
            context_base: DEFAULT_CONTEXT_BASE.to_string(),
        }
    }
}

impl CodecConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable indented output
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_xml_declaration(mut self, declaration: bool) -> Self {
        self.xml_declaration = declaration;
        self
    }

    /// Accept XML messages regardless of their root namespace
    pub fn lenient_namespaces(mut self) -> Self {
        self.strict_namespaces = false;
        self
    }

    pub fn with_context_base(mut self, base: impl Into<String>) -> Self {
        self.context_base = base.into();
        self
    }

    pub fn render_json(&self, json: &Value) -> String {
        if self.pretty {
            format!("{:#}", json)
        } else {
            json.to_string()
        }
    }

    pub fn render_xml(&self, element: &XmlElement) -> String {
        if self.pretty {
            format!("{:#}", element)
        } else {
            element.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_config_builder() {
        let config = CodecConfig::new()
            .with_pretty(true)
            .with_xml_declaration(false)
            .lenient_namespaces()
            .with_context_base("https://example.org/ctx");

        assert!(config.pretty);
        assert!(!config.xml_declaration);
        assert!(!config.strict_namespaces);
        assert_eq!(config.context_base, "https://example.org/ctx");
    }

    #[test]
    fn test_render_json() {
        let json = json!({"status": "Accepted"});
        assert_eq!(CodecConfig::default().render_json(&json), r#"{"status":"Accepted"}"#);
        assert!(CodecConfig::new().with_pretty(true).render_json(&json).contains('\n'));
    }
}
