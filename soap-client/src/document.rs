//! XML response documents
//!
//! Renderers sometimes put meaningful whitespace in text nodes, so responses
//! are parsed without trimming and whitespace-only nodes are kept.

use xmltree::{Element, EmitterConfig, ParserConfig, XMLNode};

use crate::error::{Result, SoapError};

/// A parsed response owned by the caller
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseDocument {
    root: Element,
}

impl ResponseDocument {
    /// Parse UTF-8 text into a document, keeping all whitespace
    ///
    /// The text is already decoded, so an `encoding` named in the XML
    /// declaration is not honoured.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let text = strip_declaration(text);

        let config = ParserConfig::new()
            .trim_whitespace(false)
            .whitespace_to_characters(true)
            .ignore_comments(false);

        let root = Element::parse_with_config(text.as_bytes(), config)
            .map_err(|e| SoapError::MalformedResponse(e.to_string()))?;

        Ok(Self { root })
    }

    /// Decode a raw response body and parse it
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::parse(&String::from_utf8_lossy(bytes))
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// First element named `name` (local name, prefix ignored) in document order
    pub fn find(&self, name: &str) -> Option<&Element> {
        if self.root.name == name {
            return Some(&self.root);
        }
        find_descendant(&self.root, name)
    }

    /// Serialize the document back to text without reformatting
    pub fn to_xml_string(&self) -> Result<String> {
        let config = EmitterConfig::new()
            .perform_indent(false)
            .write_document_declaration(false);

        let mut buffer = Vec::new();
        self.root
            .write_with_config(&mut buffer, config)
            .map_err(|e| SoapError::MalformedResponse(e.to_string()))?;

        String::from_utf8(buffer).map_err(|e| SoapError::MalformedResponse(e.to_string()))
    }
}

fn find_descendant<'a>(element: &'a Element, name: &str) -> Option<&'a Element> {
    for node in &element.children {
        if let XMLNode::Element(child) = node {
            if child.name == name {
                return Some(child);
            }
            if let Some(found) = find_descendant(child, name) {
                return Some(found);
            }
        }
    }
    None
}

/// Drop a leading `<?xml ...?>` declaration so the parser falls back to UTF-8.
fn strip_declaration(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("<?xml") else {
        return text;
    };
    if !rest.starts_with(|c: char| c.is_ascii_whitespace() || c == '?') {
        // a processing instruction such as <?xml-stylesheet ...?>
        return text;
    }
    match rest.find("?>") {
        Some(end) => &rest[end + 2..],
        None => text,
    }
}
