//! JSON text step: encoded tree ⇄ JSON text.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value as JsonValue;

use crate::encoded::EncodedNode;
use crate::error::TypedJsonError;

/// Indentation is capped at this many spaces / characters.
const MAX_INDENT: usize = 10;

/// Pretty-print indentation for [`crate::stringify`].
///
/// A width is clamped to 10 spaces and a string is cut to its first 10
/// characters; a zero width or an empty string means compact output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Indent {
    Spaces(usize),
    Text(String),
}

impl Indent {
    /// The string written once per nesting level, or `None` for compact output.
    pub fn unit(&self) -> Option<String> {
        let unit: String = match self {
            Indent::Spaces(width) => " ".repeat((*width).min(MAX_INDENT)),
            Indent::Text(text) => text.chars().take(MAX_INDENT).collect(),
        };
        (!unit.is_empty()).then_some(unit)
    }
}

impl From<usize> for Indent {
    fn from(width: usize) -> Self {
        Indent::Spaces(width)
    }
}

impl From<&str> for Indent {
    fn from(text: &str) -> Self {
        Indent::Text(text.to_string())
    }
}

impl From<String> for Indent {
    fn from(text: String) -> Self {
        Indent::Text(text)
    }
}

/// Writes an encoded tree as JSON text.
pub fn to_text(node: &EncodedNode, indent: Option<&Indent>) -> Result<String, TypedJsonError> {
    let json = node.to_json();
    match indent.and_then(Indent::unit) {
        None => Ok(serde_json::to_string(&json)?),
        Some(unit) => {
            let mut buf = Vec::new();
            let formatter = PrettyFormatter::with_indent(unit.as_bytes());
            let mut serializer = Serializer::with_formatter(&mut buf, formatter);
            json.serialize(&mut serializer)?;
            Ok(String::from_utf8(buf)?)
        }
    }
}

/// Parses JSON text into the tree the decoder consumes.
pub fn from_text(text: &str) -> Result<JsonValue, TypedJsonError> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoded::Tag;
    use indexmap::IndexMap;

    fn sample() -> EncodedNode {
        let mut fields = IndexMap::new();
        fields.insert("a".to_string(), EncodedNode::Number(1.0));
        EncodedNode::envelope(Tag::Object, EncodedNode::Fields(fields))
    }

    #[test]
    fn compact_by_default() {
        assert_eq!(to_text(&sample(), None).unwrap(), r#"{"Object":{"a":1}}"#);
        assert_eq!(
            to_text(&sample(), Some(&Indent::Spaces(0))).unwrap(),
            r#"{"Object":{"a":1}}"#
        );
        assert_eq!(
            to_text(&sample(), Some(&Indent::from(""))).unwrap(),
            r#"{"Object":{"a":1}}"#
        );
    }

    #[test]
    fn indents_with_spaces_or_text() {
        assert_eq!(
            to_text(&sample(), Some(&Indent::Spaces(2))).unwrap(),
            "{\n  \"Object\": {\n    \"a\": 1\n  }\n}"
        );
        assert_eq!(
            to_text(&sample(), Some(&Indent::from("\t"))).unwrap(),
            "{\n\t\"Object\": {\n\t\t\"a\": 1\n\t}\n}"
        );
    }

    #[test]
    fn indent_is_clamped() {
        assert_eq!(Indent::Spaces(40).unit().unwrap().len(), 10);
        assert_eq!(Indent::from("abcdefghijklmnop").unit().unwrap(), "abcdefghij");
        assert_eq!(Indent::Spaces(0).unit(), None);
    }

    #[test]
    fn from_text_reports_syntax_errors() {
        assert!(matches!(from_text("{"), Err(TypedJsonError::Json(_))));
        assert_eq!(from_text("[1]").unwrap(), serde_json::json!([1]));
    }
}
