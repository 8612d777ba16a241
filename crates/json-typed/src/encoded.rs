//! Encoded tree: the JSON-representable output of the encoder.
//!
//! Non-scalar values travel inside single-key envelopes, `{tag: payload}`.
//! [`EncodedNode::to_json`] lowers the tree to the JSON value a standard
//! stringifier would see.

use std::fmt;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde_json::{Map, Number, Value as JsonValue};

use crate::date;

pub const NUMBER_TAG: &str = "Number";
pub const DATE_TAG: &str = "Date";
pub const REGEXP_TAG: &str = "RegExp";
pub const OBJECT_TAG: &str = "Object";

/// Largest integer an `f64` holds exactly (2^53 - 1).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Envelope tag: one of the four built-ins or a caller-defined name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    Number,
    Date,
    RegExp,
    Object,
    Custom(String),
}

impl Tag {
    pub fn from_key(key: &str) -> Self {
        match key {
            NUMBER_TAG => Tag::Number,
            DATE_TAG => Tag::Date,
            REGEXP_TAG => Tag::RegExp,
            OBJECT_TAG => Tag::Object,
            other => Tag::Custom(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Tag::Number => NUMBER_TAG,
            Tag::Date => DATE_TAG,
            Tag::RegExp => REGEXP_TAG,
            Tag::Object => OBJECT_TAG,
            Tag::Custom(name) => name,
        }
    }

    pub fn is_builtin(&self) -> bool {
        !matches!(self, Tag::Custom(_))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EncodedNode {
    /// Dropped from objects and written as `null` elsewhere.
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    /// Date payload; rendered as an ISO-8601 string when lowered.
    Date(DateTime<Utc>),
    Sequence(Vec<EncodedNode>),
    /// Field mapping carried by `Object` (and unwrapped custom) envelopes.
    Fields(IndexMap<String, EncodedNode>),
    Envelope { tag: Tag, payload: Box<EncodedNode> },
}

impl EncodedNode {
    pub fn envelope(tag: Tag, payload: EncodedNode) -> Self {
        EncodedNode::Envelope {
            tag,
            payload: Box::new(payload),
        }
    }

    pub fn tag(&self) -> Option<&Tag> {
        match self {
            EncodedNode::Envelope { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn payload(&self) -> Option<&EncodedNode> {
        match self {
            EncodedNode::Envelope { payload, .. } => Some(payload),
            _ => None,
        }
    }

    /// Lowers the tree to a JSON value.
    ///
    /// A top-level `Undefined` becomes `null`.
    pub fn to_json(&self) -> JsonValue {
        match self {
            EncodedNode::Undefined | EncodedNode::Null => JsonValue::Null,
            EncodedNode::Bool(b) => JsonValue::Bool(*b),
            EncodedNode::Number(n) => number_to_json(*n),
            EncodedNode::String(s) => JsonValue::String(s.clone()),
            EncodedNode::Date(instant) => JsonValue::String(date::to_iso_string(instant)),
            EncodedNode::Sequence(items) => {
                JsonValue::Array(items.iter().map(EncodedNode::to_json).collect())
            }
            EncodedNode::Fields(fields) => {
                let mut map = Map::with_capacity(fields.len());
                for (key, node) in fields {
                    if !matches!(node, EncodedNode::Undefined) {
                        map.insert(key.clone(), node.to_json());
                    }
                }
                JsonValue::Object(map)
            }
            EncodedNode::Envelope { tag, payload } => {
                let mut map = Map::with_capacity(1);
                if !matches!(**payload, EncodedNode::Undefined) {
                    map.insert(tag.as_str().to_string(), payload.to_json());
                }
                JsonValue::Object(map)
            }
        }
    }
}

/// Integral numbers in the safe range are written without a fraction.
/// Non-finite numbers have no JSON form and become `null`.
fn number_to_json(n: f64) -> JsonValue {
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        return JsonValue::Number(Number::from(n as i64));
    }
    Number::from_f64(n).map_or(JsonValue::Null, JsonValue::Number)
}
