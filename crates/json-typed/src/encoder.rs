//! Encoder: runtime value → encoded tree.
//!
//! Depth-first, pre-order walk. Containers on the active path are tracked by
//! handle identity, so a container that contains itself is rejected while
//! the same container reached through two sibling branches is not.

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::classify::{classify, type_name, Kind};
use crate::encoded::{EncodedNode, Tag};
use crate::error::TypedJsonError;
use crate::number::special_form;
use crate::value::Value;

/// What a recognizer hook maps a custom value to.
#[derive(Debug, Clone, PartialEq)]
pub struct Recognized {
    pub tag: String,
    /// Encoded in turn; a plain-object payload loses its `Object` envelope.
    pub payload: Value,
}

impl Recognized {
    pub fn new(tag: impl Into<String>, payload: Value) -> Self {
        Self {
            tag: tag.into(),
            payload,
        }
    }
}

/// Encode-side extension hook.
///
/// Consulted for plain objects and custom values only, before the default
/// plain-object handling. Returning `None` falls through to the defaults.
pub trait Recognizer {
    fn recognize(&self, value: &Value, kind: Kind) -> Option<Recognized>;
}

impl<F> Recognizer for F
where
    F: Fn(&Value, Kind) -> Option<Recognized>,
{
    fn recognize(&self, value: &Value, kind: Kind) -> Option<Recognized> {
        self(value, kind)
    }
}

pub struct Encoder<'r> {
    recognizer: Option<&'r dyn Recognizer>,
    /// Identities of the containers on the active path.
    seen: Vec<usize>,
}

impl Default for Encoder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> Encoder<'r> {
    pub fn new() -> Self {
        Self {
            recognizer: None,
            seen: Vec::new(),
        }
    }

    pub fn with_recognizer(recognizer: &'r dyn Recognizer) -> Self {
        Self {
            recognizer: Some(recognizer),
            seen: Vec::new(),
        }
    }

    pub fn encode(&mut self, value: &Value) -> Result<EncodedNode, TypedJsonError> {
        self.seen.clear();
        self.encode_any(value).inspect_err(|err| {
            debug!("encode failed: {}", err);
        })
    }

    fn encode_any(&mut self, value: &Value) -> Result<EncodedNode, TypedJsonError> {
        let identity = value.identity();
        if let Some(id) = identity {
            if self.seen.contains(&id) {
                return Err(TypedJsonError::CyclicStructure {
                    type_name: type_name(value).to_string(),
                });
            }
            self.seen.push(id);
        }
        let result = self.encode_classified(value);
        if identity.is_some() {
            self.seen.pop();
        }
        result
    }

    fn encode_classified(&mut self, value: &Value) -> Result<EncodedNode, TypedJsonError> {
        let kind = classify(value);
        match value {
            Value::Number(n) => Ok(match special_form(*n) {
                Some(text) => {
                    EncodedNode::envelope(Tag::Number, EncodedNode::String(text.to_string()))
                }
                None => EncodedNode::Number(*n),
            }),
            Value::Bool(b) => Ok(EncodedNode::Bool(*b)),
            Value::Null => Ok(EncodedNode::Null),
            Value::String(s) => Ok(EncodedNode::String(s.clone())),
            Value::Undefined => Ok(EncodedNode::Undefined),
            Value::Array(items) | Value::Arguments(items) => {
                // Snapshot so a hook may mutate an ancestor while we descend.
                let items = items.borrow().clone();
                let mut out = Vec::with_capacity(items.len());
                for item in items.iter() {
                    out.push(self.encode_any(item)?);
                }
                Ok(EncodedNode::Sequence(out))
            }
            Value::RegExp(re) => Ok(EncodedNode::envelope(
                Tag::RegExp,
                EncodedNode::String(re.to_string()),
            )),
            Value::Date(instant) => Ok(EncodedNode::envelope(Tag::Date, EncodedNode::Date(*instant))),
            Value::Object(_) | Value::Custom(_) => {
                if let Some(node) = self.encode_recognized(value, kind)? {
                    return Ok(node);
                }
                match value {
                    Value::Object(fields) => {
                        let fields = fields.borrow().clone();
                        let mut out = IndexMap::with_capacity(fields.len());
                        for (key, field) in fields.iter() {
                            out.insert(key.clone(), self.encode_any(field)?);
                        }
                        Ok(EncodedNode::envelope(Tag::Object, EncodedNode::Fields(out)))
                    }
                    _ => Err(TypedJsonError::UnrepresentableType {
                        type_name: type_name(value).to_string(),
                    }),
                }
            }
        }
    }

    fn encode_recognized(
        &mut self,
        value: &Value,
        kind: Kind,
    ) -> Result<Option<EncodedNode>, TypedJsonError> {
        let Some(recognizer) = self.recognizer else {
            return Ok(None);
        };
        let Some(Recognized { tag, payload }) = recognizer.recognize(value, kind) else {
            trace!("recognizer passed on {}", type_name(value));
            return Ok(None);
        };
        trace!("recognizer tagged {} as {}", type_name(value), tag);
        let payload = match self.encode_any(&payload)? {
            EncodedNode::Envelope {
                tag: Tag::Object,
                payload,
            } => *payload,
            other => other,
        };
        Ok(Some(EncodedNode::envelope(Tag::from_key(&tag), payload)))
    }
}
