//! Decoder: parsed JSON tree → runtime value.
//!
//! Every JSON object in the input must be a single-key envelope. Built-in
//! tags are rebuilt here; any other tag goes to the reconstructor hook.

use indexmap::IndexMap;
use serde_json::{Map, Value as JsonValue};
use tracing::{debug, trace};

use crate::date;
use crate::encoded::{Tag, OBJECT_TAG, REGEXP_TAG};
use crate::error::TypedJsonError;
use crate::number::to_number;
use crate::regexp::RegExp;
use crate::value::Value;

/// Decode-side extension hook.
///
/// Receives the raw JSON payload of an envelope together with its tag; it
/// may call [`crate::decode`] on nested parts of the payload. Returning
/// `Ok(None)` means "not mine".
pub trait Reconstructor {
    fn reconstruct(&self, payload: &JsonValue, tag: &str)
        -> Result<Option<Value>, TypedJsonError>;
}

impl<F> Reconstructor for F
where
    F: Fn(&JsonValue, &str) -> Result<Option<Value>, TypedJsonError>,
{
    fn reconstruct(&self, payload: &JsonValue, tag: &str) -> Result<Option<Value>, TypedJsonError> {
        self(payload, tag)
    }
}

#[derive(Default)]
pub struct Decoder<'r> {
    reconstructor: Option<&'r dyn Reconstructor>,
}

impl<'r> Decoder<'r> {
    pub fn new() -> Self {
        Self {
            reconstructor: None,
        }
    }

    pub fn with_reconstructor(reconstructor: &'r dyn Reconstructor) -> Self {
        Self {
            reconstructor: Some(reconstructor),
        }
    }

    pub fn decode(&self, node: &JsonValue) -> Result<Value, TypedJsonError> {
        self.decode_any(node).inspect_err(|err| {
            debug!("decode failed: {}", err);
        })
    }

    fn decode_any(&self, node: &JsonValue) -> Result<Value, TypedJsonError> {
        match node {
            JsonValue::Object(map) => {
                let (key, payload) = split_envelope(map)?;
                self.decode_envelope(Tag::from_key(key), payload)
            }
            JsonValue::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(self.decode_any(item)?);
                }
                Ok(Value::array(out))
            }
            JsonValue::Null => Ok(Value::Null),
            JsonValue::Bool(b) => Ok(Value::Bool(*b)),
            JsonValue::Number(n) => Ok(Value::Number(n.as_f64().unwrap_or(f64::NAN))),
            JsonValue::String(s) => Ok(Value::String(s.clone())),
        }
    }

    fn decode_envelope(&self, tag: Tag, payload: &JsonValue) -> Result<Value, TypedJsonError> {
        match tag {
            Tag::Date => Ok(Value::Date(date::from_payload(payload)?)),
            Tag::RegExp => match payload {
                JsonValue::String(literal) => Ok(Value::RegExp(RegExp::parse(literal)?)),
                other => Err(TypedJsonError::InvalidPayload {
                    tag: REGEXP_TAG,
                    reason: format!("expected a string, got {other}"),
                }),
            },
            Tag::Number => Ok(Value::Number(to_number(payload))),
            Tag::Object => match payload {
                JsonValue::Object(fields) => {
                    let mut out = IndexMap::with_capacity(fields.len());
                    for (key, field) in fields {
                        out.insert(key.clone(), self.decode_any(field)?);
                    }
                    Ok(Value::object(out))
                }
                other => Err(TypedJsonError::InvalidPayload {
                    tag: OBJECT_TAG,
                    reason: format!("expected an object, got {other}"),
                }),
            },
            Tag::Custom(name) => {
                if let Some(reconstructor) = self.reconstructor {
                    if let Some(value) = reconstructor.reconstruct(payload, &name)? {
                        trace!("reconstructor rebuilt {}", name);
                        return Ok(value);
                    }
                    trace!("reconstructor passed on {}", name);
                }
                Err(TypedJsonError::UnrecognizedTag { tag: name })
            }
        }
    }
}

/// Splits a single-key envelope into its tag and payload.
fn split_envelope(map: &Map<String, JsonValue>) -> Result<(&str, &JsonValue), TypedJsonError> {
    let mut entries = map.iter();
    match (entries.next(), entries.next()) {
        (Some((key, payload)), None) => Ok((key.as_str(), payload)),
        _ => Err(TypedJsonError::MalformedEnvelope {
            keys: map.keys().cloned().collect(),
        }),
    }
}
