//! json-typed - typed JSON notation.
//!
//! Reversible transcoding between rich runtime values and plain JSON. Values
//! JSON cannot carry on its own (NaN, the infinities, `-0`, dates, regular
//! expressions, plain objects, caller-defined types) travel inside
//! single-key envelopes naming their type:
//!
//! ```text
//! {"Number": "NaN"}   {"Date": "2020-01-01T00:00:00.000Z"}   {"RegExp": "/a+/g"}
//! {"Object": {"a": 1, "b": [true, null]}}   {"Point": {"x": 1, "y": 2}}
//! ```
//!
//! Arrays and JSON scalars are written as-is. Caller-defined types plug in
//! through a [`Recognizer`] on the encode side and a [`Reconstructor`] on
//! the decode side.
//!
//! ```
//! use json_typed::{parse, stringify, Value};
//!
//! let value = Value::object_from([
//!     ("a", Value::from(1)),
//!     ("b", Value::array(vec![Value::from(true), Value::Null])),
//!     ("c", Value::from(f64::NAN)),
//! ]);
//! let text = stringify(&value, None, None).unwrap();
//! assert_eq!(text, r#"{"Object":{"a":1,"b":[true,null],"c":{"Number":"NaN"}}}"#);
//! assert_eq!(parse(&text, None).unwrap(), value);
//! ```

mod classify;
mod date;
mod decoder;
mod deep_equal;
mod encoded;
mod encoder;
mod error;
mod number;
mod regexp;
mod text;
mod value;

pub use classify::{classify, type_name, Kind};
pub use decoder::{Decoder, Reconstructor};
pub use deep_equal::deep_equal;
pub use encoded::{EncodedNode, Tag, DATE_TAG, NUMBER_TAG, OBJECT_TAG, REGEXP_TAG};
pub use encoder::{Encoder, Recognized, Recognizer};
pub use error::TypedJsonError;
pub use number::{special_form, string_to_number, to_number};
pub use regexp::RegExp;
pub use text::Indent;
pub use value::{Array, Custom, Object, Value};

use serde_json::Value as JsonValue;

/// Encodes a value into its typed JSON tree.
pub fn encode(
    value: &Value,
    recognizer: Option<&dyn Recognizer>,
) -> Result<EncodedNode, TypedJsonError> {
    match recognizer {
        Some(recognizer) => Encoder::with_recognizer(recognizer).encode(value),
        None => Encoder::new().encode(value),
    }
}

/// Decodes a parsed typed JSON tree back into a value.
pub fn decode(
    node: &JsonValue,
    reconstructor: Option<&dyn Reconstructor>,
) -> Result<Value, TypedJsonError> {
    match reconstructor {
        Some(reconstructor) => Decoder::with_reconstructor(reconstructor).decode(node),
        None => Decoder::new().decode(node),
    }
}

/// Encodes a value and writes it as JSON text.
///
/// Nothing is written if encoding fails.
pub fn stringify(
    value: &Value,
    indent: Option<Indent>,
    recognizer: Option<&dyn Recognizer>,
) -> Result<String, TypedJsonError> {
    let node = encode(value, recognizer)?;
    text::to_text(&node, indent.as_ref())
}

/// Parses JSON text and decodes it into a value.
pub fn parse(text: &str, reconstructor: Option<&dyn Reconstructor>) -> Result<Value, TypedJsonError> {
    let node = text::from_text(text)?;
    decode(&node, reconstructor)
}
