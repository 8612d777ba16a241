//! Error type shared by the encoder, the decoder and the JSON text step.

use std::string::FromUtf8Error;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TypedJsonError {
    /// A value references itself along the active encode path.
    #[error("recursive structure cannot be represented: {type_name} contains itself")]
    CyclicStructure { type_name: String },

    /// No built-in handling and no recognizer match for this type.
    #[error("cannot convert {type_name} to typed JSON")]
    UnrepresentableType { type_name: String },

    /// An object node that is not a single-key envelope. `keys` is empty
    /// when the object had no keys at all.
    #[error("{}", describe_malformed(.keys))]
    MalformedEnvelope { keys: Vec<String> },

    /// A single-key envelope whose tag nobody knows how to rebuild.
    #[error("unrecognized object type to parse: {tag}")]
    UnrecognizedTag { tag: String },

    /// A built-in envelope whose payload does not describe a value of its type.
    #[error("invalid {tag} payload: {reason}")]
    InvalidPayload { tag: &'static str, reason: String },

    #[error("invalid regular expression flags `{0}`")]
    InvalidRegExpFlags(String),

    #[error("JSON text error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("pretty-printed text is not UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}

fn describe_malformed(keys: &[String]) -> String {
    if keys.is_empty() {
        return "invalid envelope: object contains no keys when one expected".to_string();
    }
    let mut out =
        String::from("invalid envelope: object contains multiple keys when only one expected:");
    for key in keys {
        out.push_str("\n- ");
        out.push_str(key);
    }
    out
}
