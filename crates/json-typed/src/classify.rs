//! Type classifier.
//!
//! Every value falls in exactly one category, decided by its variant alone:
//! an object with `source`/`flags` fields is still a plain object, never a
//! regular expression.

use std::fmt;

use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Number,
    Boolean,
    Null,
    String,
    Undefined,
    Array,
    Arguments,
    RegExp,
    Date,
    Object,
    /// Anything else: functions, maps, sets, symbols, class instances.
    Other,
}

impl Kind {
    pub fn name(self) -> &'static str {
        match self {
            Kind::Number => "Number",
            Kind::Boolean => "Boolean",
            Kind::Null => "Null",
            Kind::String => "String",
            Kind::Undefined => "Undefined",
            Kind::Array => "Array",
            Kind::Arguments => "Arguments",
            Kind::RegExp => "RegExp",
            Kind::Date => "Date",
            Kind::Object => "Object",
            Kind::Other => "Other",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn classify(value: &Value) -> Kind {
    match value {
        Value::Number(_) => Kind::Number,
        Value::Bool(_) => Kind::Boolean,
        Value::Null => Kind::Null,
        Value::String(_) => Kind::String,
        Value::Undefined => Kind::Undefined,
        Value::Array(_) => Kind::Array,
        Value::Arguments(_) => Kind::Arguments,
        Value::RegExp(_) => Kind::RegExp,
        Value::Date(_) => Kind::Date,
        Value::Object(_) => Kind::Object,
        Value::Custom(_) => Kind::Other,
    }
}

/// Category name of a value; custom values report their own type name.
pub fn type_name(value: &Value) -> &str {
    match value {
        Value::Custom(custom) => custom.type_name(),
        other => classify(other).name(),
    }
}
