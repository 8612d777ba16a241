//! Runtime values handled by the encoder and produced by the decoder.
//!
//! Arrays, argument lists and objects are shared handles
//! (`Rc<RefCell<..>>`): the same container may be reachable from several
//! places, and a container may even contain itself. The encoder tells those
//! cases apart by handle identity.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::date;
use crate::deep_equal::deep_equal;
use crate::regexp::RegExp;

/// Shared, mutable ordered sequence.
pub type Array = Rc<RefCell<Vec<Value>>>;

/// Shared, mutable mapping that remembers insertion order.
pub type Object = Rc<RefCell<IndexMap<String, Value>>>;

#[derive(Clone, Debug)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Array),
    /// A variadic argument list. Encodes like an array.
    Arguments(Array),
    Object(Object),
    /// UTC instant with millisecond precision.
    Date(DateTime<Utc>),
    RegExp(RegExp),
    Custom(Custom),
}

impl Value {
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Rc::new(RefCell::new(items)))
    }

    pub fn arguments(items: Vec<Value>) -> Self {
        Value::Arguments(Rc::new(RefCell::new(items)))
    }

    pub fn object(fields: IndexMap<String, Value>) -> Self {
        Value::Object(Rc::new(RefCell::new(fields)))
    }

    /// Builds an object from `(key, value)` pairs, keeping their order.
    pub fn object_from<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self::object(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Date value, truncated to millisecond precision.
    pub fn date(instant: DateTime<Utc>) -> Self {
        Value::Date(date::truncate_to_millis(instant))
    }

    /// Date value from milliseconds since the Unix epoch, if representable.
    pub fn date_from_millis(ms: i64) -> Option<Self> {
        date::from_millis(ms).map(Value::Date)
    }

    pub fn custom<T>(type_name: impl Into<String>, inner: T) -> Self
    where
        T: Any + fmt::Debug + PartialEq,
    {
        Value::Custom(Custom::new(type_name, inner))
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_custom(&self) -> Option<&Custom> {
        match self {
            Value::Custom(c) => Some(c),
            _ => None,
        }
    }

    /// Looks up an object field. Returns a clone of the field (cheap for
    /// handle-backed values).
    pub fn get(&self, key: &str) -> Option<Value> {
        match self {
            Value::Object(fields) => fields.borrow().get(key).cloned(),
            _ => None,
        }
    }

    /// Returns a clone of the item at `index` of an array or argument list.
    pub fn item(&self, index: usize) -> Option<Value> {
        match self {
            Value::Array(items) | Value::Arguments(items) => items.borrow().get(index).cloned(),
            _ => None,
        }
    }

    /// Number of items of an array or argument list, or fields of an object.
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::Array(items) | Value::Arguments(items) => Some(items.borrow().len()),
            Value::Object(fields) => Some(fields.borrow().len()),
            _ => None,
        }
    }

    /// Address of the shared handle behind this value, if it has one.
    /// Scalars, dates and regular expressions have no identity.
    pub(crate) fn identity(&self) -> Option<usize> {
        match self {
            Value::Array(items) | Value::Arguments(items) => Some(Rc::as_ptr(items) as usize),
            Value::Object(fields) => Some(Rc::as_ptr(fields) as usize),
            Value::Custom(custom) => Some(custom.identity()),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        deep_equal(self, other)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::array(items)
    }
}

impl From<RegExp> for Value {
    fn from(re: RegExp) -> Self {
        Value::RegExp(re)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(instant: DateTime<Utc>) -> Self {
        Value::date(instant)
    }
}

/// A caller-defined value: anything without a built-in representation
/// (maps, sets, functions, class instances...). Only a recognizer hook can
/// encode one.
#[derive(Clone)]
pub struct Custom {
    type_name: Rc<str>,
    inner: Rc<dyn Any>,
    eq: fn(&dyn Any, &dyn Any) -> bool,
    debug: fn(&dyn Any, &mut fmt::Formatter<'_>) -> fmt::Result,
}

impl Custom {
    pub fn new<T>(type_name: impl Into<String>, inner: T) -> Self
    where
        T: Any + fmt::Debug + PartialEq,
    {
        Self {
            type_name: Rc::from(type_name.into()),
            inner: Rc::new(inner),
            eq: eq_any::<T>,
            debug: debug_any::<T>,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    fn identity(&self) -> usize {
        Rc::as_ptr(&self.inner) as *const () as usize
    }
}

impl PartialEq for Custom {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name && (self.eq)(&*self.inner, &*other.inner)
    }
}

impl fmt::Debug for Custom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.type_name)?;
        (self.debug)(&*self.inner, f)?;
        f.write_str(")")
    }
}

fn eq_any<T: Any + PartialEq>(a: &dyn Any, b: &dyn Any) -> bool {
    match (a.downcast_ref::<T>(), b.downcast_ref::<T>()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn debug_any<T: Any + fmt::Debug>(value: &dyn Any, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match value.downcast_ref::<T>() {
        Some(inner) => fmt::Debug::fmt(inner, f),
        None => f.write_str(".."),
    }
}
