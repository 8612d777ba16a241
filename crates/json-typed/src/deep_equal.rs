/// Performs a deep equality check between two runtime values.
///
/// Numbers compare by "same value": `NaN` equals `NaN`, while `0` and `-0`
/// differ. Dates compare by instant, regular expressions by source and
/// flags, custom values through their own `PartialEq`. Values of different
/// kinds are never equal, so an argument list never equals an array.
///
/// Does not terminate on cyclic structures.
///
/// # Examples
///
/// ```
/// use json_typed::{deep_equal, Value};
///
/// let a = Value::array(vec![Value::Number(f64::NAN), Value::Number(-0.0)]);
/// let b = Value::array(vec![Value::Number(f64::NAN), Value::Number(-0.0)]);
/// let c = Value::array(vec![Value::Number(f64::NAN), Value::Number(0.0)]);
///
/// assert!(deep_equal(&a, &b));
/// assert!(!deep_equal(&a, &c));
/// ```
pub fn deep_equal(a: &crate::Value, b: &crate::Value) -> bool {
    use crate::Value;
    use std::rc::Rc;

    match (a, b) {
        (Value::Undefined, Value::Undefined) => true,
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => same_value(*a, *b),
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Date(a), Value::Date(b)) => a.timestamp_millis() == b.timestamp_millis(),
        (Value::RegExp(a), Value::RegExp(b)) => a == b,
        (Value::Custom(a), Value::Custom(b)) => a == b,

        (Value::Array(arr_a), Value::Array(arr_b))
        | (Value::Arguments(arr_a), Value::Arguments(arr_b)) => {
            if Rc::ptr_eq(arr_a, arr_b) {
                return true;
            }
            let (arr_a, arr_b) = (arr_a.borrow(), arr_b.borrow());
            if arr_a.len() != arr_b.len() {
                return false;
            }
            arr_a.iter().zip(arr_b.iter()).all(|(a, b)| deep_equal(a, b))
        }

        (Value::Object(obj_a), Value::Object(obj_b)) => {
            if Rc::ptr_eq(obj_a, obj_b) {
                return true;
            }
            let (obj_a, obj_b) = (obj_a.borrow(), obj_b.borrow());
            if obj_a.len() != obj_b.len() {
                return false;
            }
            for (key, val_a) in obj_a.iter() {
                match obj_b.get(key) {
                    Some(val_b) => {
                        if !deep_equal(val_a, val_b) {
                            return false;
                        }
                    }
                    None => return false,
                }
            }
            true
        }

        // Different types are never equal
        _ => false,
    }
}

fn same_value(a: f64, b: f64) -> bool {
    if a.is_nan() || b.is_nan() {
        return a.is_nan() && b.is_nan();
    }
    a == b && a.is_sign_negative() == b.is_sign_negative()
}
