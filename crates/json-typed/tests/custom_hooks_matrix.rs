//! Recognizer / reconstructor hooks for caller-defined types.

use json_typed::{
    decode, encode, parse, stringify, Kind, Reconstructor, Recognized, Recognizer,
    TypedJsonError, Value,
};
use serde_json::{json, Value as JsonValue};

#[derive(Debug, Clone, PartialEq)]
struct Point {
    x: f64,
    y: f64,
}

fn point(x: f64, y: f64) -> Value {
    Value::custom("Point", Point { x, y })
}

/// Tags `Point` values as `{"Point": {"x": .., "y": ..}}`.
struct PointCodec;

impl Recognizer for PointCodec {
    fn recognize(&self, value: &Value, kind: Kind) -> Option<Recognized> {
        if kind != Kind::Other {
            return None;
        }
        let p = value.as_custom()?.downcast_ref::<Point>()?;
        Some(Recognized::new(
            "Point",
            Value::object_from([("x", Value::from(p.x)), ("y", Value::from(p.y))]),
        ))
    }
}

impl Reconstructor for PointCodec {
    fn reconstruct(&self, payload: &JsonValue, tag: &str) -> Result<Option<Value>, TypedJsonError> {
        if tag != "Point" {
            return Ok(None);
        }
        let coord = |key: &str| -> Result<f64, TypedJsonError> {
            let field = payload.get(key).ok_or_else(|| TypedJsonError::UnrecognizedTag {
                tag: format!("Point.{key}"),
            })?;
            Ok(decode(field, None)?.as_f64().unwrap_or(f64::NAN))
        };
        Ok(Some(point(coord("x")?, coord("y")?)))
    }
}

#[test]
fn point_round_trip() {
    let value = point(1.0, -2.5);
    let text = stringify(&value, None, Some(&PointCodec)).unwrap();
    assert_eq!(text, r#"{"Point":{"x":1,"y":-2.5}}"#);
    let back = parse(&text, Some(&PointCodec)).unwrap();
    assert_eq!(back, value);
    let inner = back.as_custom().and_then(|c| c.downcast_ref::<Point>()).cloned();
    assert_eq!(inner, Some(Point { x: 1.0, y: -2.5 }));
}

#[test]
fn point_with_special_coordinates() {
    let value = point(f64::NAN, -0.0);
    let text = stringify(&value, None, Some(&PointCodec)).unwrap();
    assert_eq!(text, r#"{"Point":{"x":{"Number":"NaN"},"y":{"Number":"-0"}}}"#);
    let back = parse(&text, Some(&PointCodec)).unwrap();
    let p = back
        .as_custom()
        .and_then(|c| c.downcast_ref::<Point>())
        .expect("a point");
    assert!(p.x.is_nan());
    assert_eq!(1.0 / p.y, f64::NEG_INFINITY);
}

#[test]
fn points_nested_in_plain_structures() {
    let value = Value::object_from([
        ("origin", point(0.0, 0.0)),
        ("path", Value::array(vec![point(1.0, 1.0), point(2.0, 4.0)])),
    ]);
    let encoded = encode(&value, Some(&PointCodec)).unwrap();
    assert_eq!(
        encoded.to_json(),
        json!({"Object": {
            "origin": {"Point": {"x": 0, "y": 0}},
            "path": [{"Point": {"x": 1, "y": 1}}, {"Point": {"x": 2, "y": 4}}]
        }})
    );
    assert_eq!(decode(&encoded.to_json(), Some(&PointCodec)).unwrap(), value);
}

#[test]
fn missing_reconstructor_is_an_unrecognized_tag() {
    let text = stringify(&point(3.0, 4.0), None, Some(&PointCodec)).unwrap();
    match parse(&text, None) {
        Err(TypedJsonError::UnrecognizedTag { tag }) => assert_eq!(tag, "Point"),
        other => panic!("expected an unrecognized tag, got {other:?}"),
    }
}

#[test]
fn declined_tag_is_unrecognized() {
    match parse(r#"[{"Point":{"x":1,"y":2}},{"Frobnicate":1}]"#, Some(&PointCodec)) {
        Err(TypedJsonError::UnrecognizedTag { tag }) => assert_eq!(tag, "Frobnicate"),
        other => panic!("expected an unrecognized tag, got {other:?}"),
    }
    let decline = |_: &JsonValue, _: &str| -> Result<Option<Value>, TypedJsonError> { Ok(None) };
    assert!(matches!(
        decode(&json!({"Frobnicate": 1}), Some(&decline)),
        Err(TypedJsonError::UnrecognizedTag { .. })
    ));
}

#[test]
fn missing_recognizer_is_unrepresentable() {
    match stringify(&point(3.0, 4.0), None, None) {
        Err(TypedJsonError::UnrepresentableType { type_name }) => assert_eq!(type_name, "Point"),
        other => panic!("expected an unrepresentable type, got {other:?}"),
    }
}

#[test]
fn recognizer_sees_plain_objects_first() {
    let redact = |value: &Value, kind: Kind| -> Option<Recognized> {
        match kind {
            Kind::Object if value.get("secret").is_some() => {
                Some(Recognized::new("Redacted", Value::Null))
            }
            _ => None,
        }
    };
    let value = Value::array(vec![
        Value::object_from([("secret", Value::from("hunter2"))]),
        Value::object_from([("public", Value::from(1))]),
    ]);
    let text = stringify(&value, None, Some(&redact)).unwrap();
    assert_eq!(text, r#"[{"Redacted":null},{"Object":{"public":1}}]"#);
}

#[test]
fn recognizer_is_not_consulted_for_builtin_kinds() {
    let everything = |_: &Value, kind: Kind| -> Option<Recognized> {
        Some(Recognized::new("Seen", Value::from(kind.name())))
    };
    let value = Value::array(vec![
        Value::from(1),
        Value::from("s"),
        Value::Null,
        Value::from(f64::NAN),
        Value::date_from_millis(0).unwrap(),
    ]);
    let text = stringify(&value, None, Some(&everything)).unwrap();
    assert_eq!(
        text,
        r#"[1,"s",null,{"Number":"NaN"},{"Date":"1970-01-01T00:00:00.000Z"}]"#
    );
}

#[test]
fn non_object_payload_is_not_unwrapped() {
    let as_list = |value: &Value, _: Kind| -> Option<Recognized> {
        let p = value.as_custom()?.downcast_ref::<Point>()?;
        Some(Recognized::new(
            "PointList",
            Value::array(vec![Value::from(p.x), Value::from(p.y)]),
        ))
    };
    let text = stringify(&point(1.0, 2.0), None, Some(&as_list)).unwrap();
    assert_eq!(text, r#"{"PointList":[1,2]}"#);
}

#[test]
fn only_one_object_level_is_unwrapped() {
    let wrap = |value: &Value, _: Kind| -> Option<Recognized> {
        value.as_custom()?.downcast_ref::<Point>()?;
        Some(Recognized::new(
            "Boxed",
            Value::object_from([("inner", Value::object_from([("k", Value::from(1))]))]),
        ))
    };
    let text = stringify(&point(0.0, 0.0), None, Some(&wrap)).unwrap();
    assert_eq!(text, r#"{"Boxed":{"inner":{"Object":{"k":1}}}}"#);
}

#[test]
fn payload_containing_its_owner_is_a_cycle() {
    let echo = |value: &Value, _: Kind| -> Option<Recognized> {
        Some(Recognized::new("Echo", Value::array(vec![value.clone()])))
    };
    assert!(matches!(
        encode(&Value::custom("Loop", 0u8), Some(&echo)),
        Err(TypedJsonError::CyclicStructure { .. })
    ));
}

#[test]
fn closure_reconstructor() {
    let counter = |payload: &JsonValue, tag: &str| -> Result<Option<Value>, TypedJsonError> {
        Ok((tag == "Count").then(|| Value::from(payload.as_f64().unwrap_or(0.0) + 1.0)))
    };
    let value = parse(r#"[{"Count":1},{"Count":41}]"#, Some(&counter)).unwrap();
    assert_eq!(value, Value::array(vec![Value::from(2), Value::from(42)]));
}
