//! Reading and writing visitors over demo objects.

use propvis::{Reflect, Scalar, Value, Visitor};
use serde_json::{json, Map, Value as Json};
use tracing::{debug, info, warn};

use crate::demo::Range;

/// Format a carrier for display. `i16` prints in hex when `hex_i16` is set.
pub fn format_value(value: &Value<'_>, hex_i16: bool) -> String {
    match value.as_scalar() {
        Some(Scalar::Int16(v)) if hex_i16 => format!("0x{v:x}"),
        Some(scalar) => scalar.to_string(),
        None => {
            if let Ok((start, end)) = value.downcast_ref::<Range>() {
                format!("{{{start}, {end}}}")
            } else if let Ok(s) = value.downcast_ref::<String>() {
                s.clone()
            } else if let Ok(s) = value.downcast_ref::<&str>() {
                s.to_string()
            } else {
                format!("<{}>", value.type_name())
            }
        }
    }
}

/// Lines of a read-only dump: categories as `[Category] name:` and values
/// as `\tname: value`.
pub fn dump_lines(obj: &dyn Reflect, hex_i16: bool) -> Vec<String> {
    let mut lines = Vec::new();
    obj.visit_properties_ref(&mut Visitor::new(|p| {
        if p.is_name_only() {
            lines.push(format!("[Category] {}:", p.name()));
            return true;
        }
        if p.is_write_only() {
            return true;
        }
        let mut value = Value::empty();
        match p.read(&mut value) {
            Ok(()) => lines.push(format!("\t{}: {}", p.name(), format_value(&value, hex_i16))),
            Err(e) => warn!(property = p.name(), error = %e, "read failed"),
        }
        true
    }));
    lines
}

fn scalar_to_json(scalar: Scalar) -> Json {
    match scalar {
        Scalar::Bool(v) => v.into(),
        Scalar::Char(v) => v.to_string().into(),
        Scalar::Uint8(v) => v.into(),
        Scalar::Int8(v) => v.into(),
        Scalar::Uint16(v) => v.into(),
        Scalar::Int16(v) => v.into(),
        Scalar::Uint32(v) => v.into(),
        Scalar::Int32(v) => v.into(),
        Scalar::Uint64(v) => v.into(),
        Scalar::Int64(v) => v.into(),
        Scalar::Usize(v) => v.into(),
        Scalar::Isize(v) => v.into(),
        Scalar::Float32(v) => v.into(),
        Scalar::Float64(v) => v.into(),
    }
}

fn value_to_json(value: &Value<'_>) -> Json {
    if let Some(scalar) = value.as_scalar() {
        return scalar_to_json(scalar);
    }
    if let Ok((start, end)) = value.downcast_ref::<Range>() {
        json!([start, end])
    } else if let Ok(s) = value.downcast_ref::<String>() {
        Json::String(s.clone())
    } else if let Ok(s) = value.downcast_ref::<&str>() {
        Json::String(s.to_string())
    } else {
        Json::Null
    }
}

/// Readable properties as a JSON object; each category becomes a nested
/// object holding the properties that follow it.
pub fn dump_json(obj: &dyn Reflect) -> Json {
    let mut root = Map::new();
    let mut category: Option<String> = None;
    obj.visit_properties_ref(&mut Visitor::new(|p| {
        let name = p.name().to_string();
        if p.is_name_only() {
            root.insert(name.clone(), Json::Object(Map::new()));
            category = Some(name);
            return true;
        }
        if !p.is_readable() {
            return true;
        }
        let mut value = Value::empty();
        if let Err(e) = p.read(&mut value) {
            warn!(property = p.name(), error = %e, "read failed");
            return true;
        }
        let json = value_to_json(&value);
        let section = category
            .as_ref()
            .and_then(|c| root.get_mut(c))
            .and_then(Json::as_object_mut);
        match section {
            Some(section) => section.insert(name, json),
            None => root.insert(name, json),
        };
        true
    }));
    Json::Object(root)
}

/// Replacement written by [`write_demo`] for a value of this type.
fn replacement_for(value: &Value<'_>) -> Option<Value<'static>> {
    match value.as_scalar() {
        Some(Scalar::Char(_)) => Some(Value::new('A')),
        Some(Scalar::Int16(_)) => Some(Value::new(0x4321i16)),
        Some(Scalar::Int32(_)) => Some(Value::new(1i32)),
        Some(Scalar::Float32(_)) => Some(Value::new(1.57f32)),
        Some(_) => None,
        None if value.is::<Range>() => Some(Value::new((-20000i64, 30000i64))),
        None => value
            .downcast_ref::<String>()
            .ok()
            .map(|s| Value::new(format!("Changed {s}"))),
    }
}

/// Overwrite every writable property with a fixed value of its type.
///
/// Returns the names of the properties written.
pub fn write_demo(obj: &mut dyn Reflect) -> Vec<String> {
    let mut written = Vec::new();
    obj.visit_properties(&mut Visitor::new(|p| {
        if p.is_name_only() || p.is_read_only() {
            return true;
        }
        let next = if p.is_readable() {
            let mut current = Value::empty();
            match p.read(&mut current) {
                Ok(()) => replacement_for(&current),
                Err(e) => {
                    warn!(property = p.name(), error = %e, "read failed");
                    None
                }
            }
        } else {
            None
        };
        let Some(mut next) = next else {
            debug!(property = p.name(), "no replacement for this type");
            return true;
        };
        info!(property = p.name(), "writing new value");
        match p.write_from(&mut next) {
            Ok(()) => written.push(p.name().to_string()),
            Err(e) => warn!(property = p.name(), error = %e, "write failed"),
        }
        true
    }));
    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::{Point, SimpleClass};

    #[test]
    fn test_dump_lines() {
        let s = SimpleClass::default();
        let lines = dump_lines(&s, true);
        assert_eq!(lines[0], "[Category] Primitive types:");
        assert!(lines.contains(&"\ta: a".to_string()));
        assert!(lines.contains(&"\tb: 0x1234".to_string()));
        assert!(lines.contains(&"\tc: -1".to_string()));
        assert!(lines.contains(&"\tLimited Range: {-10, 10}".to_string()));
        assert!(lines.contains(&"\tClass Name: SimpleClass".to_string()));

        let decimal = dump_lines(&s, false);
        assert!(decimal.contains(&"\tb: 4660".to_string()));
    }

    #[test]
    fn test_write_demo() {
        let mut s = SimpleClass::default();
        let written = write_demo(&mut s);
        assert_eq!(
            written,
            ["a", "b", "c", "d", "Range", "Limited Range", "Class Name"]
        );
        assert_eq!(s.a, 'A');
        assert_eq!(s.b, 0x4321);
        assert_eq!(s.c, 1);
        assert_eq!(s.d, 1.57);
        assert_eq!(s.range, (-20000, 30000));
        assert_eq!(s.limited_range(), (-1500, 1500));
        assert_eq!(s.class_name, "Changed SimpleClass");
    }

    #[test]
    fn test_write_demo_skips_constants() {
        let mut p = Point::new(5, 4);
        assert_eq!(write_demo(&mut p), ["x", "y"]);
        assert_eq!(p, Point::new(1, 1));
    }

    #[test]
    fn test_dump_json() {
        let p = Point::new(5, 4);
        assert_eq!(dump_json(&p), json!({"ClassName": "Point", "x": 5, "y": 4}));

        let s = SimpleClass::default();
        let json = dump_json(&s);
        assert_eq!(json["Primitive types"]["c"], json!(-1));
        assert_eq!(json["Complex types"]["Range"], json!([-10, 10]));
        assert_eq!(json["Complex types"]["Class Name"], json!("SimpleClass"));
    }
}
