//! Text form of an object: `name: value, name: value, `.

use anyhow::{anyhow, bail, Context, Result};
use propvis::{Property, Reflect, Scalar, Value, Visitor};
use tracing::debug;

/// Append `name: value, ` for one property.
///
/// Name-only properties are written as `name: none` with no separator.
pub fn property_to_string(property: &Property<'_>, out: &mut String) {
    out.push_str(property.name());
    if property.is_name_only() {
        out.push_str(": none");
        return;
    }

    let mut value = Value::empty();
    if property.read(&mut value).is_ok() {
        match value.as_scalar() {
            Some(scalar @ (Scalar::Int32(_) | Scalar::Float32(_))) => {
                out.push_str(": ");
                out.push_str(&scalar.to_string());
            }
            _ => {
                if let Ok(s) = value.downcast_ref::<&str>() {
                    out.push_str(": ");
                    out.push_str(s);
                }
            }
        }
    }
    out.push_str(", ");
}

/// Text form of every property of `obj`.
pub fn to_text(obj: &dyn Reflect) -> String {
    let mut text = String::new();
    obj.visit_properties_ref(&mut Visitor::new(|p| {
        property_to_string(p, &mut text);
        true
    }));
    text
}

/// Consume one `name: value, ` entry from `input` into `property`.
///
/// Fails on a wrong property name, a constant that differs from its declared
/// value, or a number that does not parse.
pub fn parse_property(property: &mut Property<'_>, input: &mut &str) -> Result<()> {
    if input.is_empty() {
        bail!("unexpected end of input before '{}'", property.name());
    }
    let line: &str = *input;
    let (name, rest) = line
        .split_once(':')
        .ok_or_else(|| anyhow!("wrong formatting: {line}"))?;
    if name != property.name() {
        bail!("wrong property name: {name} != {}", property.name());
    }
    let rest = rest.trim_start();
    let (text, rest) = rest.split_once(',').unwrap_or((rest, ""));
    let text = text.trim();

    if property.is_readable() {
        let mut current = Value::empty();
        property.read(&mut current)?;
        let next = match current.as_scalar() {
            Some(Scalar::Int32(_)) => Some(Value::new(
                text.parse::<i32>()
                    .with_context(|| format!("bad integer for '{name}': {text}"))?,
            )),
            Some(Scalar::Float32(_)) => Some(Value::new(
                text.parse::<f32>()
                    .with_context(|| format!("bad number for '{name}': {text}"))?,
            )),
            _ => {
                if let Ok(constant) = current.downcast_ref::<&str>() {
                    if *constant != text {
                        bail!("wrong constant value: {constant} != {text}");
                    }
                }
                None
            }
        };
        drop(current);
        if let Some(mut next) = next {
            property.write_from(&mut next)?;
        }
    }

    debug!(property = name, value = text, "parsed");
    *input = rest.trim_start_matches([' ', ',']);
    Ok(())
}

/// Parse `text` into `obj`, property by property, stopping at the first error.
pub fn from_text(obj: &mut dyn Reflect, text: &str) -> Result<()> {
    let mut input = text;
    let mut failure = None;
    let completed = obj.visit_properties(&mut Visitor::new(|p| {
        match parse_property(p, &mut input) {
            Ok(()) => true,
            Err(e) => {
                failure = Some(e);
                false
            }
        }
    }));
    match failure {
        Some(e) => Err(e),
        None if completed => Ok(()),
        None => Err(anyhow!("parsing stopped early")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::{Point, Pointf};

    #[test]
    fn test_to_text() {
        assert_eq!(to_text(&Point::new(5, 4)), "ClassName: Point, x: 5, y: 4, ");
        assert_eq!(to_text(&Pointf::new(0.5, 4.0)), "ClassName: Pointf, x: 0.5, y: 4, ");
    }

    #[test]
    fn test_round_trip() {
        let mut p = Point::default();
        from_text(&mut p, &to_text(&Point::new(5, 4))).unwrap();
        assert_eq!(p, Point::new(5, 4));

        let mut pf = Pointf::default();
        from_text(&mut pf, &to_text(&Pointf::new(5.0, 4.0))).unwrap();
        assert_eq!(pf, Pointf::new(5.0, 4.0));
    }

    #[test]
    fn test_wrong_name_stops() {
        let mut p = Point::default();
        let err = from_text(&mut p, "ClassName: Point, z: 5, y: 4, ").unwrap_err();
        assert!(err.to_string().contains("wrong property name"));
        assert_eq!(p, Point::default());
    }

    #[test]
    fn test_wrong_constant_stops() {
        let mut p = Point::default();
        let err = from_text(&mut p, &to_text(&Pointf::new(5.0, 4.0))).unwrap_err();
        assert!(err.to_string().contains("wrong constant value"));
        assert_eq!(p, Point::default());
    }

    #[test]
    fn test_bad_number() {
        let mut p = Point::default();
        let err = from_text(&mut p, "ClassName: Point, x: 5.5, y: 4, ").unwrap_err();
        assert!(format!("{err:#}").contains("bad integer"));
    }
}
