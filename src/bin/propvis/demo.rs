//! Demo objects declaring their property lists.

use std::any::Any;

use propvis::{Mode, Mutable, Properties, ReadOnly, Reflect, Value};

/// Inclusive integer range.
pub type Range = (i64, i64);

/// Bound applied by the "Limited Range" property.
pub const RANGE_LIMIT: i64 = 1500;

/// Class mixing primitive members, aggregates and a validating property.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleClass {
    pub a: char,
    pub b: i16,
    pub c: i32,
    pub d: f32,
    pub range: Range,
    limited_range: Range,
    pub class_name: String,
}

impl Default for SimpleClass {
    #[allow(clippy::approx_constant)]
    fn default() -> Self {
        Self {
            a: 'a',
            b: 0x1234,
            c: -1,
            d: 3.14,
            range: (-10, 10),
            limited_range: (-10, 10),
            class_name: "SimpleClass".to_string(),
        }
    }
}

impl SimpleClass {
    pub fn limited_range(&self) -> Range {
        self.limited_range
    }
}

/// Store with `start` raised to at least `-RANGE_LIMIT` and `end` lowered
/// to at most `RANGE_LIMIT`; each bound is clamped on one side only.
fn clamp_into(range: &mut Range, start: i64, end: i64) {
    *range = (start.max(-RANGE_LIMIT), end.min(RANGE_LIMIT));
}

/// Per-field bindings of a [`SimpleClass`] in mode `M`.
struct SimpleFields<'a, M: Mode> {
    a: M::Ref<'a, char>,
    b: M::Ref<'a, i16>,
    c: M::Ref<'a, i32>,
    d: M::Ref<'a, f32>,
    range: M::Ref<'a, Range>,
    limited_range: M::Ref<'a, Range>,
    class_name: M::Ref<'a, String>,
}

fn declare_simple<M: Mode>(f: SimpleFields<'_, M>) -> Properties<'_> {
    Properties::new()
        .category("Primitive types")
        .bind("a", f.a)
        .bind("b", f.b)
        .bind("c", f.c)
        .bind("d", f.d)
        .category("Complex types")
        .bind("Range", f.range)
        .property(M::bind_custom::<Range, _, _, _>(
            "Limited Range",
            f.limited_range,
            |range, out| *out = Value::borrowed(range),
            |range, input| {
                let (start, end) = input.get::<Range>()?;
                clamp_into(range, start, end);
                Ok(())
            },
        ))
        .bind("Class Name", f.class_name)
}

impl Reflect for SimpleClass {
    fn properties(&mut self) -> Properties<'_> {
        let Self {
            a,
            b,
            c,
            d,
            range,
            limited_range,
            class_name,
        } = self;
        declare_simple::<Mutable>(SimpleFields {
            a,
            b,
            c,
            d,
            range,
            limited_range,
            class_name,
        })
    }

    fn properties_ref(&self) -> Properties<'_> {
        let Self {
            a,
            b,
            c,
            d,
            range,
            limited_range,
            class_name,
        } = self;
        declare_simple::<ReadOnly>(SimpleFields {
            a,
            b,
            c,
            d,
            range,
            limited_range,
            class_name,
        })
    }
}

/// Class name constant followed by two coordinates.
fn declare_point<'a, M: Mode, T: Any + Clone>(
    class_name: &'static str,
    x: M::Ref<'a, T>,
    y: M::Ref<'a, T>,
) -> Properties<'a> {
    Properties::new()
        .constant("ClassName", class_name)
        .bind("x", x)
        .bind("y", y)
}

/// Integer point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const CLASS_NAME: &'static str = "Point";

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Reflect for Point {
    fn properties(&mut self) -> Properties<'_> {
        declare_point::<Mutable, _>(Self::CLASS_NAME, &mut self.x, &mut self.y)
    }

    fn properties_ref(&self) -> Properties<'_> {
        declare_point::<ReadOnly, _>(Self::CLASS_NAME, &self.x, &self.y)
    }
}

/// Floating-point point.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pointf {
    pub x: f32,
    pub y: f32,
}

impl Pointf {
    pub const CLASS_NAME: &'static str = "Pointf";

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Reflect for Pointf {
    fn properties(&mut self) -> Properties<'_> {
        declare_point::<Mutable, _>(Self::CLASS_NAME, &mut self.x, &mut self.y)
    }

    fn properties_ref(&self) -> Properties<'_> {
        declare_point::<ReadOnly, _>(Self::CLASS_NAME, &self.x, &self.y)
    }
}

/// Demo object selected on the command line.
pub enum Demo {
    Simple(SimpleClass),
    Point(Point),
    Pointf(Pointf),
}

impl Demo {
    /// Object names accepted by [`Demo::by_name`].
    pub const NAMES: [&'static str; 3] = ["simple", "point", "pointf"];

    /// Default-constructed object by name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "simple" | "s" => Some(Self::Simple(SimpleClass::default())),
            "point" | "p" => Some(Self::Point(Point::default())),
            "pointf" | "pf" => Some(Self::Pointf(Pointf::default())),
            _ => None,
        }
    }

    /// Check if the object has a text form that parses back.
    ///
    /// `SimpleClass` writes its categories as bare names, which the parser
    /// cannot consume.
    pub fn has_text_form(&self) -> bool {
        matches!(self, Self::Point(_) | Self::Pointf(_))
    }

    pub fn as_reflect(&self) -> &dyn Reflect {
        match self {
            Self::Simple(s) => s,
            Self::Point(p) => p,
            Self::Pointf(p) => p,
        }
    }

    pub fn as_reflect_mut(&mut self) -> &mut dyn Reflect {
        match self {
            Self::Simple(s) => s,
            Self::Point(p) => p,
            Self::Pointf(p) => p,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use propvis::Capability;

    #[test]
    fn test_simple_layout() {
        let s = SimpleClass::default();
        let props = s.properties_ref();
        assert_eq!(
            props.names().collect::<Vec<_>>(),
            [
                "Primitive types",
                "a",
                "b",
                "c",
                "d",
                "Complex types",
                "Range",
                "Limited Range",
                "Class Name"
            ]
        );
        assert!(props.iter().all(|p| !p.is_writable()));
    }

    #[test]
    fn test_limited_range_clamps() {
        let mut s = SimpleClass::default();
        {
            let mut props = s.properties();
            let p = props.find_mut("Limited Range").unwrap();
            assert_eq!(p.capability(), Capability::ReadWrite);
            p.set((-20000i64, 30000i64)).unwrap();
            assert_eq!(p.get::<Range>().unwrap(), (-1500, 1500));
        }
        assert_eq!(s.limited_range(), (-1500, 1500));

        let mut inner = (0, 0);
        clamp_into(&mut inner, -5, 5);
        assert_eq!(inner, (-5, 5));
        clamp_into(&mut inner, 2000, 3000);
        assert_eq!(inner, (2000, 1500));
    }

    #[test]
    fn test_point_class_name_is_constant() {
        let mut p = Point::new(5, 4);
        let props = p.properties();
        assert!(props[0].is_read_only());
        assert_eq!(props[0].get::<&str>().unwrap(), "Point");
        assert!(props[1].is_writable());
    }

    #[test]
    fn test_demo_by_name() {
        for name in Demo::NAMES {
            assert!(Demo::by_name(name).is_some());
        }
        assert!(Demo::by_name("circle").is_none());
    }

    #[test]
    fn test_text_form_only_for_points() {
        let with_text: Vec<_> = Demo::NAMES
            .into_iter()
            .filter(|name| Demo::by_name(name).is_some_and(|d| d.has_text_form()))
            .collect();
        assert_eq!(with_text, ["point", "pointf"]);
    }
}
