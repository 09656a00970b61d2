//! Integration tests for traversal, access modes and declaring types.

use propvis::{visit, Mode, Mutable, Properties, Property, ReadOnly, Reflect, Value, Visitor};

type Range = (i64, i64);

/// Object with a plain counter and a range clamped to [-1500, 1500].
#[derive(Debug, Default, PartialEq)]
struct Limits {
    counter: u32,
    range: Range,
}

fn declare<'a, M: Mode>(counter: M::Ref<'a, u32>, range: M::Ref<'a, Range>) -> Properties<'a> {
    Properties::new()
        .category("Limits")
        .bind("counter", counter)
        .property(M::bind_custom::<Range, _, _, _>(
            "Limited Range",
            range,
            |r, out| *out = Value::borrowed(r),
            |r, input| {
                let (start, end) = input.get::<Range>()?;
                *r = (start.max(-1500), end.min(1500));
                Ok(())
            },
        ))
}

impl Reflect for Limits {
    fn properties(&mut self) -> Properties<'_> {
        declare::<Mutable>(&mut self.counter, &mut self.range)
    }

    fn properties_ref(&self) -> Properties<'_> {
        declare::<ReadOnly>(&self.counter, &self.range)
    }
}

/// Writes a fixed value into every writable property it understands.
fn overwrite(p: &mut Property<'_>) -> bool {
    if !p.is_writable() {
        return true;
    }
    let mut current = Value::empty();
    let is_range = p.read(&mut current).is_ok() && current.is::<Range>();
    drop(current);
    let result = if is_range {
        p.set((-20000i64, 30000i64))
    } else {
        p.set(42u32)
    };
    result.is_ok()
}

#[test]
fn test_early_termination() {
    let mut calls = 0;
    let mut visitor: Visitor = Visitor::new(|_| {
        calls += 1;
        calls < 3
    });
    let props: Properties = (0..5).map(|_| Property::new("p")).collect();
    assert!(!visit(&mut visitor, props));
    drop(visitor);
    assert_eq!(calls, 3);
}

#[test]
fn test_all_true_visits_everything() {
    let mut names = Vec::new();
    let mut visitor: Visitor = Visitor::new(|p| {
        names.push(p.name().to_string());
        true
    });
    let props: Properties = ["a", "b", "c"].into_iter().map(Property::new).collect();
    assert!(visit(&mut visitor, props));
    drop(visitor);
    assert_eq!(names, ["a", "b", "c"]);
}

#[test]
fn test_accumulating_visitor() {
    let (mut x, mut y) = (5i32, 10i32);
    let mut sum = 0;
    let mut visitor: Visitor = Visitor::new(|p| {
        sum += p.get::<i32>().expect("i32");
        true
    });
    let props = Properties::new().field("x", &mut x).field("y", &mut y);
    assert!(visit(&mut visitor, props));
    drop(visitor);
    assert_eq!(sum, 15);
}

#[test]
fn test_read_only_traversal_never_writes() {
    let mut limits = Limits {
        counter: 1,
        range: (-10, 10),
    };

    let mut writable = 0;
    let complete = limits.visit_properties_ref(&mut Visitor::new(|p| {
        writable += usize::from(p.is_writable());
        overwrite(p)
    }));
    assert!(complete);
    assert_eq!(writable, 0);
    assert_eq!(limits.counter, 1);
    assert_eq!(limits.range, (-10, 10));

    assert!(limits.visit_properties(&mut Visitor::new(overwrite)));
    assert_eq!(limits.counter, 42);
}

#[test]
fn test_limited_range_clamps() {
    let mut limits = Limits::default();
    assert!(limits.visit_properties(&mut Visitor::new(overwrite)));
    assert_eq!(limits.range, (-1500, 1500));

    let props = limits.properties_ref();
    let range = props.find("Limited Range").expect("declared");
    assert_eq!(range.get::<Range>().expect("range"), (-1500, 1500));
}

#[test]
fn test_exec_when_mutable() {
    fn reset<M: Mode>(mut counter: M::Ref<'_, u32>) -> bool {
        M::exec_when_mutable::<u32, _, _>(&mut counter, |c| *c = 0).is_some()
    }

    let mut counter = 9u32;
    assert!(!reset::<ReadOnly>(&counter));
    assert_eq!(counter, 9);
    assert!(reset::<Mutable>(&mut counter));
    assert_eq!(counter, 0);
}
