//! Integration tests for the value carrier and the erasure strategies.

use std::cell::Cell;

use propvis::{Boxed, ByRef, Erasure, Error, Property, SmallRef, StorageKind, Value};

#[test]
fn test_type_tag_is_strategy_independent() {
    let c = -1i32;
    let name = String::from("SimpleClass");

    for v in [SmallRef::wrap(&c), Boxed::wrap(&c), ByRef::wrap(&c)] {
        assert!(v.is::<i32>());
        assert!(!v.is::<u32>());
        assert_eq!(v.get::<i32>().expect("i32"), -1);
    }
    for v in [SmallRef::wrap(&name), Boxed::wrap(&name), ByRef::wrap(&name)] {
        assert!(SmallRef::is::<String>(&v));
        assert!(!SmallRef::is::<&str>(&v));
    }
}

#[test]
fn test_wide_values_are_borrowed() {
    // Wider than a word: the carrier points at the cell, so later changes show.
    let wide = Cell::new([1u64, 2]);
    let v = SmallRef::wrap(&wide);
    assert!(v.is_borrowed());
    wide.set([3, 4]);
    let seen = SmallRef::unwrap_ref::<Cell<[u64; 2]>>(&v).expect("cell").get();
    assert_eq!(seen, [3, 4]);
}

#[test]
fn test_narrow_values_are_copied() {
    let narrow = Cell::new(1u32);
    let v = SmallRef::wrap(&narrow);
    assert_eq!(v.storage(), StorageKind::Owned);
    narrow.set(9);
    let seen = SmallRef::unwrap_ref::<Cell<u32>>(&v).expect("cell").get();
    assert_eq!(seen, 1);
}

#[test]
fn test_boxed_copies_wide_values() {
    let wide = Cell::new([1u64, 2]);
    let v = Boxed::wrap(&wide);
    wide.set([3, 4]);
    assert_eq!(Boxed::unwrap::<Cell<[u64; 2]>>(&v).expect("cell").get(), [1, 2]);
}

#[test]
fn test_mismatch_is_reported() {
    let v = Value::new(2.5f32);
    match v.get::<f64>() {
        Err(Error::TypeMismatch { expected, actual }) => {
            assert_eq!(expected, "f64");
            assert_eq!(actual, "f32");
        }
        other => panic!("expected a type mismatch, got {:?}", other),
    }
}

#[test]
fn test_take_moves_out_of_object() {
    let mut name = String::from("Class Name");
    let mut v = ByRef::wrap_mut(&mut name);
    let taken = ByRef::take::<String>(&mut v).expect("take");
    assert_eq!(taken, "Class Name");
    assert!(v.is_empty());
    drop(v);
    assert!(name.is_empty());
}

#[test]
fn test_strategy_applies_to_properties() {
    let name = String::from("Point");

    let p: Property<'_, SmallRef> = Property::read_only("name", &name);
    let mut out = Value::empty();
    p.read(&mut out).expect("read");
    assert_eq!(out.storage(), StorageKind::Borrowed);

    let p: Property<'_, Boxed> = Property::read_only("name", &name);
    let mut out = Value::empty();
    p.read(&mut out).expect("read");
    assert_eq!(out.storage(), StorageKind::Owned);
    assert_eq!(p.get::<String>().expect("get"), "Point");
}
