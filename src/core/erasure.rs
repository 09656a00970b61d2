//! Type-erasure strategies.
//!
//! A strategy decides how a typed value is packed into a [`Value`] carrier.
//! Unpacking is the same for every strategy, since the carrier records both
//! the type tag and the storage it was given.

use std::any::Any;

use crate::core::Value;
use crate::util::Result;

/// Size of a machine word in bytes.
pub const WORD_SIZE: usize = std::mem::size_of::<usize>();

/// Returns true if `T` fits in one machine word.
#[inline]
pub const fn fits_in_word<T>() -> bool {
    std::mem::size_of::<T>() <= WORD_SIZE
}

/// Strategy for packing typed values into carriers.
///
/// Implementors are uninhabited marker types; a property is generic over its
/// strategy and never holds one.
pub trait Erasure: 'static {
    /// Wrap a value observed through a shared binding.
    fn wrap<'a, T: Any + Clone>(value: &'a T) -> Value<'a>;

    /// Wrap a value observed through a mutable binding.
    ///
    /// A carrier that borrows the value exclusively lets [`Erasure::take`]
    /// move it out of the owning object.
    fn wrap_mut<'a, T: Any + Clone>(value: &'a mut T) -> Value<'a>;

    /// Copy the held value out.
    #[inline]
    fn unwrap<T: Any + Clone>(value: &Value<'_>) -> Result<T> {
        value.get()
    }

    /// Borrow the held value.
    #[inline]
    fn unwrap_ref<'v, T: Any>(value: &'v Value<'_>) -> Result<&'v T> {
        value.downcast_ref()
    }

    /// Mutably borrow the held value.
    #[inline]
    fn unwrap_mut<'v, T: Any>(value: &'v mut Value<'_>) -> Result<&'v mut T> {
        value.downcast_mut()
    }

    /// Move the held value out.
    #[inline]
    fn take<T: Any + Default>(value: &mut Value<'_>) -> Result<T> {
        value.take()
    }

    /// Check the type tag.
    #[inline]
    fn is<T: Any>(value: &Value<'_>) -> bool {
        value.is::<T>()
    }
}

/// Copies values that fit in a word, borrows anything larger.
///
/// Primitive scalars land inline in the carrier. Other word-sized types are
/// boxed. Wider values (strings, ranges, aggregates) are never copied on
/// read; the carrier points at the object's own storage.
#[derive(Debug)]
pub enum SmallRef {}

impl Erasure for SmallRef {
    fn wrap<'a, T: Any + Clone>(value: &'a T) -> Value<'a> {
        if fits_in_word::<T>() {
            Value::new(value.clone())
        } else {
            Value::borrowed(value)
        }
    }

    fn wrap_mut<'a, T: Any + Clone>(value: &'a mut T) -> Value<'a> {
        if fits_in_word::<T>() {
            Value::new(value.clone())
        } else {
            Value::borrowed_mut(value)
        }
    }
}

/// Always copies into an owned carrier.
///
/// Carriers never alias the reflected object, at the cost of one clone per
/// read and an allocation for every non-scalar.
#[derive(Debug)]
pub enum Boxed {}

impl Erasure for Boxed {
    fn wrap<'a, T: Any + Clone>(value: &'a T) -> Value<'a> {
        Value::new(value.clone())
    }

    fn wrap_mut<'a, T: Any + Clone>(value: &'a mut T) -> Value<'a> {
        Value::new(value.clone())
    }
}

/// Always borrows, never copies.
#[derive(Debug)]
pub enum ByRef {}

impl Erasure for ByRef {
    fn wrap<'a, T: Any + Clone>(value: &'a T) -> Value<'a> {
        Value::borrowed(value)
    }

    fn wrap_mut<'a, T: Any + Clone>(value: &'a mut T) -> Value<'a> {
        Value::borrowed_mut(value)
    }
}

/// Strategy used when none is named.
pub type DefaultErasure = SmallRef;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StorageKind;

    #[test]
    fn test_word_threshold() {
        assert!(fits_in_word::<u8>());
        assert!(fits_in_word::<usize>());
        assert!(!fits_in_word::<String>());
        assert!(!fits_in_word::<(i64, i64)>());
    }

    #[test]
    fn test_small_ref_storage() {
        let c = -1i32;
        let name = String::from("SimpleClass");
        let pair = (1i16, 2i16);
        assert_eq!(SmallRef::wrap(&c).storage(), StorageKind::Inline);
        assert_eq!(SmallRef::wrap(&name).storage(), StorageKind::Borrowed);
        assert_eq!(SmallRef::wrap(&pair).storage(), StorageKind::Owned);
    }

    #[test]
    fn test_boxed_never_borrows() {
        let name = String::from("x");
        let v = Boxed::wrap(&name);
        assert_eq!(v.storage(), StorageKind::Owned);
        assert_eq!(Boxed::unwrap::<String>(&v).unwrap(), "x");
    }

    #[test]
    fn test_by_ref_always_borrows() {
        let mut c = 3u8;
        assert_eq!(ByRef::wrap(&c).storage(), StorageKind::Borrowed);
        let mut v = ByRef::wrap_mut(&mut c);
        assert_eq!(v.storage(), StorageKind::BorrowedMut);
        *ByRef::unwrap_mut::<u8>(&mut v).unwrap() = 9;
        drop(v);
        assert_eq!(c, 9);
    }

    #[test]
    fn test_take_through_wrap_mut() {
        let mut name = String::from("moved");
        let mut v = SmallRef::wrap_mut(&mut name);
        assert_eq!(SmallRef::take::<String>(&mut v).unwrap(), "moved");
        drop(v);
        assert_eq!(name, "");
    }
}
