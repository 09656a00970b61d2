//! Opaque value carrier.
//!
//! A [`Value`] holds one value of any `'static` type together with its
//! runtime type tag. It either owns the value or borrows it from the object a
//! property reflects; the lifetime `'a` ties a borrowing carrier to that
//! object.

use std::any::{Any, TypeId};
use std::fmt;

use crate::util::{Error, Result, Scalar};

/// Where a carrier keeps its value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StorageKind {
    /// Nothing stored.
    Empty,
    /// Primitive scalar held by value, no allocation.
    Inline,
    /// Boxed value owned by the carrier.
    Owned,
    /// Shared borrow of external storage.
    Borrowed,
    /// Exclusive borrow of external storage.
    BorrowedMut,
}

/// Type-erased value with a runtime type tag.
pub struct Value<'a> {
    storage: Storage<'a>,
}

enum Storage<'a> {
    Empty,
    Inline(Scalar),
    Owned {
        value: Box<dyn Any>,
        type_name: &'static str,
    },
    Borrowed {
        value: &'a dyn Any,
        type_name: &'static str,
        detach: DetachFn,
    },
    BorrowedMut {
        value: &'a mut dyn Any,
        type_name: &'static str,
        detach: DetachFn,
    },
}

/// Clones a borrowed value into an owning carrier.
type DetachFn = fn(&dyn Any) -> Result<Value<'static>>;

fn detach<T: Any + Clone>(value: &dyn Any) -> Result<Value<'static>> {
    value
        .downcast_ref::<T>()
        .map(|v| Value::new(v.clone()))
        .ok_or_else(|| Error::mismatch::<T>("<detached>"))
}

impl<'a> Value<'a> {
    /// Create an empty carrier.
    pub const fn empty() -> Self {
        Self {
            storage: Storage::Empty,
        }
    }

    /// Create an owning carrier. Scalars are held inline, anything else is boxed.
    pub fn new<T: Any>(value: T) -> Self {
        match Scalar::from_any(&value) {
            Some(scalar) => Self::from_scalar(scalar),
            None => Self::boxed(value),
        }
    }

    /// Create an owning carrier that always boxes, even for scalars.
    pub fn boxed<T: Any>(value: T) -> Self {
        Self {
            storage: Storage::Owned {
                value: Box::new(value),
                type_name: std::any::type_name::<T>(),
            },
        }
    }

    /// Create an inline carrier from a scalar.
    pub const fn from_scalar(scalar: Scalar) -> Self {
        Self {
            storage: Storage::Inline(scalar),
        }
    }

    /// Create a carrier borrowing `value`.
    pub fn borrowed<T: Any + Clone>(value: &'a T) -> Self {
        Self {
            storage: Storage::Borrowed {
                value,
                type_name: std::any::type_name::<T>(),
                detach: detach::<T>,
            },
        }
    }

    /// Create a carrier exclusively borrowing `value`, allowing it to be moved out.
    pub fn borrowed_mut<T: Any + Clone>(value: &'a mut T) -> Self {
        Self {
            storage: Storage::BorrowedMut {
                value,
                type_name: std::any::type_name::<T>(),
                detach: detach::<T>,
            },
        }
    }

    /// Replace the content with an owned `value`.
    pub fn set<T: Any>(&mut self, value: T) {
        *self = Self::new(value);
    }

    /// Check if nothing is stored.
    pub fn is_empty(&self) -> bool {
        matches!(self.storage, Storage::Empty)
    }

    /// How the value is stored.
    pub fn storage(&self) -> StorageKind {
        match self.storage {
            Storage::Empty => StorageKind::Empty,
            Storage::Inline(_) => StorageKind::Inline,
            Storage::Owned { .. } => StorageKind::Owned,
            Storage::Borrowed { .. } => StorageKind::Borrowed,
            Storage::BorrowedMut { .. } => StorageKind::BorrowedMut,
        }
    }

    /// Check if the value lives outside the carrier.
    pub fn is_borrowed(&self) -> bool {
        matches!(
            self.storage,
            Storage::Borrowed { .. } | Storage::BorrowedMut { .. }
        )
    }

    /// Runtime type of the held value.
    pub fn type_id(&self) -> Option<TypeId> {
        self.as_any().map(|v| v.type_id())
    }

    /// Name of the held type, `"<empty>"` when nothing is stored.
    pub fn type_name(&self) -> &'static str {
        match &self.storage {
            Storage::Empty => "<empty>",
            Storage::Inline(scalar) => scalar.type_name(),
            Storage::Owned { type_name, .. }
            | Storage::Borrowed { type_name, .. }
            | Storage::BorrowedMut { type_name, .. } => *type_name,
        }
    }

    /// Check if the held value is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.as_any().is_some_and(|v| v.is::<T>())
    }

    /// The held value if it is a primitive scalar, whatever the storage.
    pub fn as_scalar(&self) -> Option<Scalar> {
        match &self.storage {
            Storage::Inline(scalar) => Some(*scalar),
            _ => self.as_any().and_then(Scalar::from_any),
        }
    }

    /// Shared view of the held value.
    pub fn as_any(&self) -> Option<&dyn Any> {
        match &self.storage {
            Storage::Empty => None,
            Storage::Inline(scalar) => Some(scalar.as_any()),
            Storage::Owned { value, .. } => Some(&**value),
            Storage::Borrowed { value, .. } => Some(*value),
            Storage::BorrowedMut { value, .. } => Some(&**value),
        }
    }

    /// Borrow the held value as `T`.
    pub fn downcast_ref<T: Any>(&self) -> Result<&T> {
        self.as_any()
            .and_then(|v| v.downcast_ref::<T>())
            .ok_or_else(|| Error::mismatch::<T>(self.type_name()))
    }

    /// Mutably borrow the held value as `T`.
    ///
    /// Fails with [`Error::SharedBorrow`] if the carrier only holds a shared borrow.
    pub fn downcast_mut<T: Any>(&mut self) -> Result<&mut T> {
        let actual = self.type_name();
        let is_t = self.is::<T>();
        let any: &mut dyn Any = match &mut self.storage {
            Storage::Empty => return Err(Error::mismatch::<T>(actual)),
            Storage::Borrowed { .. } if is_t => {
                return Err(Error::SharedBorrow(actual.to_string()))
            }
            Storage::Borrowed { .. } => return Err(Error::mismatch::<T>(actual)),
            Storage::Inline(scalar) => scalar.as_any_mut(),
            Storage::Owned { value, .. } => &mut **value,
            Storage::BorrowedMut { value, .. } => &mut **value,
        };
        any.downcast_mut::<T>()
            .ok_or_else(|| Error::mismatch::<T>(actual))
    }

    /// Copy the held value out as `T`.
    pub fn get<T: Any + Clone>(&self) -> Result<T> {
        self.downcast_ref::<T>().cloned()
    }

    /// Move the held value out as `T`, leaving the carrier empty.
    ///
    /// From an exclusive borrow this leaves `T::default()` in the borrowed
    /// storage, which callers must treat as consumed until reassigned.
    pub fn take<T: Any + Default>(&mut self) -> Result<T> {
        let actual = self.type_name();
        if !self.is::<T>() {
            return Err(Error::mismatch::<T>(actual));
        }
        match std::mem::replace(&mut self.storage, Storage::Empty) {
            Storage::Inline(mut scalar) => take_from(scalar.as_any_mut(), actual),
            Storage::Owned { value, .. } => value
                .downcast::<T>()
                .map(|v| *v)
                .map_err(|_| Error::mismatch::<T>(actual)),
            Storage::BorrowedMut { value, .. } => take_from(value, actual),
            shared => {
                self.storage = shared;
                Err(Error::SharedBorrow(actual.to_string()))
            }
        }
    }

    /// Release any borrow, cloning a borrowed value into the carrier.
    ///
    /// Owned and inline values move over untouched. The result no longer ties
    /// up the object or property it was read from, so it can be written back.
    pub fn into_owned(self) -> Result<Value<'static>> {
        let storage = match self.storage {
            Storage::Empty => Storage::Empty,
            Storage::Inline(scalar) => Storage::Inline(scalar),
            Storage::Owned { value, type_name } => Storage::Owned { value, type_name },
            Storage::Borrowed { value, detach, .. } => return detach(value),
            Storage::BorrowedMut { value, detach, .. } => return detach(&*value),
        };
        Ok(Value { storage })
    }

    /// Move the value out when the carrier owns it, clone it when borrowed.
    pub fn take_or_clone<T: Any + Clone>(&mut self) -> Result<T> {
        match std::mem::replace(&mut self.storage, Storage::Empty) {
            Storage::Owned { value, type_name } => match value.downcast::<T>() {
                Ok(v) => Ok(*v),
                Err(value) => {
                    self.storage = Storage::Owned { value, type_name };
                    Err(Error::mismatch::<T>(type_name))
                }
            },
            other => {
                self.storage = other;
                self.get()
            }
        }
    }
}

fn take_from<T: Any + Default>(any: &mut dyn Any, actual: &str) -> Result<T> {
    any.downcast_mut::<T>()
        .map(std::mem::take)
        .ok_or_else(|| Error::mismatch::<T>(actual))
}

impl Default for Value<'_> {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Scalar> for Value<'_> {
    fn from(scalar: Scalar) -> Self {
        Self::from_scalar(scalar)
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.storage {
            Storage::Empty => f.write_str("Value(<empty>)"),
            Storage::Inline(scalar) => write!(f, "Value({scalar:?})"),
            _ => write!(f, "Value({:?} {})", self.storage(), self.type_name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_is_inline() {
        let v = Value::new(42i32);
        assert_eq!(v.storage(), StorageKind::Inline);
        assert!(v.is::<i32>());
        assert!(!v.is::<i64>());
        assert_eq!(v.get::<i32>().unwrap(), 42);
        assert_eq!(v.type_name(), "i32");
    }

    #[test]
    fn test_non_scalar_is_boxed() {
        let v = Value::new(String::from("Point"));
        assert_eq!(v.storage(), StorageKind::Owned);
        assert_eq!(v.downcast_ref::<String>().unwrap(), "Point");
    }

    #[test]
    fn test_empty() {
        let v = Value::empty();
        assert!(v.is_empty());
        assert!(v.type_id().is_none());
        let err = v.get::<i32>().unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { ref actual, .. } if actual == "<empty>"));
    }

    #[test]
    fn test_mismatch() {
        let v = Value::new(1.5f32);
        let err = v.get::<f64>().unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
    }

    #[test]
    fn test_shared_borrow_is_not_mutable() {
        let s = String::from("abc");
        let mut v = Value::borrowed(&s);
        assert!(v.is_borrowed());
        assert!(matches!(v.downcast_mut::<String>(), Err(Error::SharedBorrow(_))));
        assert!(matches!(v.take::<String>(), Err(Error::SharedBorrow(_))));
        // The failed take leaves the borrow in place.
        assert_eq!(v.get::<String>().unwrap(), "abc");
    }

    #[test]
    fn test_take_from_exclusive_borrow() {
        let mut s = String::from("abc");
        {
            let mut v = Value::borrowed_mut(&mut s);
            v.downcast_mut::<String>().unwrap().push('d');
            assert_eq!(v.take::<String>().unwrap(), "abcd");
            assert!(v.is_empty());
        }
        assert!(s.is_empty());
    }

    #[test]
    fn test_take_or_clone() {
        let mut owned = Value::new(vec![1u8, 2, 3]);
        assert_eq!(owned.take_or_clone::<Vec<u8>>().unwrap(), vec![1, 2, 3]);
        assert!(owned.is_empty());

        let data = vec![4u8];
        let mut borrowed = Value::borrowed(&data);
        assert_eq!(borrowed.take_or_clone::<Vec<u8>>().unwrap(), vec![4]);
        assert!(!borrowed.is_empty());

        let mut wrong = Value::new(String::new());
        assert!(wrong.take_or_clone::<Vec<u8>>().is_err());
        assert!(wrong.is::<String>());
    }

    #[test]
    fn test_into_owned_outlives_source() {
        let detached = {
            let s = String::from("abc");
            let v = Value::borrowed(&s);
            v.into_owned().unwrap()
        };
        assert_eq!(detached.storage(), StorageKind::Owned);
        assert_eq!(detached.get::<String>().unwrap(), "abc");

        let mut x = 7u64;
        let v = Value::borrowed_mut(&mut x).into_owned().unwrap();
        assert_eq!(v.storage(), StorageKind::Inline);
        x = 8;
        assert_eq!(v.get::<u64>().unwrap(), 7);
        assert_eq!(x, 8);

        assert!(Value::empty().into_owned().unwrap().is_empty());
    }

    #[test]
    fn test_as_scalar() {
        let x = 7u64;
        assert_eq!(Value::borrowed(&x).as_scalar(), Some(Scalar::Uint64(7)));
        assert_eq!(Value::boxed(-3i8).as_scalar(), Some(Scalar::Int8(-3)));
        assert_eq!(Value::new("str").as_scalar(), None);
    }
}
