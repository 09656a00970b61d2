//! A named conduit to one piece of external state.

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

use tracing::warn;

use super::accessor::{Accessor, Computed, ComputedRef, Constant, Field, Getter, Setter, Shared};
use super::mode::Binding;
use crate::core::{DefaultErasure, Erasure, Value};
use crate::util::{Error, Result};

/// What a property allows, derived from the operations it was declared with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Capability {
    /// Neither readable nor writable: a label or category marker.
    NameOnly,
    /// Readable only.
    ReadOnly,
    /// Writable only.
    WriteOnly,
    /// Readable and writable.
    ReadWrite,
}

impl Capability {
    /// Build from the two flags.
    pub const fn from_flags(readable: bool, writable: bool) -> Self {
        match (readable, writable) {
            (false, false) => Self::NameOnly,
            (true, false) => Self::ReadOnly,
            (false, true) => Self::WriteOnly,
            (true, true) => Self::ReadWrite,
        }
    }

    /// Check if reads are allowed.
    pub const fn is_readable(self) -> bool {
        matches!(self, Self::ReadOnly | Self::ReadWrite)
    }

    /// Check if writes are allowed.
    pub const fn is_writable(self) -> bool {
        matches!(self, Self::WriteOnly | Self::ReadWrite)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NameOnly => "name-only",
            Self::ReadOnly => "read-only",
            Self::WriteOnly => "write-only",
            Self::ReadWrite => "read-write",
        })
    }
}

/// A named, optionally readable and optionally writable view of external state.
///
/// A property borrows what it reflects for `'a`, so it is built right before
/// a traversal and dropped right after. The name is borrowed as well.
///
/// `read` and `write` check the capability first and fail with
/// [`Error::NotReadable`] / [`Error::NotWritable`] when it is missing;
/// visitors are expected to test [`is_readable`](Self::is_readable) and
/// [`is_writable`](Self::is_writable) before calling them.
pub struct Property<'a, E: Erasure = DefaultErasure> {
    name: &'a str,
    accessor: Option<Box<dyn Accessor<E> + 'a>>,
}

impl<'a, E: Erasure> Property<'a, E> {
    /// Name-only property, used as a category or separator.
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            accessor: None,
        }
    }

    /// Property backed by any [`Accessor`].
    pub fn with_accessor<A: Accessor<E> + 'a>(name: &'a str, accessor: A) -> Self {
        Self {
            name,
            accessor: Some(Box::new(accessor)),
        }
    }

    /// Read-only property owning a literal value.
    pub fn constant<T: Any + Clone>(name: &'a str, value: T) -> Self {
        Self::with_accessor(name, Constant(value))
    }

    /// Read-only property borrowing `value`.
    pub fn read_only<T: Any + Clone>(name: &'a str, value: &'a T) -> Self {
        Self::with_accessor(name, Shared(value))
    }

    /// Read-write property bound to `field`.
    pub fn field<T: Any + Clone>(name: &'a str, field: &'a mut T) -> Self {
        Self::with_accessor(name, Field(field))
    }

    /// Property bound to `binding`: read-write through a mutable binding,
    /// read-only through a shared one.
    pub fn bind<B>(name: &'a str, binding: B) -> Self
    where
        B: Binding<'a>,
        B::Target: Any + Clone,
    {
        binding.into_field(name)
    }

    /// Read-write property bound to `field` with a custom read; writes
    /// store the carried `T` as [`field`](Self::field) does.
    pub fn field_with_read<T, R>(name: &'a str, field: &'a mut T, read: R) -> Self
    where
        T: Any + Clone,
        R: for<'p> Fn(&'p T, &mut Value<'p>) + 'a,
    {
        Self::custom(name, field, read, |f, input| {
            *f = E::unwrap::<T>(input)?;
            Ok(())
        })
    }

    /// Read-write property bound to `field` with a custom write; reads wrap
    /// the field as [`field`](Self::field) does.
    pub fn field_with_write<T, W>(name: &'a str, field: &'a mut T, write: W) -> Self
    where
        T: Any + Clone,
        W: FnMut(&mut T, &Value<'_>) -> Result<()> + 'a,
    {
        Self::custom(name, field, |f, out| *out = E::wrap(f), write)
    }

    /// Read-write property with custom operations over `state`.
    ///
    /// `write` owns any validation: clamp, or reject with [`Error::Rejected`],
    /// before committing to `state`.
    pub fn custom<S, R, W>(name: &'a str, state: &'a mut S, read: R, write: W) -> Self
    where
        S: ?Sized + 'a,
        R: for<'p> Fn(&'p S, &mut Value<'p>) + 'a,
        W: FnMut(&mut S, &Value<'_>) -> Result<()> + 'a,
    {
        Self::with_accessor(name, Computed { state, read, write })
    }

    /// Read-only property with a custom read over `state`.
    pub fn custom_ref<S, R>(name: &'a str, state: &'a S, read: R) -> Self
    where
        S: ?Sized + 'a,
        R: for<'p> Fn(&'p S, &mut Value<'p>) + 'a,
    {
        Self::with_accessor(name, ComputedRef { state, read })
    }

    /// Read-only property whose value is computed by `get` on every read.
    pub fn getter<T, F>(name: &'a str, get: F) -> Self
    where
        T: Any,
        F: Fn() -> T + 'a,
    {
        Self::with_accessor(
            name,
            Getter {
                get,
                _marker: PhantomData,
            },
        )
    }

    /// Write-only property handing every written `T` to `set`.
    pub fn setter<T, F>(name: &'a str, set: F) -> Self
    where
        T: Any + Clone,
        F: FnMut(T) -> Result<()> + 'a,
    {
        Self::with_accessor(
            name,
            Setter {
                set,
                _marker: PhantomData,
            },
        )
    }

    /// Declared name.
    #[inline]
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Check if a read operation was declared.
    pub fn is_readable(&self) -> bool {
        self.accessor.as_ref().is_some_and(|a| a.is_readable())
    }

    /// Check if a write operation was declared.
    pub fn is_writable(&self) -> bool {
        self.accessor.as_ref().is_some_and(|a| a.is_writable())
    }

    /// Check if neither operation was declared.
    pub fn is_name_only(&self) -> bool {
        !self.is_readable() && !self.is_writable()
    }

    /// Check if only the read operation was declared.
    pub fn is_read_only(&self) -> bool {
        self.is_readable() && !self.is_writable()
    }

    /// Check if only the write operation was declared.
    pub fn is_write_only(&self) -> bool {
        !self.is_readable() && self.is_writable()
    }

    /// Current capability state.
    pub fn capability(&self) -> Capability {
        Capability::from_flags(self.is_readable(), self.is_writable())
    }

    /// Fill `out` with the current value.
    pub fn read<'p>(&'p self, out: &mut Value<'p>) -> Result<()> {
        match &self.accessor {
            Some(accessor) if accessor.is_readable() => accessor.read(out),
            _ => {
                warn!(property = self.name, "read on a property without a read operation");
                Err(Error::NotReadable(self.name.to_string()))
            }
        }
    }

    /// Fill `out` through an exclusive borrow of the property.
    ///
    /// For a field the strategy's mutable wrap is used, so a borrowing
    /// carrier lets [`Value::take`] move the value out of the object.
    pub fn read_mut<'p>(&'p mut self, out: &mut Value<'p>) -> Result<()> {
        match &mut self.accessor {
            Some(accessor) if accessor.is_readable() => accessor.read_mut(out),
            _ => {
                warn!(property = self.name, "read on a property without a read operation");
                Err(Error::NotReadable(self.name.to_string()))
            }
        }
    }

    /// Read into a carrier that holds no borrow of the property, ready to be
    /// changed and written back.
    pub fn read_owned(&self) -> Result<Value<'static>> {
        let mut out = Value::empty();
        self.read(&mut out)?;
        out.into_owned()
    }

    /// Store the value held by `input`.
    pub fn write(&mut self, input: &Value<'_>) -> Result<()> {
        match &mut self.accessor {
            Some(accessor) if accessor.is_writable() => accessor.write(input),
            _ => {
                warn!(property = self.name, "write on a property without a write operation");
                Err(Error::NotWritable(self.name.to_string()))
            }
        }
    }

    /// Store the value held by `input`, moving it out when the carrier owns
    /// it and copying otherwise.
    pub fn write_from(&mut self, input: &mut Value<'_>) -> Result<()> {
        match &mut self.accessor {
            Some(accessor) if accessor.is_writable() => accessor.write_from(input),
            _ => {
                warn!(property = self.name, "write on a property without a write operation");
                Err(Error::NotWritable(self.name.to_string()))
            }
        }
    }

    /// Read and unwrap as `T`.
    pub fn get<T: Any + Clone>(&self) -> Result<T> {
        let mut value = Value::empty();
        self.read(&mut value)?;
        E::unwrap(&value)
    }

    /// Wrap `value` and write it.
    pub fn set<T: Any>(&mut self, value: T) -> Result<()> {
        self.write_from(&mut Value::new(value))
    }
}

impl<E: Erasure> fmt::Debug for Property<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .field("capability", &self.capability())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_flags() {
        assert_eq!(Capability::from_flags(false, false), Capability::NameOnly);
        assert_eq!(Capability::from_flags(true, true), Capability::ReadWrite);
        assert!(Capability::ReadOnly.is_readable());
        assert!(!Capability::ReadOnly.is_writable());
        assert_eq!(Capability::WriteOnly.to_string(), "write-only");
    }

    #[test]
    fn test_name_only() {
        let p: Property = Property::new("Primitive types");
        assert_eq!(p.name(), "Primitive types");
        assert!(p.is_name_only());
        assert_eq!(p.capability(), Capability::NameOnly);
        let mut out = Value::empty();
        assert!(matches!(p.read(&mut out), Err(Error::NotReadable(ref n)) if n == "Primitive types"));
    }

    #[test]
    fn test_field_read_write() {
        let mut c = -1i32;
        {
            let mut p: Property = Property::field("c", &mut c);
            assert_eq!(p.capability(), Capability::ReadWrite);
            assert_eq!(p.get::<i32>().unwrap(), -1);
            p.write(&Value::new(1i32)).unwrap();
            assert_eq!(p.get::<i32>().unwrap(), 1);
            assert!(matches!(p.set(1.0f32), Err(Error::TypeMismatch { .. })));
        }
        assert_eq!(c, 1);
    }

    #[test]
    fn test_constant_is_read_only() {
        let mut p: Property = Property::constant("ClassName", "Point");
        assert!(p.is_read_only());
        assert_eq!(p.get::<&str>().unwrap(), "Point");
        assert!(matches!(p.set("Other"), Err(Error::NotWritable(_))));
    }

    #[test]
    fn test_setter_is_write_only() {
        let mut seen = Vec::new();
        {
            let mut p: Property = Property::setter("log", |line: String| {
                seen.push(line);
                Ok(())
            });
            assert!(p.is_write_only());
            p.set(String::from("first")).unwrap();
            assert!(p.get::<String>().is_err());
        }
        assert_eq!(seen, ["first"]);
    }

    #[test]
    fn test_debug() {
        let p: Property = Property::getter("answer", || 42u8);
        let s = format!("{p:?}");
        assert!(s.contains("answer"));
        assert!(s.contains("ReadOnly"));
    }
}
