//! Access modes - keep write paths out of read-only traversals.
//!
//! A type declares its property list once, generic over [`Mode`], and builds
//! it from two entry points: with [`Mutable`] bindings (`&mut T`) and with
//! [`ReadOnly`] bindings (`&T`). Binding through `ReadOnly` never installs a
//! write operation, so a read-only traversal cannot mutate the object.
//!
//! ```
//! use propvis::{Mode, Mutable, Properties, ReadOnly};
//!
//! fn declare<'a, M: Mode>(x: M::Ref<'a, i32>) -> Properties<'a> {
//!     Properties::new().bind("x", x)
//! }
//!
//! let mut x = 5;
//! assert!(declare::<ReadOnly>(&x).iter().all(|p| !p.is_writable()));
//! assert!(declare::<Mutable>(&mut x).iter().all(|p| p.is_writable()));
//! ```

use std::any::Any;
use std::ops::Deref;

use super::Property;
use crate::core::{Erasure, Value};
use crate::util::Result;

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::Mutable {}
    impl Sealed for super::ReadOnly {}
    impl<T: ?Sized> Sealed for &T {}
    impl<T: ?Sized> Sealed for &mut T {}
}

/// Access mode selected by a traversal entry point.
pub trait Mode: sealed::Sealed + 'static {
    /// How state is bound in this mode: `&'a mut T` or `&'a T`.
    type Ref<'a, T: ?Sized + 'a>: Binding<'a, Target = T>;

    /// Run `action` on `context` only in [`Mutable`] mode.
    ///
    /// In [`ReadOnly`] mode `action` is dropped without being called and
    /// `None` is returned.
    fn exec_when_mutable<'a, T, R, F>(context: &mut Self::Ref<'a, T>, action: F) -> Option<R>
    where
        T: ?Sized + 'a,
        F: FnOnce(&mut T) -> R,
    {
        context.exec_when_mutable(action)
    }

    /// Field property: read-write in [`Mutable`], read-only in [`ReadOnly`].
    fn bind<'a, T, E>(name: &'a str, binding: Self::Ref<'a, T>) -> Property<'a, E>
    where
        T: Any + Clone,
        E: Erasure,
    {
        binding.into_field(name)
    }

    /// Custom property; in [`ReadOnly`] `write` is dropped unused.
    fn bind_custom<'a, T, E, R, W>(
        name: &'a str,
        binding: Self::Ref<'a, T>,
        read: R,
        write: W,
    ) -> Property<'a, E>
    where
        T: ?Sized + 'a,
        E: Erasure,
        R: for<'p> Fn(&'p T, &mut Value<'p>) + 'a,
        W: FnMut(&mut T, &Value<'_>) -> Result<()> + 'a,
    {
        binding.into_custom(name, read, write)
    }
}

/// Bindings are exclusive borrows; properties get write operations.
#[derive(Debug)]
pub enum Mutable {}

/// Bindings are shared borrows; properties are read-only.
#[derive(Debug)]
pub enum ReadOnly {}

impl Mode for Mutable {
    type Ref<'a, T: ?Sized + 'a> = &'a mut T;
}

impl Mode for ReadOnly {
    type Ref<'a, T: ?Sized + 'a> = &'a T;
}

/// A borrow of state that can become a property.
///
/// Implemented for `&'a mut T` (read-write) and `&'a T` (read-only).
pub trait Binding<'a>: Deref + Sized + sealed::Sealed {
    /// Property reading and, if mutable, writing the bound value.
    fn into_field<E: Erasure>(self, name: &'a str) -> Property<'a, E>
    where
        Self::Target: Any + Clone;

    /// Property with custom operations; `write` is dropped for shared bindings.
    fn into_custom<E, R, W>(self, name: &'a str, read: R, write: W) -> Property<'a, E>
    where
        E: Erasure,
        R: for<'p> Fn(&'p Self::Target, &mut Value<'p>) + 'a,
        W: FnMut(&mut Self::Target, &Value<'_>) -> Result<()> + 'a;

    /// Run `action` only if the binding is mutable.
    fn exec_when_mutable<R, F>(&mut self, action: F) -> Option<R>
    where
        F: FnOnce(&mut Self::Target) -> R;
}

impl<'a, T: ?Sized + 'a> Binding<'a> for &'a mut T {
    fn into_field<E: Erasure>(self, name: &'a str) -> Property<'a, E>
    where
        T: Any + Clone,
    {
        Property::field(name, self)
    }

    fn into_custom<E, R, W>(self, name: &'a str, read: R, write: W) -> Property<'a, E>
    where
        E: Erasure,
        R: for<'p> Fn(&'p T, &mut Value<'p>) + 'a,
        W: FnMut(&mut T, &Value<'_>) -> Result<()> + 'a,
    {
        Property::custom(name, self, read, write)
    }

    fn exec_when_mutable<R, F>(&mut self, action: F) -> Option<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        Some(action(&mut **self))
    }
}

impl<'a, T: ?Sized + 'a> Binding<'a> for &'a T {
    fn into_field<E: Erasure>(self, name: &'a str) -> Property<'a, E>
    where
        T: Any + Clone,
    {
        Property::read_only(name, self)
    }

    fn into_custom<E, R, W>(self, name: &'a str, read: R, _write: W) -> Property<'a, E>
    where
        E: Erasure,
        R: for<'p> Fn(&'p T, &mut Value<'p>) + 'a,
        W: FnMut(&mut T, &Value<'_>) -> Result<()> + 'a,
    {
        Property::custom_ref(name, self, read)
    }

    fn exec_when_mutable<R, F>(&mut self, _action: F) -> Option<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        None
    }
}
