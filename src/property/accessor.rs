//! Read and write operations behind a property.

use std::any::Any;
use std::marker::PhantomData;

use crate::core::{Erasure, Value};
use crate::util::{Error, Result};

/// The operations a property exposes over the state it reflects.
///
/// A property's capability is whatever its accessor reports. `read` is only
/// called when [`is_readable`](Accessor::is_readable) returns true, and
/// `write`/`write_from` only when [`is_writable`](Accessor::is_writable) does.
pub trait Accessor<E: Erasure> {
    /// Check if `read` is supported.
    fn is_readable(&self) -> bool;

    /// Check if `write` is supported.
    fn is_writable(&self) -> bool;

    /// Fill `out` with the current value.
    fn read<'p>(&'p self, out: &mut Value<'p>) -> Result<()>;

    /// Fill `out` through an exclusive borrow, so the carrier may move the
    /// value out of the object. Falls back to [`read`](Accessor::read).
    fn read_mut<'p>(&'p mut self, out: &mut Value<'p>) -> Result<()> {
        self.read(out)
    }

    /// Store the value held by `input`.
    fn write(&mut self, input: &Value<'_>) -> Result<()>;

    /// Store the value held by `input`, moving it out when the carrier allows.
    fn write_from(&mut self, input: &mut Value<'_>) -> Result<()> {
        self.write(input)
    }
}

fn no_read() -> Error {
    Error::other("accessor has no read operation")
}

fn no_write() -> Error {
    Error::other("accessor has no write operation")
}

/// Owned literal.
pub(crate) struct Constant<T>(pub(crate) T);

impl<E: Erasure, T: Any + Clone> Accessor<E> for Constant<T> {
    fn is_readable(&self) -> bool {
        true
    }

    fn is_writable(&self) -> bool {
        false
    }

    fn read<'p>(&'p self, out: &mut Value<'p>) -> Result<()> {
        *out = E::wrap(&self.0);
        Ok(())
    }

    fn write(&mut self, _input: &Value<'_>) -> Result<()> {
        Err(no_write())
    }
}

/// Shared borrow of external state.
pub(crate) struct Shared<'a, T: ?Sized>(pub(crate) &'a T);

impl<E: Erasure, T: Any + Clone> Accessor<E> for Shared<'_, T> {
    fn is_readable(&self) -> bool {
        true
    }

    fn is_writable(&self) -> bool {
        false
    }

    fn read<'p>(&'p self, out: &mut Value<'p>) -> Result<()> {
        *out = E::wrap(self.0);
        Ok(())
    }

    fn write(&mut self, _input: &Value<'_>) -> Result<()> {
        Err(no_write())
    }
}

/// Exclusive borrow of a field, read and written as `T`.
pub(crate) struct Field<'a, T>(pub(crate) &'a mut T);

impl<E: Erasure, T: Any + Clone> Accessor<E> for Field<'_, T> {
    fn is_readable(&self) -> bool {
        true
    }

    fn is_writable(&self) -> bool {
        true
    }

    fn read<'p>(&'p self, out: &mut Value<'p>) -> Result<()> {
        *out = E::wrap(&*self.0);
        Ok(())
    }

    fn read_mut<'p>(&'p mut self, out: &mut Value<'p>) -> Result<()> {
        *out = E::wrap_mut(&mut *self.0);
        Ok(())
    }

    fn write(&mut self, input: &Value<'_>) -> Result<()> {
        *self.0 = E::unwrap::<T>(input)?;
        Ok(())
    }

    fn write_from(&mut self, input: &mut Value<'_>) -> Result<()> {
        *self.0 = input.take_or_clone::<T>()?;
        Ok(())
    }
}

/// Computed read and write over a piece of state.
pub(crate) struct Computed<'a, S: ?Sized, R, W> {
    pub(crate) state: &'a mut S,
    pub(crate) read: R,
    pub(crate) write: W,
}

impl<E, S, R, W> Accessor<E> for Computed<'_, S, R, W>
where
    E: Erasure,
    S: ?Sized,
    R: for<'p> Fn(&'p S, &mut Value<'p>),
    W: FnMut(&mut S, &Value<'_>) -> Result<()>,
{
    fn is_readable(&self) -> bool {
        true
    }

    fn is_writable(&self) -> bool {
        true
    }

    fn read<'p>(&'p self, out: &mut Value<'p>) -> Result<()> {
        (self.read)(&*self.state, out);
        Ok(())
    }

    fn write(&mut self, input: &Value<'_>) -> Result<()> {
        (self.write)(&mut *self.state, input)
    }
}

/// Computed read over a piece of state observed through a shared borrow.
pub(crate) struct ComputedRef<'a, S: ?Sized, R> {
    pub(crate) state: &'a S,
    pub(crate) read: R,
}

impl<E, S, R> Accessor<E> for ComputedRef<'_, S, R>
where
    E: Erasure,
    S: ?Sized,
    R: for<'p> Fn(&'p S, &mut Value<'p>),
{
    fn is_readable(&self) -> bool {
        true
    }

    fn is_writable(&self) -> bool {
        false
    }

    fn read<'p>(&'p self, out: &mut Value<'p>) -> Result<()> {
        (self.read)(self.state, out);
        Ok(())
    }

    fn write(&mut self, _input: &Value<'_>) -> Result<()> {
        Err(no_write())
    }
}

/// Value produced by a closure on every read.
pub(crate) struct Getter<F, T> {
    pub(crate) get: F,
    pub(crate) _marker: PhantomData<fn() -> T>,
}

impl<E, F, T> Accessor<E> for Getter<F, T>
where
    E: Erasure,
    F: Fn() -> T,
    T: Any,
{
    fn is_readable(&self) -> bool {
        true
    }

    fn is_writable(&self) -> bool {
        false
    }

    fn read<'p>(&'p self, out: &mut Value<'p>) -> Result<()> {
        out.set((self.get)());
        Ok(())
    }

    fn write(&mut self, _input: &Value<'_>) -> Result<()> {
        Err(no_write())
    }
}

/// Typed sink closure, write-only.
pub(crate) struct Setter<F, T> {
    pub(crate) set: F,
    pub(crate) _marker: PhantomData<fn(T)>,
}

impl<E, F, T> Accessor<E> for Setter<F, T>
where
    E: Erasure,
    F: FnMut(T) -> Result<()>,
    T: Any + Clone,
{
    fn is_readable(&self) -> bool {
        false
    }

    fn is_writable(&self) -> bool {
        true
    }

    fn read<'p>(&'p self, _out: &mut Value<'p>) -> Result<()> {
        Err(no_read())
    }

    fn write(&mut self, input: &Value<'_>) -> Result<()> {
        (self.set)(E::unwrap::<T>(input)?)
    }

    fn write_from(&mut self, input: &mut Value<'_>) -> Result<()> {
        (self.set)(input.take_or_clone::<T>()?)
    }
}
