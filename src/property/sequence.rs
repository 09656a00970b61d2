//! Ordered property lists built for one traversal.

use std::any::Any;
use std::fmt;
use std::ops::{Index, IndexMut};

use smallvec::SmallVec;

use super::mode::Binding;
use super::visitor::{visit, Visitor};
use super::Property;
use crate::core::{DefaultErasure, Erasure, Value};
use crate::util::Result;

/// Properties stored without allocating.
const INLINE_PROPERTIES: usize = 8;

/// Ordered sequence of properties describing one object for one traversal.
///
/// Traversal order is declaration order. A name-only property announces a
/// category for the properties that follow it. The builder methods mirror the
/// [`Property`] constructors:
///
/// ```
/// use propvis::{visit, Properties, Visitor};
///
/// let (mut x, mut y) = (5i32, 10i32);
/// let mut sum = 0;
/// let mut visitor: Visitor = Visitor::new(|p| {
///     sum += p.get::<i32>().unwrap_or(0);
///     true
/// });
/// let props = Properties::new().category("Point").field("x", &mut x).field("y", &mut y);
/// assert!(visit(&mut visitor, props));
/// drop(visitor);
/// assert_eq!(sum, 15);
/// ```
pub struct Properties<'a, E: Erasure = DefaultErasure> {
    items: SmallVec<[Property<'a, E>; INLINE_PROPERTIES]>,
}

impl<'a, E: Erasure> Properties<'a, E> {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self {
            items: SmallVec::new(),
        }
    }

    /// Append a property.
    pub fn push(&mut self, property: Property<'a, E>) {
        self.items.push(property);
    }

    /// Append a property, builder style.
    pub fn property(mut self, property: Property<'a, E>) -> Self {
        self.push(property);
        self
    }

    /// Append a name-only property.
    pub fn category(self, name: &'a str) -> Self {
        self.property(Property::new(name))
    }

    /// Append a read-only property owning `value`.
    pub fn constant<T: Any + Clone>(self, name: &'a str, value: T) -> Self {
        self.property(Property::constant(name, value))
    }

    /// Append a read-only property borrowing `value`.
    pub fn read_only<T: Any + Clone>(self, name: &'a str, value: &'a T) -> Self {
        self.property(Property::read_only(name, value))
    }

    /// Append a read-write property bound to `field`.
    pub fn field<T: Any + Clone>(self, name: &'a str, field: &'a mut T) -> Self {
        self.property(Property::field(name, field))
    }

    /// Append a read-write property bound to `field` with a custom read.
    pub fn field_with_read<T, R>(self, name: &'a str, field: &'a mut T, read: R) -> Self
    where
        T: Any + Clone,
        R: for<'p> Fn(&'p T, &mut Value<'p>) + 'a,
    {
        self.property(Property::field_with_read(name, field, read))
    }

    /// Append a read-write property bound to `field` with a custom write.
    pub fn field_with_write<T, W>(self, name: &'a str, field: &'a mut T, write: W) -> Self
    where
        T: Any + Clone,
        W: FnMut(&mut T, &Value<'_>) -> Result<()> + 'a,
    {
        self.property(Property::field_with_write(name, field, write))
    }

    /// Append a property bound according to the binding's mode.
    pub fn bind<B>(self, name: &'a str, binding: B) -> Self
    where
        B: Binding<'a>,
        B::Target: Any + Clone,
    {
        self.property(binding.into_field(name))
    }

    /// Append a read-write property with custom operations.
    pub fn custom<S, R, W>(self, name: &'a str, state: &'a mut S, read: R, write: W) -> Self
    where
        S: ?Sized + 'a,
        R: for<'p> Fn(&'p S, &mut Value<'p>) + 'a,
        W: FnMut(&mut S, &Value<'_>) -> Result<()> + 'a,
    {
        self.property(Property::custom(name, state, read, write))
    }

    /// Append a read-only property with a custom read.
    pub fn custom_ref<S, R>(self, name: &'a str, state: &'a S, read: R) -> Self
    where
        S: ?Sized + 'a,
        R: for<'p> Fn(&'p S, &mut Value<'p>) + 'a,
    {
        self.property(Property::custom_ref(name, state, read))
    }

    /// Append a custom property; `write` is only installed for mutable bindings.
    pub fn bind_custom<B, R, W>(self, name: &'a str, binding: B, read: R, write: W) -> Self
    where
        B: Binding<'a>,
        R: for<'p> Fn(&'p B::Target, &mut Value<'p>) + 'a,
        W: FnMut(&mut B::Target, &Value<'_>) -> Result<()> + 'a,
    {
        self.property(binding.into_custom(name, read, write))
    }

    /// Append a read-only computed property.
    pub fn getter<T, F>(self, name: &'a str, get: F) -> Self
    where
        T: Any,
        F: Fn() -> T + 'a,
    {
        self.property(Property::getter(name, get))
    }

    /// Append a write-only property.
    pub fn setter<T, F>(self, name: &'a str, set: F) -> Self
    where
        T: Any + Clone,
        F: FnMut(T) -> Result<()> + 'a,
    {
        self.property(Property::setter(name, set))
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get a property by position.
    pub fn get(&self, index: usize) -> Option<&Property<'a, E>> {
        self.items.get(index)
    }

    /// Get a property by position, mutably.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Property<'a, E>> {
        self.items.get_mut(index)
    }

    /// Find a property by name.
    pub fn find(&self, name: &str) -> Option<&Property<'a, E>> {
        self.items.iter().find(|p| p.name() == name)
    }

    /// Find a property by name, mutably.
    pub fn find_mut(&mut self, name: &str) -> Option<&mut Property<'a, E>> {
        self.items.iter_mut().find(|p| p.name() == name)
    }

    /// Iterate in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Property<'a, E>> {
        self.items.iter()
    }

    /// Iterate mutably in declaration order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Property<'a, E>> {
        self.items.iter_mut()
    }

    /// Property names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.items.iter().map(|p| p.name())
    }

    /// Run `visitor` over the sequence, consuming it.
    pub fn visit(self, visitor: &mut Visitor<'_, E>) -> bool {
        visit(visitor, self)
    }
}

impl<E: Erasure> Default for Properties<'_, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, E: Erasure> Index<usize> for Properties<'a, E> {
    type Output = Property<'a, E>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.items[index]
    }
}

impl<E: Erasure> IndexMut<usize> for Properties<'_, E> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.items[index]
    }
}

impl<'a, E: Erasure> IntoIterator for Properties<'a, E> {
    type Item = Property<'a, E>;
    type IntoIter = smallvec::IntoIter<[Property<'a, E>; INLINE_PROPERTIES]>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'s, 'a, E: Erasure> IntoIterator for &'s Properties<'a, E> {
    type Item = &'s Property<'a, E>;
    type IntoIter = std::slice::Iter<'s, Property<'a, E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'a, E: Erasure> FromIterator<Property<'a, E>> for Properties<'a, E> {
    fn from_iter<I: IntoIterator<Item = Property<'a, E>>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a, E: Erasure> Extend<Property<'a, E>> for Properties<'a, E> {
    fn extend<I: IntoIterator<Item = Property<'a, E>>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<'a, E: Erasure> From<Vec<Property<'a, E>>> for Properties<'a, E> {
    fn from(items: Vec<Property<'a, E>>) -> Self {
        items.into_iter().collect()
    }
}

impl<E: Erasure> fmt::Debug for Properties<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}
