//! Visitor traversal.

use std::fmt;

use tracing::{debug, trace, trace_span};

use super::Property;
use crate::core::{DefaultErasure, Erasure};

/// A callable invoked once per property; returning `false` stops the traversal.
///
/// The callable receives each property mutably so it can both read and write.
/// Any accumulator lives in what the closure captures.
pub struct Visitor<'v, E: Erasure = DefaultErasure> {
    func: Box<dyn FnMut(&mut Property<'_, E>) -> bool + 'v>,
}

impl<'v, E: Erasure> Visitor<'v, E> {
    /// Wrap a callable.
    pub fn new<F>(func: F) -> Self
    where
        F: FnMut(&mut Property<'_, E>) -> bool + 'v,
    {
        Self {
            func: Box::new(func),
        }
    }

    /// Invoke on one property.
    #[inline]
    pub fn visit_property(&mut self, property: &mut Property<'_, E>) -> bool {
        (self.func)(property)
    }

    /// Invoke on each property in order, stopping at the first `false`.
    pub fn visit_all<'a, I>(&mut self, properties: I) -> bool
    where
        I: IntoIterator<Item = Property<'a, E>>,
    {
        visit(self, properties)
    }
}

impl<E: Erasure> fmt::Debug for Visitor<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Visitor").finish_non_exhaustive()
    }
}

/// Run `visitor` over `properties` in order.
///
/// Returns `false` as soon as the visitor does, without touching the
/// remaining properties, and `true` once every property has been visited.
pub fn visit<'a, E, I>(visitor: &mut Visitor<'_, E>, properties: I) -> bool
where
    E: Erasure,
    I: IntoIterator<Item = Property<'a, E>>,
{
    let _span = trace_span!("visit").entered();
    for (index, mut property) in properties.into_iter().enumerate() {
        trace!(index, name = property.name(), capability = %property.capability(), "visiting");
        if !visitor.visit_property(&mut property) {
            debug!(index, name = property.name(), "traversal stopped by visitor");
            return false;
        }
    }
    true
}
