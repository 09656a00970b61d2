//! Types that describe themselves as property sequences.

use super::visitor::Visitor;
use super::Properties;
use crate::core::{DefaultErasure, Erasure};

/// A type exposing its members as a [`Properties`] sequence.
///
/// Implementors usually write the list once in a function generic over
/// [`Mode`](super::Mode) and call it from both methods:
///
/// ```
/// use propvis::{Mode, Mutable, Properties, ReadOnly, Reflect, Visitor};
///
/// struct Point { x: i32, y: i32 }
///
/// impl Point {
///     fn declare<'a, M: Mode>(x: M::Ref<'a, i32>, y: M::Ref<'a, i32>) -> Properties<'a> {
///         Properties::new().constant("ClassName", "Point").bind("x", x).bind("y", y)
///     }
/// }
///
/// impl Reflect for Point {
///     fn properties(&mut self) -> Properties<'_> {
///         Self::declare::<Mutable>(&mut self.x, &mut self.y)
///     }
///
///     fn properties_ref(&self) -> Properties<'_> {
///         Self::declare::<ReadOnly>(&self.x, &self.y)
///     }
/// }
///
/// let mut p = Point { x: 5, y: 4 };
/// let mut writable = 0;
/// p.visit_properties_ref(&mut Visitor::new(|prop| {
///     writable += prop.is_writable() as usize;
///     true
/// }));
/// assert_eq!(writable, 0);
/// p.visit_properties(&mut Visitor::new(|prop| {
///     !prop.is_writable() || prop.set(0i32).is_ok()
/// }));
/// assert_eq!((p.x, p.y), (0, 0));
/// ```
pub trait Reflect<E: Erasure = DefaultErasure> {
    /// Properties bound mutably: declared write operations are installed.
    fn properties(&mut self) -> Properties<'_, E>;

    /// Properties bound read-only: no write operation is installed.
    fn properties_ref(&self) -> Properties<'_, E>;

    /// Visit the mutable property sequence.
    fn visit_properties(&mut self, visitor: &mut Visitor<'_, E>) -> bool {
        self.properties().visit(visitor)
    }

    /// Visit the read-only property sequence.
    fn visit_properties_ref(&self, visitor: &mut Visitor<'_, E>) -> bool {
        self.properties_ref().visit(visitor)
    }
}
