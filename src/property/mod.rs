//! Properties, sequences, visitors and access modes.
//!
//! - [`Property`] - a name plus optional read and write operations
//! - [`Properties`] - ordered list of properties for one traversal
//! - [`Visitor`] / [`visit`] - traversal with early termination
//! - [`Mode`] - [`Mutable`] or [`ReadOnly`] access, selected at compile time
//! - [`Reflect`] - a type producing its own property sequences

mod accessor;
#[allow(clippy::module_inception)]
mod property;
mod mode;
mod reflect;
mod sequence;
mod visitor;

pub use accessor::Accessor;
pub use mode::{Binding, Mode, Mutable, ReadOnly};
pub use property::{Capability, Property};
pub use reflect::Reflect;
pub use sequence::Properties;
pub use visitor::{visit, Visitor};
