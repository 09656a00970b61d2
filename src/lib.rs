//! # propvis
//!
//! Property reflection with visitor traversal.
//!
//! An object exposes named members as a sequence of [`Property`] values. Each
//! property is independently readable, writable, both, or neither (a category
//! label). Generic code walks the sequence with a [`Visitor`] without knowing
//! the owning type, moving values in and out through the type-erased
//! [`Value`](core::Value) carrier.
//!
//! ## Modules
//!
//! - [`util`] - Scalars and errors
//! - [`core`] - Value carrier and type-erasure strategies
//! - [`property`] - Properties, sequences, visitors and access modes
//!
//! ## Example
//!
//! ```
//! use propvis::prelude::*;
//!
//! let (mut x, mut y) = (5i32, 10i32);
//! let mut sum = 0;
//! let mut visitor: Visitor = Visitor::new(|p| {
//!     if p.is_readable() {
//!         sum += p.get::<i32>().unwrap_or(0);
//!     }
//!     true
//! });
//! let props = Properties::new().field("x", &mut x).field("y", &mut y);
//! assert!(visit(&mut visitor, props));
//! drop(visitor);
//! assert_eq!(sum, 15);
//! ```

pub mod util;
pub mod core;
pub mod property;

// Re-export commonly used types
pub use util::{Error, Result, Scalar, ScalarKind};
pub use crate::core::{Boxed, ByRef, DefaultErasure, Erasure, SmallRef, StorageKind, Value};
pub use property::{
    visit, Accessor, Binding, Capability, Mode, Mutable, Properties, Property, ReadOnly, Reflect,
    Visitor,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{Erasure, Value};
    pub use crate::property::{
        visit, Capability, Mode, Mutable, Properties, Property, ReadOnly, Reflect, Visitor,
    };
    pub use crate::util::{Error, Result};
}
