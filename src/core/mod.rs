//! Core layer - the type-erased carrier and erasure strategies.
//!
//! This module provides:
//! - [`Value`] - Opaque carrier holding one value and its type tag
//! - [`Erasure`] - Strategy for packing typed values into carriers
//! - [`SmallRef`] / [`Boxed`] / [`ByRef`] - Provided strategies

mod erasure;
mod value;

pub use erasure::{fits_in_word, Boxed, ByRef, DefaultErasure, Erasure, SmallRef, WORD_SIZE};
pub use value::{StorageKind, Value};
