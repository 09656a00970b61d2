//! Utility types shared by the property layer.
//!
//! - [`ScalarKind`] / [`Scalar`] - primitives held inline by a carrier
//! - [`Error`] / [`Result`] - Error handling

mod error;
mod scalar;

pub use error::*;
pub use scalar::*;
