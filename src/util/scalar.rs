//! Scalar types - primitives a carrier can hold inline without allocating.

use std::any::Any;
use std::fmt;

/// Kind of an inline scalar.
///
/// Every kind fits in one machine word, which is what lets the default
/// erasure strategy store it by value inside the carrier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ScalarKind {
    /// `bool`
    Bool = 0,
    /// `char`
    Char = 1,
    /// `u8`
    Uint8 = 2,
    /// `i8`
    Int8 = 3,
    /// `u16`
    Uint16 = 4,
    /// `i16`
    Int16 = 5,
    /// `u32`
    Uint32 = 6,
    /// `i32`
    Int32 = 7,
    /// `u64`
    Uint64 = 8,
    /// `i64`
    Int64 = 9,
    /// `usize`
    Usize = 10,
    /// `isize`
    Isize = 11,
    /// `f32`
    Float32 = 12,
    /// `f64`
    Float64 = 13,
}

impl ScalarKind {
    /// Returns the Rust name of this kind.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Char => "char",
            Self::Uint8 => "u8",
            Self::Int8 => "i8",
            Self::Uint16 => "u16",
            Self::Int16 => "i16",
            Self::Uint32 => "u32",
            Self::Int32 => "i32",
            Self::Uint64 => "u64",
            Self::Int64 => "i64",
            Self::Usize => "usize",
            Self::Isize => "isize",
            Self::Float32 => "f32",
            Self::Float64 => "f64",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A primitive value held by value.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub enum Scalar {
    Bool(bool),
    Char(char),
    Uint8(u8),
    Int8(i8),
    Uint16(u16),
    Int16(i16),
    Uint32(u32),
    Int32(i32),
    Uint64(u64),
    Int64(i64),
    Usize(usize),
    Isize(isize),
    Float32(f32),
    Float64(f64),
}

macro_rules! scalar_dispatch {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        impl Scalar {
            /// Returns the kind of the held value.
            pub const fn kind(&self) -> ScalarKind {
                match self {
                    $(Self::$variant(_) => ScalarKind::$variant,)*
                }
            }

            /// Copies `value` into a scalar if its type is one of the scalar kinds.
            pub fn from_any(value: &dyn Any) -> Option<Self> {
                $(
                    if let Some(v) = value.downcast_ref::<$ty>() {
                        return Some(Self::$variant(*v));
                    }
                )*
                None
            }

            /// View the held value as `dyn Any`.
            pub fn as_any(&self) -> &dyn Any {
                match self {
                    $(Self::$variant(v) => v,)*
                }
            }

            /// Mutable view of the held value as `dyn Any`.
            pub fn as_any_mut(&mut self) -> &mut dyn Any {
                match self {
                    $(Self::$variant(v) => v,)*
                }
            }
        }

        $(
            impl From<$ty> for Scalar {
                #[inline]
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }
        )*
    };
}

scalar_dispatch! {
    Bool(bool),
    Char(char),
    Uint8(u8),
    Int8(i8),
    Uint16(u16),
    Int16(i16),
    Uint32(u32),
    Int32(i32),
    Uint64(u64),
    Int64(i64),
    Usize(usize),
    Isize(isize),
    Float32(f32),
    Float64(f64),
}

impl Scalar {
    /// Rust name of the held type.
    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.kind().name()
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Char(v) => write!(f, "{v}"),
            Self::Uint8(v) => write!(f, "{v}"),
            Self::Int8(v) => write!(f, "{v}"),
            Self::Uint16(v) => write!(f, "{v}"),
            Self::Int16(v) => write!(f, "{v}"),
            Self::Uint32(v) => write!(f, "{v}"),
            Self::Int32(v) => write!(f, "{v}"),
            Self::Uint64(v) => write!(f, "{v}"),
            Self::Int64(v) => write!(f, "{v}"),
            Self::Usize(v) => write!(f, "{v}"),
            Self::Isize(v) => write!(f, "{v}"),
            Self::Float32(v) => write!(f, "{v}"),
            Self::Float64(v) => write!(f, "{v}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names() {
        assert_eq!(Scalar::from(-1i16).type_name(), "i16");
        assert_eq!(Scalar::from(0usize).type_name(), "usize");
        assert_eq!(Scalar::from(2.5f32).kind(), ScalarKind::Float32);
        assert_eq!(ScalarKind::Char.to_string(), "char");
    }

    #[test]
    fn test_from_any() {
        let s = Scalar::from_any(&-1i32).unwrap();
        assert_eq!(s, Scalar::Int32(-1));
        assert_eq!(s.kind(), ScalarKind::Int32);
        assert_eq!(s.as_any().downcast_ref::<i32>(), Some(&-1));
        assert!(Scalar::from_any(&String::from("x")).is_none());
    }

    #[test]
    fn test_as_any_mut() {
        let mut s = Scalar::from('a');
        *s.as_any_mut().downcast_mut::<char>().unwrap() = 'A';
        assert_eq!(s, Scalar::Char('A'));
        assert_eq!(s.to_string(), "A");
    }
}
