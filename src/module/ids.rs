//! Identifier newtypes for module-level entities.
//!
//! SPIR-V names every result, type, and block label with a small integer id.
//! This module wraps those raw integers in distinct newtypes so that a value
//! id can never be confused with a type id or a block label at compile time.
//!
//! # Display
//!
//! All three identifiers display as the bare number; diagnostic messages that
//! follow the `%<id>` convention of SPIR-V disassembly add the `%` prefix
//! themselves (see [`crate::Error`]).

use std::fmt;

/// Identifier of an SSA value: the result of exactly one instruction or a
/// module-level constant.
///
/// Values are owned by the [`Module`](crate::module::Module) or
/// [`Function`](crate::module::Function) that defines them; consumers refer to
/// them by `ValueId` only.
///
/// # Examples
///
/// ```rust
/// use spvscope::module::ValueId;
///
/// let id = ValueId::new(2);
/// assert_eq!(id.raw(), 2);
/// assert_eq!(format!("%{id}"), "%2");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ValueId(pub(crate) u32);

/// Identifier of a registered type.
///
/// Produced by [`TypeRegistry`](crate::module::TypeRegistry) registration;
/// two structurally identical types always receive the same `TypeId`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeId(pub(crate) u32);

/// Label identifier of a basic block within a function.
///
/// Block labels share the module id space with values in SPIR-V; they are
/// kept as a distinct newtype here because nothing in this crate ever treats
/// a label as a value.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockId(pub(crate) u32);

macro_rules! impl_id {
    ($name:ident) => {
        impl $name {
            /// Creates an identifier from its raw numeric form.
            #[must_use]
            #[inline]
            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            /// Returns the raw numeric form of this identifier.
            #[must_use]
            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u32> for $name {
            #[inline]
            fn from(raw: u32) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u32 {
            #[inline]
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

impl_id!(ValueId);
impl_id!(TypeId);
impl_id!(BlockId);
