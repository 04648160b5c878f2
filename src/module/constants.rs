//! Module-scope constants.

use crate::module::{TypeId, ValueId};

/// A module-scope constant value.
///
/// Scalar variants carry the value directly; composite constants reference
/// their element constants by id, mirroring how the source format nests
/// `OpConstantComposite` operands. Float constants render with Rust's
/// shortest-roundtrip formatting, which reproduces the literal exactly.
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    /// Boolean constant.
    Bool(bool),
    /// 32-bit signed integer constant.
    I32(i32),
    /// 32-bit unsigned integer constant.
    U32(u32),
    /// 32-bit float constant.
    F32(f32),
    /// Composite constant over previously defined constant ids.
    Composite(Vec<ValueId>),
}

/// A constant definition: the constant's type paired with its value.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantDef {
    /// Declared type of the constant.
    pub ty: TypeId,
    /// The constant value.
    pub value: Constant,
}

impl Constant {
    /// Returns the value as an extract index, when it is a non-negative
    /// integer scalar.
    #[must_use]
    pub fn as_index(&self) -> Option<u32> {
        match self {
            Constant::I32(v) => u32::try_from(*v).ok(),
            Constant::U32(v) => Some(*v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_conversions() {
        assert_eq!(Constant::U32(2).as_index(), Some(2));
        assert_eq!(Constant::I32(-1).as_index(), None);
        assert_eq!(Constant::Bool(true).as_index(), None);
    }

    #[test]
    fn test_float_display_roundtrip() {
        assert_eq!(format!("{}", 50.0f32), "50");
        assert_eq!(format!("{}", 0.1f32), "0.1");
    }
}
