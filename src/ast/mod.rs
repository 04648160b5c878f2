//! The target structured program representation.
//!
//! These trees are what translation produces. They own all of their data
//! (names are plain strings, literals are plain scalars) so callers can hold
//! them independently of the source [`Module`](crate::module::Module);
//! [`TypeId`](crate::module::TypeId)s are the one remaining tie back to the
//! module's type registry.

mod expr;
mod stmt;

pub use expr::{Expression, Literal};
pub use stmt::{Statement, SwitchArm};
