//! Shader type system: the [`Type`] enum and the interning [`TypeRegistry`].
//!
//! Types are registered once and referred to by [`TypeId`] everywhere else.
//! Registration of an aggregate requires already-registered ids for its
//! element or member types, which rules out forward references by
//! construction (pointers are the one exception, since a pointer may
//! legitimately point at a type registered later).
//!
//! # Examples
//!
//! ```rust
//! use spvscope::module::{Type, TypeRegistry};
//!
//! let mut registry = TypeRegistry::new();
//! let f32_ty = registry.register(Type::F32)?;
//! let vec2 = registry.register(Type::Vector { element: f32_ty, size: 2 })?;
//!
//! // Structural interning: the same shape yields the same id.
//! let again = registry.register(Type::Vector { element: f32_ty, size: 2 })?;
//! assert_eq!(vec2, again);
//! # Ok::<(), spvscope::Error>(())
//! ```

use std::collections::HashMap;

use strum::Display;

use crate::module::TypeId;
use crate::{Error, Result};

/// Storage class of a pointer or variable.
///
/// Only the classes that affect translation are modeled; the class is carried
/// as metadata and rendered into nothing, but `Function`-class variables are
/// the ones the statement synthesizer declares locally.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageClass {
    /// Function-local storage, declared in the function body.
    Function,
    /// Module-private storage.
    Private,
    /// Pipeline input.
    Input,
    /// Pipeline output.
    Output,
    /// Uniform buffer storage.
    Uniform,
    /// Read-write storage buffer.
    StorageBuffer,
    /// Workgroup-shared storage.
    Workgroup,
}

/// A single member of a [`Type::Struct`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructMember {
    /// Declared member name. The registry substitutes `field<N>` when the
    /// producer declared none.
    pub name: String,
    /// Member type, registered before the struct itself.
    pub ty: TypeId,
}

/// A shader-level type.
///
/// Scalars are the four shading-language scalars; aggregates reference their
/// component types by [`TypeId`]. Matrices are column-major collections of
/// vector columns, as in the source format.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// The unit type of a function with no return value.
    Void,
    /// Boolean scalar.
    Bool,
    /// 32-bit signed integer scalar.
    I32,
    /// 32-bit unsigned integer scalar.
    U32,
    /// 32-bit floating point scalar.
    F32,
    /// Vector of 2 to 4 scalar components.
    Vector {
        /// Component scalar type.
        element: TypeId,
        /// Component count.
        size: u32,
    },
    /// Matrix of 2 to 4 vector columns.
    Matrix {
        /// Column vector type.
        column: TypeId,
        /// Column count.
        columns: u32,
    },
    /// Fixed-size array.
    Array {
        /// Element type.
        element: TypeId,
        /// Element count. May originate from a specialization constant, so
        /// extract indices against it are not bounds-checked.
        size: u32,
    },
    /// Runtime-sized array. Only addressable through a pointer access chain;
    /// a compile-time extract over one is an error.
    RuntimeArray {
        /// Element type.
        element: TypeId,
    },
    /// Structure with named members.
    Struct {
        /// Members in declaration order.
        members: Vec<StructMember>,
    },
    /// Pointer into a storage class. May forward-reference its pointee.
    Pointer {
        /// Pointee type.
        pointee: TypeId,
        /// Storage class of the pointed-at memory.
        class: StorageClass,
    },
}

/// Interning table mapping structural [`Type`]s to stable [`TypeId`]s.
///
/// Two structurally identical registrations always yield the same id, so id
/// equality is type equality for registry-produced ids.
#[derive(Debug, Default, Clone)]
pub struct TypeRegistry {
    types: Vec<Type>,
    interned: HashMap<Type, TypeId>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a type, returning its id.
    ///
    /// Component ids of aggregates must already be registered; a dangling
    /// component id fails with [`Error::TypeNotFound`]. Pointer pointees are
    /// exempt from that check.
    ///
    /// # Errors
    /// Returns [`Error::TypeNotFound`] when a non-pointer component id does
    /// not resolve in this registry.
    pub fn register(&mut self, ty: Type) -> Result<TypeId> {
        match &ty {
            Type::Vector { element, .. }
            | Type::Array { element, .. }
            | Type::RuntimeArray { element } => self.check(*element)?,
            Type::Matrix { column, .. } => self.check(*column)?,
            Type::Struct { members } => {
                for member in members {
                    self.check(member.ty)?;
                }
            }
            _ => {}
        }
        if let Some(&id) = self.interned.get(&ty) {
            return Ok(id);
        }
        let id = TypeId::new(u32::try_from(self.types.len()).unwrap_or(u32::MAX));
        self.types.push(ty.clone());
        self.interned.insert(ty, id);
        Ok(id)
    }

    /// Registers a structure type, substituting `field<N>` for members with
    /// no declared name.
    ///
    /// # Errors
    /// Returns [`Error::TypeNotFound`] when a member type id does not resolve.
    pub fn register_struct(
        &mut self,
        members: Vec<(Option<String>, TypeId)>,
    ) -> Result<TypeId> {
        let members = members
            .into_iter()
            .enumerate()
            .map(|(i, (name, ty))| StructMember {
                name: name.unwrap_or_else(|| format!("field{i}")),
                ty,
            })
            .collect();
        self.register(Type::Struct { members })
    }

    /// Looks up a type by id.
    ///
    /// # Errors
    /// Returns [`Error::TypeNotFound`] for ids this registry never produced.
    pub fn lookup(&self, id: TypeId) -> Result<&Type> {
        self.types
            .get(id.raw() as usize)
            .ok_or(Error::TypeNotFound(id))
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// True when no type has been registered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn check(&self, id: TypeId) -> Result<()> {
        if (id.raw() as usize) < self.types.len() {
            Ok(())
        } else {
            Err(Error::TypeNotFound(id))
        }
    }
}
