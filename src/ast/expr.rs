//! Expressions of the reconstructed program.

use crate::module::{BinaryOp, TypeId, UnaryOp};

/// A scalar literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal {
    /// Boolean literal.
    Bool(bool),
    /// Signed integer literal.
    I32(i32),
    /// Unsigned integer literal.
    U32(u32),
    /// Float literal. Rendered with shortest-roundtrip formatting.
    F32(f32),
}

/// An expression tree node.
///
/// Expressions are pure; anything with a side effect (stores, barriers,
/// value declarations) is a [`Statement`](crate::ast::Statement). The tree
/// is handed to callers by value and references nothing in the source
/// module except [`TypeId`]s.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// A scalar literal.
    Literal(Literal),
    /// A named value reference.
    Ident(String),
    /// Unary operator application.
    Unary {
        /// The operator.
        op: UnaryOp,
        /// The operand.
        operand: Box<Expression>,
    },
    /// Binary operator application.
    Binary {
        /// The operator.
        op: BinaryOp,
        /// Left operand.
        lhs: Box<Expression>,
        /// Right operand.
        rhs: Box<Expression>,
    },
    /// Aggregate construction from per-element operands.
    TypeConstructor {
        /// The constructed type.
        ty: TypeId,
        /// Element expressions in aggregate order.
        operands: Vec<Expression>,
    },
    /// Named member access: vector component (`.x`) or struct member.
    MemberAccessor {
        /// The aggregate expression.
        base: Box<Expression>,
        /// Member name.
        member: String,
    },
    /// Indexed access: matrix column or array element.
    ArrayAccessor {
        /// The aggregate expression.
        base: Box<Expression>,
        /// Index expression.
        index: Box<Expression>,
    },
}

impl Expression {
    /// A named value reference.
    #[must_use]
    pub fn ident(name: impl Into<String>) -> Self {
        Expression::Ident(name.into())
    }

    /// Member access on this expression.
    #[must_use]
    pub fn member(self, member: impl Into<String>) -> Self {
        Expression::MemberAccessor {
            base: Box::new(self),
            member: member.into(),
        }
    }

    /// Unsigned literal index access on this expression.
    #[must_use]
    pub fn index(self, index: u32) -> Self {
        Expression::ArrayAccessor {
            base: Box::new(self),
            index: Box::new(Expression::Literal(Literal::U32(index))),
        }
    }

    /// Logical negation of this expression.
    #[must_use]
    pub fn negate(self) -> Self {
        Expression::Unary {
            op: UnaryOp::Not,
            operand: Box::new(self),
        }
    }
}
