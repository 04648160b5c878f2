//! Statements of the reconstructed program.

use crate::ast::Expression;
use crate::module::TypeId;

/// One arm of a [`Statement::Switch`].
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchArm {
    /// Selector values matched by this arm.
    pub selectors: Vec<i64>,
    /// True when this arm handles the default case (possibly in addition to
    /// selector values it absorbed).
    pub default: bool,
    /// Arm body.
    pub body: Vec<Statement>,
}

/// A statement of the reconstructed structured program.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Introduces a named value or variable.
    VariableDecl {
        /// Declared name.
        name: String,
        /// Declared type, when one is carried.
        ty: Option<TypeId>,
        /// Initializer expression.
        initializer: Option<Expression>,
        /// True for mutable storage (`var`), false for an immutable binding
        /// of an instruction result.
        mutable: bool,
    },
    /// Assignment through a place expression.
    Assign {
        /// The place written to.
        target: Expression,
        /// The written value.
        value: Expression,
    },
    /// Structured conditional.
    If {
        /// Branch condition.
        condition: Expression,
        /// Statements of the true branch.
        then_body: Vec<Statement>,
        /// Statements of the false branch; empty when absent.
        else_body: Vec<Statement>,
    },
    /// Structured loop. Exits only through `Break`.
    Loop {
        /// Loop body.
        body: Vec<Statement>,
        /// Statements run at the end of each iteration, before the back
        /// edge; empty when the loop has no separate continuing construct.
        continuing: Vec<Statement>,
    },
    /// Structured multi-way switch.
    Switch {
        /// Selector expression.
        selector: Expression,
        /// Arms in source order.
        arms: Vec<SwitchArm>,
    },
    /// Leaves the innermost breakable construct.
    Break,
    /// Jumps to the continuing construct of the nearest enclosing loop.
    Continue,
    /// Transfers into the next switch arm.
    Fallthrough,
    /// Returns from the function.
    Return {
        /// Returned value, `None` for void functions.
        value: Option<Expression>,
    },
    /// Execution/memory barrier.
    Barrier,
}

impl Statement {
    /// An immutable binding of a computed value.
    #[must_use]
    pub fn binding(name: impl Into<String>, ty: TypeId, initializer: Expression) -> Self {
        Statement::VariableDecl {
            name: name.into(),
            ty: Some(ty),
            initializer: Some(initializer),
            mutable: false,
        }
    }
}
