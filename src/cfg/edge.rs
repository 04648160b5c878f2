//! Typed control-flow edges.

/// The kind of a control-flow edge, derived from the source block's
/// terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CfgEdgeKind {
    /// Edge of an unconditional branch.
    Unconditional,
    /// True edge of a two-way conditional.
    ConditionalTrue,
    /// False edge of a two-way conditional.
    ConditionalFalse,
    /// Switch edge. `case` is the selector value, or `None` for the
    /// default edge.
    Switch {
        /// Matched selector value, `None` for the default edge.
        case: Option<i64>,
    },
}

impl CfgEdgeKind {
    /// Creates a switch case edge for the given selector value.
    #[must_use]
    pub const fn case(value: i64) -> Self {
        CfgEdgeKind::Switch { case: Some(value) }
    }

    /// Creates the switch default edge.
    #[must_use]
    pub const fn default_case() -> Self {
        CfgEdgeKind::Switch { case: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switch_factories() {
        assert_eq!(CfgEdgeKind::case(3), CfgEdgeKind::Switch { case: Some(3) });
        assert_eq!(CfgEdgeKind::default_case(), CfgEdgeKind::Switch { case: None });
    }
}
