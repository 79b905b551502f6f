//! Whole-program optimizer: constant folding, then dead-assignment
//! elimination. Both passes rewrite the tree in place.
use serde::Serialize;

use crate::ast::AstNode;

mod const_fold;
mod dce;

pub use const_fold::constant_fold;
pub use dce::{collect_used_names, eliminate_dead_assignments};

/// What the optimizer changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OptimizeReport {
    /// `BinaryOp` nodes replaced by a `Number`.
    pub folded: usize,
    /// Block-level assignments dropped.
    pub removed: usize,
}

/// Run both passes in order. Folding runs first so the used-name set is
/// computed over the already-folded tree.
pub fn optimize(root: &mut AstNode) -> OptimizeReport {
    let folded = constant_fold(root);
    log::debug!("constant folding replaced {} expression(s)", folded);

    let used = collect_used_names(root);
    let removed = eliminate_dead_assignments(root, &used);
    log::debug!(
        "dead-assignment elimination removed {} statement(s); {} name(s) are read",
        removed,
        used.len()
    );

    OptimizeReport { folded, removed }
}
