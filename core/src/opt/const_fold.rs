//! file: core/src/opt/const_fold.rs
//! description: constant folding pass.
//!
//! Post-order rewrite: children are folded first, then a `BinaryOp` whose
//! operands are both `Number` leaves is replaced by a single `Number`. Only
//! `+ - * /` fold, and a division by zero is left in place so it still fails
//! at run time.
//!
use crate::ast::{AstNode, AstNodeKind};

/// Fold every foldable expression under `node`. Returns the number of
/// `BinaryOp` nodes replaced.
pub fn constant_fold(node: &mut AstNode) -> usize {
    match &mut node.kind {
        AstNodeKind::Number { .. }
        | AstNodeKind::Identifier { .. }
        | AstNodeKind::Print { .. }
        | AstNodeKind::Break => 0,
        AstNodeKind::BinaryOp { left, op, right } => {
            let mut folded = constant_fold(left) + constant_fold(right);
            if let (Some(l), Some(r)) = (left.as_number(), right.as_number()) {
                if op.is_arithmetic() {
                    if let Some(value) = op.apply(l, r) {
                        node.kind = AstNodeKind::Number { value };
                        folded += 1;
                    }
                }
            }
            folded
        }
        AstNodeKind::Assign { value, .. } | AstNodeKind::Return { value } => constant_fold(value),
        AstNodeKind::If { condition, then_branch, else_branch } => {
            let mut folded = constant_fold(condition) + constant_fold(then_branch);
            if let Some(else_branch) = else_branch {
                folded += constant_fold(else_branch);
            }
            folded
        }
        AstNodeKind::While { condition, body } => constant_fold(condition) + constant_fold(body),
        AstNodeKind::For { init, condition, increment, body } => {
            constant_fold(init) + constant_fold(condition) + constant_fold(increment) + constant_fold(body)
        }
        AstNodeKind::Block { statements } => statements.iter_mut().map(constant_fold).sum(),
        AstNodeKind::FunctionDef { body, .. } => constant_fold(body),
        AstNodeKind::FunctionCall { args, .. } => args.iter_mut().map(constant_fold).sum(),
    }
}
