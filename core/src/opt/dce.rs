//! file: core/src/opt/dce.rs
//! description: dead-assignment elimination.
//!
//! The used-name set is one flow-insensitive approximation over the whole
//! tree: a name read anywhere (expression operand or `print` target) keeps
//! every assignment to that name alive, in every function. Only assignments
//! that sit directly in a `Block` are candidates for removal; loop headers
//! and bare branch bodies are left alone.
//!
use std::collections::HashSet;

use crate::ast::{AstNode, AstNodeKind};

/// Every name that appears in a read position anywhere under `root`.
pub fn collect_used_names(root: &AstNode) -> HashSet<String> {
    let mut used = HashSet::new();
    collect_into(root, &mut used);
    used
}

fn collect_into(node: &AstNode, used: &mut HashSet<String>) {
    match &node.kind {
        AstNodeKind::Identifier { name } | AstNodeKind::Print { name } => {
            used.insert(name.clone());
        }
        AstNodeKind::Number { .. } | AstNodeKind::Break => {}
        AstNodeKind::BinaryOp { left, right, .. } => {
            collect_into(left, used);
            collect_into(right, used);
        }
        AstNodeKind::Assign { value, .. } | AstNodeKind::Return { value } => collect_into(value, used),
        AstNodeKind::If { condition, then_branch, else_branch } => {
            collect_into(condition, used);
            collect_into(then_branch, used);
            if let Some(else_branch) = else_branch {
                collect_into(else_branch, used);
            }
        }
        AstNodeKind::While { condition, body } => {
            collect_into(condition, used);
            collect_into(body, used);
        }
        AstNodeKind::For { init, condition, increment, body } => {
            collect_into(init, used);
            collect_into(condition, used);
            collect_into(increment, used);
            collect_into(body, used);
        }
        AstNodeKind::Block { statements } => {
            for s in statements {
                collect_into(s, used);
            }
        }
        AstNodeKind::FunctionDef { body, .. } => collect_into(body, used),
        AstNodeKind::FunctionCall { args, .. } => {
            for a in args {
                collect_into(a, used);
            }
        }
    }
}

/// Drop block-level assignments whose target is not in `used`, recursing
/// into every nested statement. Returns how many were removed.
pub fn eliminate_dead_assignments(node: &mut AstNode, used: &HashSet<String>) -> usize {
    match &mut node.kind {
        AstNodeKind::Block { statements } => {
            let before = statements.len();
            statements.retain(|s| match &s.kind {
                AstNodeKind::Assign { target, .. } => {
                    let live = used.contains(target);
                    if !live {
                        log::trace!("dropping dead assignment to {}", target);
                    }
                    live
                }
                _ => true,
            });
            let removed = before - statements.len();
            removed
                + statements
                    .iter_mut()
                    .map(|s| eliminate_dead_assignments(s, used))
                    .sum::<usize>()
        }
        AstNodeKind::If { then_branch, else_branch, .. } => {
            let mut removed = eliminate_dead_assignments(then_branch, used);
            if let Some(else_branch) = else_branch {
                removed += eliminate_dead_assignments(else_branch, used);
            }
            removed
        }
        AstNodeKind::While { body, .. } => eliminate_dead_assignments(body, used),
        AstNodeKind::For { body, .. } => eliminate_dead_assignments(body, used),
        AstNodeKind::FunctionDef { body, .. } => eliminate_dead_assignments(body, used),
        AstNodeKind::Number { .. }
        | AstNodeKind::Identifier { .. }
        | AstNodeKind::BinaryOp { .. }
        | AstNodeKind::Assign { .. }
        | AstNodeKind::Return { .. }
        | AstNodeKind::Print { .. }
        | AstNodeKind::Break
        | AstNodeKind::FunctionCall { .. } => 0,
    }
}
