//! file: core/src/ir/lower/lower_expr.rs
//! description: expression lowering helpers.
//!
//! Expressions flatten into temporaries: a literal is materialized into a
//! fresh temp, an identifier stands for itself and a binary operation
//! lowers both sides and then computes a new temp.
//!
use crate::ast::{AstNode, AstNodeKind};
use crate::ir::module::IrModule;
use crate::ir::op::IrOp;

/// Lower `expr` and return the name holding its value, or `None` when the
/// node is not an expression.
pub fn lower_expr(expr: &AstNode, ir_mod: &mut IrModule) -> Option<String> {
    match expr.get_kind() {
        AstNodeKind::Number { value } => {
            let dest = ir_mod.alloc_temp();
            ir_mod.emit_op(IrOp::Const { dest: dest.clone(), value: *value });
            Some(dest)
        }
        AstNodeKind::Identifier { name } => Some(name.clone()),
        AstNodeKind::BinaryOp { left, op, right } => {
            let l = lower_expr(left, ir_mod)?;
            let r = lower_expr(right, ir_mod)?;
            let dest = ir_mod.alloc_temp();
            ir_mod.emit_op(IrOp::Binary { dest: dest.clone(), left: l, op: *op, right: r });
            Some(dest)
        }
        other => {
            log::warn!("cannot lower {} in expression position", other);
            None
        }
    }
}
