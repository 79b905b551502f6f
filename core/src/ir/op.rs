use serde::Serialize;

use crate::ast::BinaryOperator;

/// Label identifiers share one numeric namespace and print as `L<n>`.
pub type Label = u32;

/// A single three-address instruction.
///
/// Values (`value`, `left`, `right`, `cond`) are either a temporary such as
/// `t3` or a program variable name; the lowering never needs anything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IrOp {
    Const { dest: String, value: i64 },
    Binary { dest: String, left: String, op: BinaryOperator, right: String },
    Copy { dest: String, src: String },
    Print { name: String },

    Label { id: Label },
    Goto { target: Label },
    IfNot { cond: String, target: Label },

    Func { name: String },
    EndFunc { name: String },
    Call { name: String },
    Arg { value: String },
    EndCall,
    Return { value: String },
}

impl IrOp {
    pub fn is_label(&self) -> bool {
        matches!(self, IrOp::Label { .. })
    }
}

impl std::fmt::Display for IrOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IrOp::Const { dest, value } => write!(f, "{} = {}", dest, value),
            IrOp::Binary { dest, left, op, right } => write!(f, "{} = {} {} {}", dest, left, op, right),
            IrOp::Copy { dest, src } => write!(f, "{} = {}", dest, src),
            IrOp::Print { name } => write!(f, "print {}", name),
            IrOp::Label { id } => write!(f, "L{}:", id),
            IrOp::Goto { target } => write!(f, "goto L{}", target),
            IrOp::IfNot { cond, target } => write!(f, "ifnot {} goto L{}", cond, target),
            IrOp::Func { name } => write!(f, "func {}:", name),
            IrOp::EndFunc { name } => write!(f, "endfunc {}", name),
            IrOp::Call { name } => write!(f, "call {}", name),
            IrOp::Arg { value } => write!(f, "arg {}", value),
            IrOp::EndCall => write!(f, "endcall"),
            IrOp::Return { value } => write!(f, "return {}", value),
        }
    }
}
