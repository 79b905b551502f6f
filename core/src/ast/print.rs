//! Indented tree dump of an `AstNode`, used by the driver's AST listing.
use std::fmt;

use super::{AstNode, AstNodeKind};

fn indent(f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        write!(f, "  ")?;
    }
    Ok(())
}

fn heading(f: &mut fmt::Formatter<'_>, depth: usize, text: &str) -> fmt::Result {
    indent(f, depth)?;
    writeln!(f, "{}", text)
}

fn write_node(f: &mut fmt::Formatter<'_>, node: &AstNode, depth: usize) -> fmt::Result {
    indent(f, depth)?;
    match &node.kind {
        AstNodeKind::Number { value } => writeln!(f, "Num: {}", value),
        AstNodeKind::Identifier { name } => writeln!(f, "Id: {}", name),
        AstNodeKind::BinaryOp { left, op, right } => {
            writeln!(f, "BinOp: {}", op)?;
            write_node(f, left, depth + 1)?;
            write_node(f, right, depth + 1)
        }
        AstNodeKind::Assign { target, value } => {
            writeln!(f, "Assign: {} =", target)?;
            write_node(f, value, depth + 1)
        }
        AstNodeKind::Return { value } => {
            writeln!(f, "Return:")?;
            write_node(f, value, depth + 1)
        }
        AstNodeKind::Print { name } => writeln!(f, "Print: {}", name),
        AstNodeKind::Break => writeln!(f, "Break"),
        AstNodeKind::If { condition, then_branch, else_branch } => {
            writeln!(f, "If:")?;
            heading(f, depth + 1, "Cond:")?;
            write_node(f, condition, depth + 2)?;
            heading(f, depth + 1, "Then:")?;
            write_node(f, then_branch, depth + 2)?;
            if let Some(else_branch) = else_branch {
                heading(f, depth + 1, "Else:")?;
                write_node(f, else_branch, depth + 2)?;
            }
            Ok(())
        }
        AstNodeKind::While { condition, body } => {
            writeln!(f, "While:")?;
            heading(f, depth + 1, "Cond:")?;
            write_node(f, condition, depth + 2)?;
            heading(f, depth + 1, "Body:")?;
            write_node(f, body, depth + 2)
        }
        AstNodeKind::For { init, condition, increment, body } => {
            writeln!(f, "For:")?;
            heading(f, depth + 1, "Init:")?;
            write_node(f, init, depth + 2)?;
            heading(f, depth + 1, "Cond:")?;
            write_node(f, condition, depth + 2)?;
            heading(f, depth + 1, "Inc:")?;
            write_node(f, increment, depth + 2)?;
            heading(f, depth + 1, "Body:")?;
            write_node(f, body, depth + 2)
        }
        AstNodeKind::Block { statements } => {
            writeln!(f, "Block:")?;
            for s in statements {
                write_node(f, s, depth + 1)?;
            }
            Ok(())
        }
        AstNodeKind::FunctionDef { name, params, body } => {
            writeln!(f, "FuncDef: {}({})", name, params.join(", "))?;
            write_node(f, body, depth + 1)
        }
        AstNodeKind::FunctionCall { name, args } => {
            writeln!(f, "Call: {}", name)?;
            for a in args {
                write_node(f, a, depth + 1)?;
            }
            Ok(())
        }
    }
}

impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self, 0)
    }
}
