//! file: core/src/ast/kind.rs
//! description: AST node kind definitions and the binary operator enum.
//!
//! `AstNodeKind` is the closed set of node shapes the frontend produces and
//! every later stage (optimizer, IR lowering, evaluator) matches on.
//!
use serde::Serialize;

use super::node::AstNode;

/// Represents binary operators in the AST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BinaryOperator {
    Add, // +
    Sub, // -
    Mul, // *
    Div, // /
    Eq,  // ==
    Ne,  // !=
    Lt,  // <
    Le,  // <=
    Gt,  // >
    Ge,  // >=
}

impl BinaryOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Eq => "==",
            BinaryOperator::Ne => "!=",
            BinaryOperator::Lt => "<",
            BinaryOperator::Le => "<=",
            BinaryOperator::Gt => ">",
            BinaryOperator::Ge => ">=",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(BinaryOperator::Add),
            "-" => Some(BinaryOperator::Sub),
            "*" => Some(BinaryOperator::Mul),
            "/" => Some(BinaryOperator::Div),
            "==" => Some(BinaryOperator::Eq),
            "!=" => Some(BinaryOperator::Ne),
            "<" => Some(BinaryOperator::Lt),
            "<=" => Some(BinaryOperator::Le),
            ">" => Some(BinaryOperator::Gt),
            ">=" => Some(BinaryOperator::Ge),
            _ => None,
        }
    }

    /// Arithmetic operators are the only ones the constant folder rewrites.
    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            BinaryOperator::Add | BinaryOperator::Sub | BinaryOperator::Mul | BinaryOperator::Div
        )
    }

    /// Apply the operator with wrapping integer arithmetic. Division truncates
    /// toward zero; comparisons yield 0 or 1.
    ///
    /// Returns `None` only for a division by zero.
    pub fn apply(&self, l: i64, r: i64) -> Option<i64> {
        let v = match self {
            BinaryOperator::Add => l.wrapping_add(r),
            BinaryOperator::Sub => l.wrapping_sub(r),
            BinaryOperator::Mul => l.wrapping_mul(r),
            BinaryOperator::Div => {
                if r == 0 {
                    return None;
                }
                l.wrapping_div(r)
            }
            BinaryOperator::Eq => (l == r) as i64,
            BinaryOperator::Ne => (l != r) as i64,
            BinaryOperator::Lt => (l < r) as i64,
            BinaryOperator::Le => (l <= r) as i64,
            BinaryOperator::Gt => (l > r) as i64,
            BinaryOperator::Ge => (l >= r) as i64,
        };
        Some(v)
    }
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AstNodeKind {
    Number { value: i64 },
    Identifier { name: String },
    BinaryOp { left: Box<AstNode>, op: BinaryOperator, right: Box<AstNode> },

    Assign { target: String, value: Box<AstNode> },
    Return { value: Box<AstNode> },
    Print { name: String },
    Break,

    If { condition: Box<AstNode>, then_branch: Box<AstNode>, else_branch: Option<Box<AstNode>> },
    While { condition: Box<AstNode>, body: Box<AstNode> },
    For { init: Box<AstNode>, condition: Box<AstNode>, increment: Box<AstNode>, body: Box<AstNode> },
    Block { statements: Vec<AstNode> },

    FunctionDef { name: String, params: Vec<String>, body: Box<AstNode> },
    FunctionCall { name: String, args: Vec<AstNode> },
}

impl std::fmt::Display for AstNodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AstNodeKind::Number { .. } => write!(f, "Number"),
            AstNodeKind::Identifier { .. } => write!(f, "Identifier"),
            AstNodeKind::BinaryOp { .. } => write!(f, "BinaryOp"),
            AstNodeKind::Assign { .. } => write!(f, "Assign"),
            AstNodeKind::Return { .. } => write!(f, "Return"),
            AstNodeKind::Print { .. } => write!(f, "Print"),
            AstNodeKind::Break => write!(f, "Break"),
            AstNodeKind::If { .. } => write!(f, "If"),
            AstNodeKind::While { .. } => write!(f, "While"),
            AstNodeKind::For { .. } => write!(f, "For"),
            AstNodeKind::Block { .. } => write!(f, "Block"),
            AstNodeKind::FunctionDef { .. } => write!(f, "FunctionDef"),
            AstNodeKind::FunctionCall { .. } => write!(f, "FunctionCall"),
        }
    }
}
