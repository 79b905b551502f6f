use serde::Serialize;

use crate::location;

use super::kind::{AstNodeKind, BinaryOperator};

/// A node of the program tree. Each node exclusively owns its children.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AstNode {
    pub kind: AstNodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<location::Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<location::Span>,
}

impl AstNode {
    pub fn new(
        kind: AstNodeKind,
        location: Option<location::Location>,
        span: Option<location::Span>,
    ) -> Self {
        AstNode {
            kind,
            location,
            span,
        }
    }

    pub fn get_kind(&self) -> &AstNodeKind {
        &self.kind
    }
    pub fn get_location(&self) -> Option<&crate::location::Location> {
        self.location.as_ref()
    }
    pub fn get_span(&self) -> Option<&crate::location::Span> {
        self.span.as_ref()
    }

    // ------- Constructors without source positions -------

    pub fn number(value: i64) -> Self {
        Self::new(AstNodeKind::Number { value }, None, None)
    }

    pub fn identifier(name: &str) -> Self {
        Self::new(AstNodeKind::Identifier { name: name.to_string() }, None, None)
    }

    pub fn binary(op: BinaryOperator, left: AstNode, right: AstNode) -> Self {
        Self::new(
            AstNodeKind::BinaryOp {
                left: Box::new(left),
                op,
                right: Box::new(right),
            },
            None,
            None,
        )
    }

    pub fn assign(target: &str, value: AstNode) -> Self {
        Self::new(
            AstNodeKind::Assign {
                target: target.to_string(),
                value: Box::new(value),
            },
            None,
            None,
        )
    }

    pub fn return_stmt(value: AstNode) -> Self {
        Self::new(AstNodeKind::Return { value: Box::new(value) }, None, None)
    }

    pub fn print(name: &str) -> Self {
        Self::new(AstNodeKind::Print { name: name.to_string() }, None, None)
    }

    pub fn break_stmt() -> Self {
        Self::new(AstNodeKind::Break, None, None)
    }

    pub fn if_stmt(condition: AstNode, then_branch: AstNode, else_branch: Option<AstNode>) -> Self {
        Self::new(
            AstNodeKind::If {
                condition: Box::new(condition),
                then_branch: Box::new(then_branch),
                else_branch: else_branch.map(Box::new),
            },
            None,
            None,
        )
    }

    pub fn while_stmt(condition: AstNode, body: AstNode) -> Self {
        Self::new(
            AstNodeKind::While {
                condition: Box::new(condition),
                body: Box::new(body),
            },
            None,
            None,
        )
    }

    pub fn for_stmt(init: AstNode, condition: AstNode, increment: AstNode, body: AstNode) -> Self {
        Self::new(
            AstNodeKind::For {
                init: Box::new(init),
                condition: Box::new(condition),
                increment: Box::new(increment),
                body: Box::new(body),
            },
            None,
            None,
        )
    }

    pub fn block(statements: Vec<AstNode>) -> Self {
        Self::new(AstNodeKind::Block { statements }, None, None)
    }

    pub fn function_def(name: &str, params: &[&str], body: AstNode) -> Self {
        Self::new(
            AstNodeKind::FunctionDef {
                name: name.to_string(),
                params: params.iter().map(|p| p.to_string()).collect(),
                body: Box::new(body),
            },
            None,
            None,
        )
    }

    pub fn function_call(name: &str, args: Vec<AstNode>) -> Self {
        Self::new(
            AstNodeKind::FunctionCall {
                name: name.to_string(),
                args,
            },
            None,
            None,
        )
    }

    /// The literal value if this node is a `Number` leaf.
    pub fn as_number(&self) -> Option<i64> {
        match self.kind {
            AstNodeKind::Number { value } => Some(value),
            _ => None,
        }
    }
}
