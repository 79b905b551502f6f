use std::io::Write;

use crate::ast::{AstNode, AstNodeKind};

use super::{Interpreter, RuntimeError, RuntimeErrorKind};

impl<'a, W: Write> Interpreter<'a, W> {
    /// Evaluate an expression to an integer. Operands are evaluated left to
    /// right.
    pub fn eval(&self, expr: &AstNode) -> Result<i64, RuntimeError> {
        match &expr.kind {
            AstNodeKind::Number { value } => Ok(*value),
            AstNodeKind::Identifier { name } => self.env.read(name).map_err(|e| e.at(expr)),
            AstNodeKind::BinaryOp { left, op, right } => {
                let l = self.eval(left)?;
                let r = self.eval(right)?;
                op.apply(l, r)
                    .ok_or_else(|| RuntimeError::new(RuntimeErrorKind::DivisionByZero).at(expr))
            }
            AstNodeKind::Assign { .. }
            | AstNodeKind::Return { .. }
            | AstNodeKind::Print { .. }
            | AstNodeKind::Break
            | AstNodeKind::If { .. }
            | AstNodeKind::While { .. }
            | AstNodeKind::For { .. }
            | AstNodeKind::Block { .. }
            | AstNodeKind::FunctionDef { .. }
            | AstNodeKind::FunctionCall { .. } => Err(RuntimeError::new(
                RuntimeErrorKind::UnsupportedExpression { kind: expr.kind.to_string() },
            )
            .at(expr)),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{AstNode, BinaryOperator};
    use crate::interp::{Interpreter, RuntimeErrorKind};

    fn eval(expr: &AstNode) -> Result<i64, RuntimeErrorKind> {
        let interp: Interpreter<'_, Vec<u8>> = Interpreter::new(Vec::new());
        interp.eval(expr).map_err(|e| e.kind)
    }

    #[test]
    fn evaluates_nested_arithmetic() {
        let expr = AstNode::binary(
            BinaryOperator::Sub,
            AstNode::binary(BinaryOperator::Mul, AstNode::number(6), AstNode::number(7)),
            AstNode::binary(BinaryOperator::Div, AstNode::number(9), AstNode::number(2)),
        );
        assert_eq!(eval(&expr), Ok(38));
    }

    #[test]
    fn division_by_zero_is_fatal() {
        let expr = AstNode::binary(BinaryOperator::Div, AstNode::number(1), AstNode::number(0));
        assert_eq!(eval(&expr), Err(RuntimeErrorKind::DivisionByZero));
    }

    #[test]
    fn unbound_identifier_is_fatal() {
        assert_eq!(
            eval(&AstNode::identifier("nope")),
            Err(RuntimeErrorKind::UndefinedVariable { name: "nope".into() })
        );
    }

    #[test]
    fn statements_are_not_expressions() {
        assert_eq!(
            eval(&AstNode::function_call("f", vec![])),
            Err(RuntimeErrorKind::UnsupportedExpression { kind: "FunctionCall".into() })
        );
    }

    #[test]
    fn left_operand_fails_first() {
        let expr = AstNode::binary(BinaryOperator::Add, AstNode::identifier("a"), AstNode::identifier("b"));
        assert_eq!(eval(&expr), Err(RuntimeErrorKind::UndefinedVariable { name: "a".into() }));
    }
}
