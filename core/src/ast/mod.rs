//! Program tree model and the `pest` frontend that builds it.
use pest::Parser;

pub mod err;
mod expr;
mod kind;
mod node;
mod print;
mod rules;
mod stmt;

pub use crate::error::MinicErrorExt;
pub use err::SyntaxError;
pub use kind::{AstNodeKind, BinaryOperator};
pub use node::AstNode;
pub use rules::{Rule, RulesParser};

/// Parse a script into its root `Block`.
pub fn generate_ast_from_source(script: &crate::script::Script) -> Result<AstNode, Box<dyn MinicErrorExt>> {
    let mut pairs = RulesParser::parse(Rule::program, &script.content)
        .map_err(|e| Box::<dyn MinicErrorExt>::from(SyntaxError::from_pest(e, &script.name)))?;

    let program = match pairs.next() {
        Some(p) => p,
        None => {
            return Err(SyntaxError::new("minic.ast.generate_ast_from_source".into(), None, None).into());
        }
    };
    let root = stmt::parse_program_rule(program, script)?;
    if let AstNodeKind::Block { statements } = &root.kind {
        log::debug!("parsed {} top-level statement(s) from {}", statements.len(), script.name);
    }
    Ok(root)
}
