//! Three-address IR: instruction model, module container and AST lowering.
pub mod lower;
pub mod module;
pub mod op;

pub use self::lower::lower_ast_to_ir;
pub use self::module::{IrModule, LabelRange};
pub use self::op::{IrOp, Label};

/// Lower `root` and return the listing as text lines.
pub fn generate_ir(root: &crate::ast::AstNode) -> Vec<String> {
    lower_ast_to_ir(root).lines()
}
