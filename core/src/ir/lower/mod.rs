//! file: core/src/ir/lower/mod.rs
//! description: AST -> three-address IR lowering entry point.
//!
//! Lowering is a direct structural walk. It performs no semantic checks and
//! assumes the tree it is handed (usually post-optimization) is well formed.
//!
mod lower_expr;
mod lower_stmt;

use crate::ast::AstNode;
use crate::ir::module::IrModule;

pub use lower_expr::lower_expr;
pub use lower_stmt::lower_statement;

impl IrModule {
    /// Lower a whole program into this module.
    pub fn lower_from_ast(&mut self, root: &AstNode) {
        lower_statement(root, self);
        log::debug!("lowered program to {} IR op(s), {} temporaries", self.len(), self.temp_count());
    }
}

/// Lower `root` into a fresh module with its own temp and label counters.
pub fn lower_ast_to_ir(root: &AstNode) -> IrModule {
    let mut ir_mod = IrModule::new();
    ir_mod.lower_from_ast(root);
    ir_mod
}
