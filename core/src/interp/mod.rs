//! Tree-walking evaluator over the program tree.
//!
//! All mutable run state (bindings, function table, output sink) lives in one
//! [`Interpreter`] value, so independent programs can run side by side.
use std::io::Write;

use crate::ast::AstNode;

mod env;
mod err;
mod eval;
mod exec;
mod functions;

pub use env::{Binding, Environment};
pub use err::{RuntimeError, RuntimeErrorKind};
pub use functions::{FunctionEntry, FunctionTable};

/// How a statement finished: normally, or by raising a loop exit that is
/// still looking for its enclosing loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Normal,
    Break,
}

/// Nested calls allowed before a run fails with `CallDepthExceeded`.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 256;

pub struct Interpreter<'a, W: Write> {
    env: Environment,
    functions: FunctionTable<'a>,
    out: W,
    max_call_depth: usize,
}

impl<'a, W: Write> Interpreter<'a, W> {
    pub fn new(out: W) -> Self {
        Interpreter {
            env: Environment::new(),
            functions: FunctionTable::new(),
            out,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }

    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// Execute a whole program for its side effects.
    pub fn run(&mut self, root: &'a AstNode) -> Result<(), RuntimeError> {
        if self.exec(root)? == Flow::Break {
            log::warn!("break outside of a loop stopped the program early");
        }
        self.out
            .flush()
            .map_err(|e| RuntimeError::new(RuntimeErrorKind::Output { reason: e.to_string() }))
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn functions(&self) -> &FunctionTable<'a> {
        &self.functions
    }

    pub fn dump_globals(&self) -> Vec<(String, i64)> {
        self.env.dump_globals()
    }

    pub fn into_output(self) -> W {
        self.out
    }
}

/// Run `root` against a fresh interpreter writing to `out`, returning the
/// final global bindings.
pub fn interpret<W: Write>(root: &AstNode, out: W) -> Result<Vec<(String, i64)>, RuntimeError> {
    let mut interp = Interpreter::new(out);
    interp.run(root)?;
    Ok(interp.dump_globals())
}
