use crate::ast::AstNode;
use crate::error::{Level, MinicErrorExt};
use crate::location::{Location, Span};

/// The fatal conditions the evaluator can hit. Every one of them halts the
/// run; nothing is retried or recovered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeErrorKind {
    UndefinedVariable { name: String },
    UndefinedFunction { name: String },
    /// A statement-shaped node reached expression evaluation.
    UnsupportedExpression { kind: String },
    DivisionByZero,
    ArityMismatch { name: String, expected: usize, found: usize },
    /// More nested calls than the interpreter allows, usually runaway recursion.
    CallDepthExceeded { name: String, limit: usize },
    Output { reason: String },
}

impl std::fmt::Display for RuntimeErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuntimeErrorKind::UndefinedVariable { name } => write!(f, "Undefined variable: {}", name),
            RuntimeErrorKind::UndefinedFunction { name } => write!(f, "Undefined function: {}", name),
            RuntimeErrorKind::UnsupportedExpression { kind } => write!(f, "Unsupported expression: {}", kind),
            RuntimeErrorKind::DivisionByZero => write!(f, "Division by zero"),
            RuntimeErrorKind::ArityMismatch { name, expected, found } => write!(
                f,
                "Function {} expects {} argument(s), got {}",
                name, expected, found
            ),
            RuntimeErrorKind::CallDepthExceeded { name, limit } => {
                write!(f, "Call to {} exceeds the maximum call depth of {}", name, limit)
            }
            RuntimeErrorKind::Output { reason } => write!(f, "Failed to write program output: {}", reason),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    location: Option<Location>,
    span: Option<Span>,
}

impl RuntimeError {
    pub fn new(kind: RuntimeErrorKind) -> Self {
        RuntimeError {
            kind,
            location: None,
            span: None,
        }
    }

    /// Attach the source position of `node`, keeping any position already set.
    pub fn at(mut self, node: &AstNode) -> Self {
        if self.location.is_none() {
            self.location = node.location.clone();
            self.span = node.span.clone();
        }
        self
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.location {
            Some(loc) => write!(f, "{} at {}", self.kind, loc),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for RuntimeError {}

impl MinicErrorExt for RuntimeError {
    fn level(&self) -> Level {
        Level::Error
    }

    fn message(&self) -> String {
        self.kind.to_string()
    }

    fn issuer(&self) -> String {
        "minic.interp".to_string()
    }

    fn span(&self) -> Option<Span> {
        self.span.clone()
    }

    fn location(&self) -> Option<Location> {
        self.location.clone()
    }
}

impl From<RuntimeError> for Box<dyn MinicErrorExt> {
    fn from(err: RuntimeError) -> Self {
        Box::new(err)
    }
}
