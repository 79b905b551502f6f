pub mod ast;
pub mod error;
pub mod interp;
pub mod ir;
pub mod location;
pub mod opt;
pub mod pipeline;
pub mod script;

pub use ast::{AstNode, AstNodeKind, BinaryOperator, RulesParser, generate_ast_from_source};
pub use error::{Level, MinicErrorExt};
pub use interp::{Interpreter, RuntimeError, RuntimeErrorKind, interpret};
pub use ir::{IrModule, IrOp, generate_ir, lower_ast_to_ir};
pub use location::{Location, Span};
pub use opt::{OptimizeReport, optimize};
pub use pipeline::{PipelineConfig, PipelineSink, PipelineSummary, Section, TextSink, run_pipeline};
pub use script::Script;

pub fn generate_error_report<E: MinicErrorExt + ?Sized>(error: &E) -> String {
    let level = error.level();
    let location = match error.location() {
        Some(loc) => loc.to_string(),
        None => "unknown location".to_string(),
    };
    let message = error.message();

    format!("MINIC | {} | {} | {}", level, location, message)
}
