//! file: core/src/pipeline.rs
//! description: the parse -> optimize -> IR -> run driver.
//!
//! `run_pipeline` sequences the stages a `PipelineConfig` enables and hands
//! each stage's result to a [`PipelineSink`]. The AST section shows the tree
//! as parsed, before any optimization. Sections are produced in a
//! fixed order: AST, intermediate code, program output, symbol table.
//!
use std::io::{self, Write};
use std::path::Path;

use serde::Deserialize;

use crate::ast::{AstNode, generate_ast_from_source};
use crate::error::{Level, MinicErrorExt};
use crate::interp::{Interpreter, RuntimeError, RuntimeErrorKind};
use crate::ir::{IrModule, lower_ast_to_ir};
use crate::location::{Location, Span};
use crate::opt::{OptimizeReport, optimize};
use crate::script::Script;

/// Which stages run. Every field is optional in a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub optimize: bool,
    pub print_ast: bool,
    pub emit_ir: bool,
    pub run: bool,
    pub dump_globals: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            optimize: true,
            print_ast: false,
            emit_ir: true,
            run: true,
            dump_globals: false,
        }
    }
}

impl PipelineConfig {
    pub fn from_json_str(text: &str, file: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|e| ConfigError {
            message: format!("Invalid pipeline config: {}", e),
            location: Some(Location::new(file.to_string(), e.line(), e.column())),
        })
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let file = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError {
            message: format!("Cannot read config {}: {}", file, e),
            location: None,
        })?;
        let config = Self::from_json_str(&text, &file)?;
        log::debug!("loaded pipeline config from {}: {:?}", file, config);
        Ok(config)
    }
}

#[derive(Debug, Clone)]
pub struct ConfigError {
    message: String,
    location: Option<Location>,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ConfigError {}

impl MinicErrorExt for ConfigError {
    fn level(&self) -> Level {
        Level::Error
    }
    fn message(&self) -> String {
        self.message.clone()
    }
    fn issuer(&self) -> String {
        "minic.pipeline.config".to_string()
    }
    fn span(&self) -> Option<Span> {
        None
    }
    fn location(&self) -> Option<Location> {
        self.location.clone()
    }
}

impl From<ConfigError> for Box<dyn MinicErrorExt> {
    fn from(value: ConfigError) -> Self {
        Box::new(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Ast,
    Ir,
    Output,
    Symbols,
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Section::Ast => write!(f, "Abstract Syntax Tree"),
            Section::Ir => write!(f, "Intermediate Code"),
            Section::Output => write!(f, "Program Output"),
            Section::Symbols => write!(f, "Symbol Table"),
        }
    }
}

/// Where pipeline results go. The defaults render plain text into
/// [`PipelineSink::writer`], which also receives the program's own output.
pub trait PipelineSink {
    fn writer(&mut self) -> &mut dyn Write;

    fn section(&mut self, section: Section) -> io::Result<()> {
        writeln!(self.writer(), "=== {} ===", section)
    }

    fn ast(&mut self, root: &AstNode) -> io::Result<()> {
        write!(self.writer(), "{}", root)
    }

    fn ir(&mut self, module: &IrModule) -> io::Result<()> {
        write!(self.writer(), "{}", module)
    }

    fn globals(&mut self, globals: &[(String, i64)]) -> io::Result<()> {
        for (name, value) in globals {
            writeln!(self.writer(), "{} = {}", name, value)?;
        }
        Ok(())
    }
}

/// Plain-text sink over any writer.
pub struct TextSink<W: Write> {
    out: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        TextSink { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> PipelineSink for TextSink<W> {
    fn writer(&mut self) -> &mut dyn Write {
        &mut self.out
    }
}

/// What a pipeline run did besides writing to its sink.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineSummary {
    pub optimize: Option<OptimizeReport>,
    pub ir_ops: Option<usize>,
    pub globals: Option<Vec<(String, i64)>>,
}

fn sink_error(e: io::Error) -> Box<dyn MinicErrorExt> {
    RuntimeError::new(RuntimeErrorKind::Output { reason: e.to_string() }).into()
}

/// Parse `script` and run every stage `config` enables, in order.
pub fn run_pipeline(
    script: &Script,
    config: &PipelineConfig,
    sink: &mut dyn PipelineSink,
) -> Result<PipelineSummary, Box<dyn MinicErrorExt>> {
    let mut summary = PipelineSummary::default();
    let mut root = generate_ast_from_source(script)?;

    if config.print_ast {
        sink.section(Section::Ast).map_err(sink_error)?;
        sink.ast(&root).map_err(sink_error)?;
    }

    if config.optimize {
        summary.optimize = Some(optimize(&mut root));
    }

    if config.emit_ir {
        let module = lower_ast_to_ir(&root);
        summary.ir_ops = Some(module.len());
        sink.section(Section::Ir).map_err(sink_error)?;
        sink.ir(&module).map_err(sink_error)?;
    }

    if config.run {
        sink.section(Section::Output).map_err(sink_error)?;
        let globals = {
            let mut interp = Interpreter::new(sink.writer());
            interp.run(&root)?;
            interp.dump_globals()
        };
        if config.dump_globals {
            sink.section(Section::Symbols).map_err(sink_error)?;
            sink.globals(&globals).map_err(sink_error)?;
        }
        summary.globals = Some(globals);
    } else if config.dump_globals {
        log::warn!("symbol table requested without running {}, skipping", script.name);
    }

    Ok(summary)
}
