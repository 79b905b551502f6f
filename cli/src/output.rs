/// cli/src/output.rs
/// Output utilities for CLI
/// description: Pipeline sinks for the terminal (styled headers, a symbol
/// table) and for machine-readable JSON.

use std::io::{self, Write};

use comfy_table::{Table, presets::UTF8_FULL};
use console::Style;
use minic_core::{
    AstNode, IrModule, Level, Location, MinicErrorExt, OptimizeReport, PipelineSink, PipelineSummary, Section, Span,
};
use serde::Serialize;

/// Styles for different output elements
pub struct FormatStyle {
    pub title: Style,
    pub info: Style,
    pub error: Style,
}

impl Default for FormatStyle {
    fn default() -> Self {
        FormatStyle {
            title: Style::new().bold().underlined(),
            info: Style::new().cyan(),
            error: Style::new().red().bold().for_stderr(),
        }
    }
}

/// ====================================================================
/// Terminal sink

/// Writes sections with styled headers; program output passes through
/// untouched. Styling is dropped automatically when stdout is not a tty.
pub struct ConsoleSink<T: Write> {
    out: T,
    formatting: FormatStyle,
}

impl<T: Write> ConsoleSink<T> {
    pub fn new(out: T, formatting: FormatStyle) -> Self {
        ConsoleSink { out, formatting }
    }
}

impl<T: Write> PipelineSink for ConsoleSink<T> {
    fn writer(&mut self) -> &mut dyn Write {
        &mut self.out
    }

    fn section(&mut self, section: Section) -> io::Result<()> {
        let title = self.formatting.title.apply_to(format!("== {} ==", section));
        writeln!(self.out, "{}", title)
    }

    fn ir(&mut self, module: &IrModule) -> io::Result<()> {
        for op in module.get_ops() {
            if op.is_label() {
                writeln!(self.out, "{}", self.formatting.info.apply_to(op))?;
            } else {
                writeln!(self.out, "    {}", op)?;
            }
        }
        Ok(())
    }

    fn globals(&mut self, globals: &[(String, i64)]) -> io::Result<()> {
        writeln!(self.out, "{}", render_symbol_table(globals))
    }
}

pub fn render_symbol_table(globals: &[(String, i64)]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Name", "Value"]);
    for (name, value) in globals {
        table.add_row(vec![name.clone(), value.to_string()]);
    }
    table
}

/// ====================================================================
/// JSON sink

#[derive(Debug, Serialize)]
struct GlobalEntry {
    name: String,
    value: i64,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    script: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    optimize: Option<OptimizeReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ast: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ir: Option<Vec<String>>,
    output: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    globals: Option<Vec<GlobalEntry>>,
}

/// Collects every stage's result and writes one JSON document at the end.
#[derive(Default)]
pub struct JsonSink {
    output: Vec<u8>,
    ast: Option<serde_json::Value>,
    ir: Option<Vec<String>>,
    globals: Option<Vec<GlobalEntry>>,
}

impl JsonSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish<W: Write>(self, script: &str, summary: &PipelineSummary, out: &mut W) -> io::Result<()> {
        let output = String::from_utf8_lossy(&self.output);
        let report = JsonReport {
            script,
            optimize: summary.optimize,
            ast: self.ast,
            ir: self.ir,
            output: output.lines().map(str::to_string).collect(),
            globals: self.globals,
        };
        serde_json::to_writer_pretty(&mut *out, &report).map_err(io::Error::other)?;
        writeln!(out)
    }
}

impl PipelineSink for JsonSink {
    fn writer(&mut self) -> &mut dyn Write {
        &mut self.output
    }

    fn section(&mut self, _section: Section) -> io::Result<()> {
        Ok(())
    }

    fn ast(&mut self, root: &AstNode) -> io::Result<()> {
        self.ast = Some(serde_json::to_value(root).map_err(io::Error::other)?);
        Ok(())
    }

    fn ir(&mut self, module: &IrModule) -> io::Result<()> {
        self.ir = Some(module.lines());
        Ok(())
    }

    fn globals(&mut self, globals: &[(String, i64)]) -> io::Result<()> {
        self.globals = Some(
            globals
                .iter()
                .map(|(name, value)| GlobalEntry { name: name.clone(), value: *value })
                .collect(),
        );
        Ok(())
    }
}

/// Failure to write the final report to stdout.
#[derive(Debug)]
pub struct OutputError {
    reason: String,
}

impl From<io::Error> for OutputError {
    fn from(e: io::Error) -> Self {
        OutputError { reason: e.to_string() }
    }
}

impl MinicErrorExt for OutputError {
    fn level(&self) -> Level {
        Level::Critical
    }
    fn message(&self) -> String {
        format!("Failed to write output: {}", self.reason)
    }
    fn issuer(&self) -> String {
        "minic.cli.output".to_string()
    }
    fn span(&self) -> Option<Span> {
        None
    }
    fn location(&self) -> Option<Location> {
        None
    }
}
