use crate::error::{Level, MinicErrorExt};
use crate::location::{Location, Span};

#[derive(Debug, Clone)]
pub struct SyntaxError {
    level: Level,
    message: String,
    issuer: String,
    location: Option<Location>,
    span: Option<Span>,
}

impl SyntaxError {
    pub fn new(issuer: String, location: Option<Location>, span: Option<Span>) -> Self {
        SyntaxError {
            level: Level::Error,
            message: "There was a syntax error in the script.".to_string(),
            issuer,
            location,
            span,
        }
    }

    pub fn with(level: Level, message: String, issuer: String, location: Option<Location>, span: Option<Span>) -> Self {
        SyntaxError {
            level,
            message,
            issuer,
            location,
            span,
        }
    }

    /// Convert a pest failure into a located syntax error.
    pub fn from_pest(err: pest::error::Error<super::Rule>, file: &str) -> Self {
        let (line, column) = match err.line_col {
            pest::error::LineColLocation::Pos(pos) => pos,
            pest::error::LineColLocation::Span(start, _) => start,
        };
        SyntaxError {
            level: Level::Error,
            message: err.variant.message().to_string(),
            issuer: "minic.ast.parse".to_string(),
            location: Some(Location::new(file.to_string(), line, column)),
            span: None,
        }
    }
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(loc) = &self.location {
            write!(f, "{} (at {}:{}:{})", self.message, loc.file, loc.line, loc.column)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for SyntaxError {}

impl MinicErrorExt for SyntaxError {
    fn level(&self) -> Level {
        self.level
    }

    fn message(&self) -> String {
        self.message.clone()
    }

    fn issuer(&self) -> String {
        self.issuer.clone()
    }

    fn span(&self) -> Option<Span> {
        self.span.clone()
    }

    fn location(&self) -> Option<Location> {
        self.location.clone()
    }
}

impl From<SyntaxError> for Box<dyn MinicErrorExt> {
    fn from(err: SyntaxError) -> Self {
        Box::new(err)
    }
}
