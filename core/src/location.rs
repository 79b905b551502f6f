use serde::Serialize;

/// A single point in a source file, 1-based like pest reports it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash, Serialize)]
pub struct Location {
    /// The file in which the location is found.
    pub file: String,
    /// The line number of the location.
    pub line: usize,
    /// The column number of the location.
    pub column: usize,
}

impl Location {
    pub fn new(file: String, line: usize, column: usize) -> Self {
        Self { file, line, column }
    }

    /// Location of the start of a pest span within `file`.
    pub fn from_pest(pos: pest::Position<'_>, file: &str) -> Self {
        let (line, column) = pos.line_col();
        Self::new(file.to_string(), line, column)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Hash, Serialize)]
pub struct Span {
    pub start: Location,
    pub end: Location,
}

impl Span {
    pub fn new(start: Location, end: Location) -> Self {
        Self { start, end }
    }

    pub fn from_pest(span: pest::Span<'_>, file: &str) -> Self {
        Self::new(
            Location::from_pest(span.start_pos(), file),
            Location::from_pest(span.end_pos(), file),
        )
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}
