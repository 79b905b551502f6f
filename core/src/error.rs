use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Info,
    Warning,
    Error,
    Critical,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level_str = match self {
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        };
        write!(f, "{}", level_str)
    }
}

/// Common surface of every diagnostic the toolchain can produce.
///
/// Concrete error structs (syntax, runtime, config, missing script) implement
/// this so the driver can report them uniformly through
/// [`crate::generate_error_report`].
pub trait MinicErrorExt {
    fn level(&self) -> Level;
    fn message(&self) -> String;
    fn issuer(&self) -> String;
    fn span(&self) -> Option<crate::location::Span>;
    fn location(&self) -> Option<crate::location::Location>;
}

impl fmt::Display for dyn MinicErrorExt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::generate_error_report(self))
    }
}

impl fmt::Debug for dyn MinicErrorExt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MinicError")
            .field("level", &self.level())
            .field("issuer", &self.issuer())
            .field("location", &self.location().map(|loc| loc.to_string()))
            .field("span", &self.span().map(|span| span.to_string()))
            .field("message", &self.message())
            .finish()
    }
}
