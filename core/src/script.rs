use std::path::PathBuf;

use crate::MinicErrorExt;

/// A named unit of source text handed to the frontend.
#[derive(Debug, Clone)]
pub struct Script {
    pub name: String,
    pub path: PathBuf,
    pub content: String,
}

impl Script {
    pub fn new(path: PathBuf) -> Result<Self, Box<dyn MinicErrorExt>> {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(MissingScriptError {
                path: path.clone(),
                reason: e.to_string(),
            }) as Box<dyn MinicErrorExt>
        })?;
        log::debug!("loaded script {} ({} bytes)", name, content.len());
        Ok(Script {
            name,
            path,
            content,
        })
    }

    /// Build a script from in-memory text, e.g. for tests or stdin.
    pub fn from_source(name: &str, content: &str) -> Self {
        Script {
            name: name.to_string(),
            path: PathBuf::from(name),
            content: content.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}

impl std::fmt::Display for Script {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Script: {} at {:?}", self.name, self.path)
    }
}

#[derive(Debug, Clone)]
pub struct MissingScriptError {
    pub path: PathBuf,
    pub reason: String,
}

impl std::fmt::Display for MissingScriptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Missing script at {:?}: {}", self.path, self.reason)
    }
}

impl std::error::Error for MissingScriptError {}

impl MinicErrorExt for MissingScriptError {
    fn level(&self) -> crate::Level {
        crate::Level::Error
    }

    fn message(&self) -> String {
        self.to_string()
    }

    fn issuer(&self) -> String {
        "minic.script".to_string()
    }

    fn span(&self) -> Option<crate::location::Span> {
        None
    }

    fn location(&self) -> Option<crate::location::Location> {
        None
    }
}
