use crate::ast::AstNode;

/// A registered function: borrowed straight out of its `FunctionDef` node.
#[derive(Debug, Clone, Copy)]
pub struct FunctionEntry<'a> {
    pub name: &'a str,
    pub params: &'a [String],
    pub body: &'a AstNode,
}

/// Functions become callable once their definition statement has executed.
/// Redefinitions append; lookup returns the first registration.
#[derive(Debug, Default)]
pub struct FunctionTable<'a> {
    entries: Vec<FunctionEntry<'a>>,
}

impl<'a> FunctionTable<'a> {
    pub fn new() -> Self {
        FunctionTable { entries: Vec::new() }
    }

    pub fn register(&mut self, name: &'a str, params: &'a [String], body: &'a AstNode) {
        if self.lookup(name).is_some() {
            log::warn!("function {} redefined; the first definition stays in effect", name);
        }
        self.entries.push(FunctionEntry { name, params, body });
    }

    pub fn lookup(&self, name: &str) -> Option<&FunctionEntry<'a>> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
