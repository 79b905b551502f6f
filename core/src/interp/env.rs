//! file: core/src/interp/env.rs
//! description: runtime binding environment.
//!
//! Bindings live in an ordered list of frames: frame 0 is the global frame
//! and each active function call pushes one more. Lookups walk frames
//! innermost-first and, within a frame, newest-first, so the most recently
//! pushed binding of a name shadows older ones.
//!
use serde::Serialize;

use super::err::{RuntimeError, RuntimeErrorKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Binding {
    pub name: String,
    pub value: i64,
    pub is_global: bool,
}

type Frame = Vec<Binding>;

#[derive(Debug, Clone)]
pub struct Environment {
    frames: Vec<Frame>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            frames: vec![Vec::new()],
        }
    }

    /// ------- Binding Helpers -------

    pub fn read(&self, name: &str) -> Result<i64, RuntimeError> {
        self.lookup(name)
            .map(|b| b.value)
            .ok_or_else(|| RuntimeError::new(RuntimeErrorKind::UndefinedVariable { name: name.to_string() }))
    }

    /// Update the visible binding of `name`, or create one in the innermost
    /// frame. New bindings made outside any call are global.
    pub fn write(&mut self, name: &str, value: i64) {
        if let Some(binding) = self.lookup_mut(name) {
            binding.value = value;
            return;
        }
        let is_global = !self.in_call();
        if let Some(frame) = self.frames.last_mut() {
            frame.push(Binding {
                name: name.to_string(),
                value,
                is_global,
            });
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Binding> {
        self.frames
            .iter()
            .rev()
            .flat_map(|frame| frame.iter().rev())
            .find(|b| b.name == name)
    }

    fn lookup_mut(&mut self, name: &str) -> Option<&mut Binding> {
        self.frames
            .iter_mut()
            .rev()
            .flat_map(|frame| frame.iter_mut().rev())
            .find(|b| b.name == name)
    }

    /// ------- Scope Helpers -------

    /// Open a call frame holding one local binding per `(name, value)` pair.
    pub fn push_scope<I>(&mut self, bindings: I)
    where
        I: IntoIterator<Item = (String, i64)>,
    {
        let frame = bindings
            .into_iter()
            .map(|(name, value)| Binding {
                name,
                value,
                is_global: false,
            })
            .collect();
        self.frames.push(frame);
    }

    /// Close the innermost call frame, dropping its parameters and any locals
    /// created while it was active. Returns how many bindings were released.
    /// The global frame is never popped.
    pub fn pop_scope(&mut self) -> usize {
        if self.frames.len() > 1 {
            self.frames.pop().map(|f| f.len()).unwrap_or(0)
        } else {
            0
        }
    }

    pub fn in_call(&self) -> bool {
        self.frames.len() > 1
    }

    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    /// Total number of bindings across all frames.
    pub fn len(&self) -> usize {
        self.frames.iter().map(|f| f.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// ------- Global Helpers -------

    /// The latest value of every global name, in first-binding order.
    pub fn dump_globals(&self) -> Vec<(String, i64)> {
        let mut out: Vec<(String, i64)> = Vec::new();
        for b in self.frames.iter().flatten().filter(|b| b.is_global) {
            match out.iter_mut().find(|(name, _)| *name == b.name) {
                Some(entry) => entry.1 = b.value,
                None => out.push((b.name.clone(), b.value)),
            }
        }
        out
    }
}
