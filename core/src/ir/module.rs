use serde::Serialize;

use crate::ir::op::{IrOp, Label};

const WHILE_LABEL_BASE: Label = 0;
const FOR_LABEL_BASE: Label = 1000;
const IF_LABEL_BASE: Label = 2000;
/// Labels each construct kind owns per block before moving to the next one.
const LABEL_RANGE_WIDTH: Label = 1000;
/// Distance between consecutive blocks of the same kind: one block per kind.
const LABEL_BLOCK_STRIDE: Label = 3 * LABEL_RANGE_WIDTH;

/// Which counter a fresh label pair is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelRange {
    While,
    For,
    If,
}

/// The output of one lowering run: the instruction list plus the fresh-name
/// counters that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct IrModule {
    pub ops: Vec<IrOp>,
    #[serde(skip)]
    next_temp: usize,
    /// Label pairs handed out so far, per construct kind.
    #[serde(skip)]
    while_pairs: Label,
    #[serde(skip)]
    for_pairs: Label,
    #[serde(skip)]
    if_pairs: Label,
    /// End labels of the loops currently being lowered, innermost last.
    #[serde(skip)]
    loop_ends: Vec<Label>,
}

impl Default for IrModule {
    fn default() -> Self {
        Self::new()
    }
}

impl IrModule {
    pub fn new() -> Self {
        IrModule {
            ops: Vec::new(),
            next_temp: 0,
            while_pairs: 0,
            for_pairs: 0,
            if_pairs: 0,
            loop_ends: Vec::new(),
        }
    }

    /// Allocate a fresh temporary name (`t0`, `t1`, ...).
    pub fn alloc_temp(&mut self) -> String {
        let t = format!("t{}", self.next_temp);
        self.next_temp += 1;
        t
    }

    /// Allocate two consecutive labels from the range of `range`.
    ///
    /// Each kind owns a 1000-label window in every 3000-label block (while at
    /// 0, for at 1000, if at 2000). A kind that fills its window continues in
    /// its window of the next block, so kinds never share a label.
    pub fn alloc_label_pair(&mut self, range: LabelRange) -> (Label, Label) {
        let (pairs, base) = match range {
            LabelRange::While => (&mut self.while_pairs, WHILE_LABEL_BASE),
            LabelRange::For => (&mut self.for_pairs, FOR_LABEL_BASE),
            LabelRange::If => (&mut self.if_pairs, IF_LABEL_BASE),
        };
        let offset = *pairs * 2;
        *pairs += 1;
        let block = offset / LABEL_RANGE_WIDTH;
        let first = block * LABEL_BLOCK_STRIDE + base + offset % LABEL_RANGE_WIDTH;
        (first, first + 1)
    }

    pub fn emit_op(&mut self, op: IrOp) {
        log::trace!("emit {}", op);
        self.ops.push(op);
    }

    pub fn enter_loop(&mut self, end: Label) {
        self.loop_ends.push(end);
    }

    pub fn leave_loop(&mut self) -> Option<Label> {
        self.loop_ends.pop()
    }

    pub fn current_loop_end(&self) -> Option<Label> {
        self.loop_ends.last().copied()
    }

    /// Hide the enclosing loops while a function body is lowered; a `break`
    /// never jumps out of its function. Hand the result to `leave_function`.
    pub fn enter_function(&mut self) -> Vec<Label> {
        std::mem::take(&mut self.loop_ends)
    }

    pub fn leave_function(&mut self, saved: Vec<Label>) {
        self.loop_ends = saved;
    }

    pub fn get_ops(&self) -> &[IrOp] {
        &self.ops
    }

    pub fn temp_count(&self) -> usize {
        self.next_temp
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// The listing as text, one instruction per line.
    pub fn lines(&self) -> Vec<String> {
        self.ops.iter().map(|op| op.to_string()).collect()
    }
}

impl std::fmt::Display for IrModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for op in &self.ops {
            writeln!(f, "{}", op)?;
        }
        Ok(())
    }
}
