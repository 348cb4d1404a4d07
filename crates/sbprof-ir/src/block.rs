//! Basic block IR.

use crate::expr::Expr;
use crate::stmt::Stmt;
use crate::word::Word;

/// How control leaves the block through its fall-through end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JumpKind {
    /// Ordinary transfer to the next block.
    Fall,
    /// Function call.
    Call,
    /// Function return.
    Ret,
}

/// One basic block: an ordered statement sequence plus the block-end
/// transfer. Side exits may also occur mid-sequence via [`Stmt::Exit`].
#[derive(Clone, Debug)]
pub struct Block<W: Word> {
    /// Statements in execution order.
    pub stmts: Vec<Stmt<W>>,
    /// Target of the block-end transfer.
    pub next: Expr<W>,
    /// Kind of the block-end transfer.
    pub jump_kind: JumpKind,
}

impl<W: Word> Block<W> {
    /// Create an empty block with the given block-end transfer.
    pub const fn new(next: Expr<W>, jump_kind: JumpKind) -> Self {
        Self {
            stmts: Vec::new(),
            next,
            jump_kind,
        }
    }

    /// Copy everything except the statements. A rewriting pass starts
    /// from this and re-adds statements one by one.
    #[must_use]
    pub fn copy_empty(&self) -> Self {
        Self {
            stmts: Vec::new(),
            next: self.next.clone(),
            jump_kind: self.jump_kind,
        }
    }

    /// Append a statement to the block.
    pub fn push(&mut self, stmt: Stmt<W>) {
        self.stmts.push(stmt);
    }

    /// Get number of statements.
    pub fn len(&self) -> usize {
        self.stmts.len()
    }

    /// Check if block has no statements.
    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }

    /// Number of guest instructions (boundary markers) in the block.
    pub fn instr_count(&self) -> usize {
        self.stmts.iter().filter(|s| s.is_imark()).count()
    }

    /// Number of memory stores in the block.
    pub fn store_count(&self) -> usize {
        self.stmts.iter().filter(|s| s.is_store()).count()
    }

    /// Number of side exits in the block.
    pub fn exit_count(&self) -> usize {
        self.stmts.iter().filter(|s| s.is_exit()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::word::W64;

    #[test]
    fn test_copy_empty_keeps_transfer() {
        let mut block = Block::<W64>::new(Expr::imm(0x1000), JumpKind::Fall);
        block.push(Stmt::imark(0x1000, 4));
        block.push(Stmt::store(Expr::tmp(0), Expr::imm(1), 8));

        let copy = block.copy_empty();
        assert!(copy.is_empty());
        assert_eq!(copy.next, Expr::Imm(0x1000));
        assert_eq!(copy.jump_kind, JumpKind::Fall);
        assert_eq!(block.len(), 2);
    }

    #[test]
    fn test_kind_counts() {
        let mut block = Block::<W64>::new(Expr::imm(0x2000), JumpKind::Fall);
        block.push(Stmt::imark(0x1000, 4));
        block.push(Stmt::store(Expr::tmp(0), Expr::imm(1), 8));
        block.push(Stmt::exit(Expr::tmp(1), 0x3000));
        block.push(Stmt::imark(0x1004, 2));

        assert_eq!(block.instr_count(), 2);
        assert_eq!(block.store_count(), 1);
        assert_eq!(block.exit_count(), 1);
    }
}
