//! Block builder fluent API.
//!
//! Convenience layer for hosts (and tests) assembling guest blocks by
//! hand. Tracks the guest program counter so boundary markers land at
//! the right addresses.

use crate::block::{Block, JumpKind};
use crate::expr::Expr;
use crate::stmt::Stmt;
use crate::word::Word;

/// Builder for a basic block.
pub struct BlockBuilder<W: Word> {
    pc: u64,
    stmts: Vec<Stmt<W>>,
}

impl<W: Word> BlockBuilder<W> {
    /// Create a builder starting at the given guest PC.
    #[must_use]
    pub const fn new(start_pc: u64) -> Self {
        Self {
            pc: start_pc,
            stmts: Vec::new(),
        }
    }

    /// Current guest PC (start PC plus lengths of instructions so far).
    #[must_use]
    pub const fn pc(&self) -> u64 {
        self.pc
    }

    /// Begin a new guest instruction of `len` bytes.
    #[must_use]
    pub fn instr(mut self, len: u8) -> Self {
        self.stmts.push(Stmt::imark(W::from_u64(self.pc), len));
        self.pc += u64::from(len);
        self
    }

    /// Assign a value to a temporary.
    #[must_use]
    pub fn wr_tmp(mut self, tmp: u32, value: Expr<W>) -> Self {
        self.stmts.push(Stmt::wr_tmp(tmp, value));
        self
    }

    /// Write to guest state.
    #[must_use]
    pub fn put(mut self, offset: u16, value: Expr<W>) -> Self {
        self.stmts.push(Stmt::put(offset, value));
        self
    }

    /// Store to guest memory.
    #[must_use]
    pub fn store(mut self, addr: Expr<W>, value: Expr<W>, width: u8) -> Self {
        self.stmts.push(Stmt::store(addr, value, width));
        self
    }

    /// Add a conditional side exit.
    #[must_use]
    pub fn exit(mut self, cond: Expr<W>, target: u64) -> Self {
        self.stmts.push(Stmt::exit(cond, W::from_u64(target)));
        self
    }

    /// Add a raw statement.
    #[must_use]
    pub fn stmt(mut self, stmt: Stmt<W>) -> Self {
        self.stmts.push(stmt);
        self
    }

    /// Build with a fall-through to the PC after the last instruction.
    #[must_use]
    pub fn build_fall(self) -> Block<W> {
        let next = Expr::imm(W::from_u64(self.pc));
        Block {
            stmts: self.stmts,
            next,
            jump_kind: JumpKind::Fall,
        }
    }

    /// Build with an explicit block-end transfer.
    #[must_use]
    pub fn build(self, next: Expr<W>, jump_kind: JumpKind) -> Block<W> {
        Block {
            stmts: self.stmts,
            next,
            jump_kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::word::W64;

    #[test]
    fn test_builder_tracks_pc() {
        let block = BlockBuilder::<W64>::new(0x8000_0000)
            .instr(4)
            .wr_tmp(0, Expr::imm(42))
            .instr(2)
            .build_fall();

        assert_eq!(block.instr_count(), 2);
        assert_eq!(block.next, Expr::Imm(0x8000_0006));
        let Stmt::IMark { addr, len } = &block.stmts[2] else {
            panic!("expected boundary marker");
        };
        assert_eq!(*addr, 0x8000_0004);
        assert_eq!(*len, 2);
    }
}
