//! Statement IR.

use crate::expr::Expr;
use crate::hook::HookCall;
use crate::word::Word;

/// Statement kinds.
#[derive(Clone, Debug)]
pub enum Stmt<W: Word> {
    /// Padding with no effect.
    NoOp,
    /// Instruction-boundary marker: start of one guest instruction at
    /// `addr`, `len` bytes long.
    IMark { addr: W::Reg, len: u8 },
    /// Assign a value to an SSA temporary.
    WrTmp { tmp: u32, value: Expr<W> },
    /// Write to guest state at a byte offset.
    Put { offset: u16, value: Expr<W> },
    /// Store to guest memory at a computed address.
    Store {
        addr: Expr<W>,
        value: Expr<W>,
        width: u8,
    },
    /// Conditional side exit: leave the block for `target` if `cond` is
    /// nonzero, otherwise fall through to the next statement.
    Exit { cond: Expr<W>, target: W::Reg },
    /// Call to a native hook (spliced in by the pass).
    Hook(HookCall<W>),
}

impl<W: Word> Stmt<W> {
    /// Create an instruction-boundary marker.
    pub const fn imark(addr: W::Reg, len: u8) -> Self {
        Self::IMark { addr, len }
    }

    /// Create a temporary assignment statement.
    pub const fn wr_tmp(tmp: u32, value: Expr<W>) -> Self {
        Self::WrTmp { tmp, value }
    }

    /// Create a guest-state write statement.
    pub const fn put(offset: u16, value: Expr<W>) -> Self {
        Self::Put { offset, value }
    }

    /// Create a memory store statement.
    pub const fn store(addr: Expr<W>, value: Expr<W>, width: u8) -> Self {
        Self::Store { addr, value, width }
    }

    /// Create a conditional side-exit statement.
    pub const fn exit(cond: Expr<W>, target: W::Reg) -> Self {
        Self::Exit { cond, target }
    }

    /// Create a hook-call statement.
    pub const fn hook(call: HookCall<W>) -> Self {
        Self::Hook(call)
    }

    /// Check if this statement is an instruction-boundary marker.
    pub const fn is_imark(&self) -> bool {
        matches!(self, Self::IMark { .. })
    }

    /// Check if this statement is a memory store.
    pub const fn is_store(&self) -> bool {
        matches!(self, Self::Store { .. })
    }

    /// Check if this statement is a side exit.
    pub const fn is_exit(&self) -> bool {
        matches!(self, Self::Exit { .. })
    }

    /// Check if this statement is a hook call.
    pub const fn is_hook(&self) -> bool {
        matches!(self, Self::Hook(_))
    }
}
