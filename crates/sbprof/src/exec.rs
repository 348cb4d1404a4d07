//! Block executor.
//!
//! A small host-side interpreter for instrumented blocks: evaluates
//! expressions over per-block temporaries and a scratch guest, performs
//! stores into a sparse memory map, honors side exits, and invokes hook
//! statements through their resolved callee with the collector context
//! pointer. Fills the role the host framework's dispatcher plays around
//! the real pass.

use std::ffi::c_void;

use rustc_hash::FxHashMap;

use sbprof_ir::{BinaryOp, Block, Expr, Stmt, UnaryOp, Word};

use crate::error::{Error, Result};

/// Where control went after a block finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// A side exit was taken.
    SideExit(u64),
    /// The block-end transfer was followed.
    Next(u64),
}

impl Outcome {
    /// Follow-on guest PC regardless of how the block was left.
    #[must_use]
    pub const fn target(self) -> u64 {
        match self {
            Self::SideExit(pc) | Self::Next(pc) => pc,
        }
    }
}

/// Scratch guest an instrumented block runs against.
#[derive(Debug, Default)]
pub struct Executor<W: Word> {
    /// Guest-state slots, keyed by byte offset.
    state: FxHashMap<u16, u64>,
    /// Sparse guest memory, keyed by store address.
    mem: FxHashMap<u64, u64>,
    /// Per-block SSA temporaries, cleared at block entry.
    temps: FxHashMap<u32, u64>,
    _marker: std::marker::PhantomData<W>,
}

impl<W: Word> Executor<W> {
    /// Create an executor with zeroed guest state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: FxHashMap::default(),
            mem: FxHashMap::default(),
            temps: FxHashMap::default(),
            _marker: std::marker::PhantomData,
        }
    }

    /// Read a guest-state slot (zero if never written).
    #[must_use]
    pub fn state_value(&self, offset: u16) -> u64 {
        self.state.get(&offset).copied().unwrap_or(0)
    }

    /// Read a guest memory word (zero if never stored).
    #[must_use]
    pub fn mem_value(&self, addr: u64) -> u64 {
        self.mem.get(&addr).copied().unwrap_or(0)
    }

    /// Execute one block.
    ///
    /// `ctx` is the opaque collector context handed to every hook call;
    /// the executor never inspects it.
    ///
    /// # Errors
    /// Returns [`Error::UnboundTemp`] when an expression reads a
    /// temporary the block never assigned.
    pub fn run_block(&mut self, block: &Block<W>, ctx: *mut c_void) -> Result<Outcome> {
        self.temps.clear();

        for st in &block.stmts {
            match st {
                Stmt::NoOp | Stmt::IMark { .. } => {}
                Stmt::WrTmp { tmp, value } => {
                    let v = self.eval(value)?;
                    self.temps.insert(*tmp, v);
                }
                Stmt::Put { offset, value } => {
                    let v = self.eval(value)?;
                    self.state.insert(*offset, v);
                }
                Stmt::Store { addr, value, .. } => {
                    let a = self.eval(addr)?;
                    let v = self.eval(value)?;
                    self.mem.insert(a, v);
                }
                Stmt::Exit { cond, target } => {
                    if self.eval(cond)? != 0 {
                        return Ok(Outcome::SideExit(W::to_u64(*target)));
                    }
                }
                Stmt::Hook(call) => {
                    debug_assert_eq!(call.args.len(), usize::from(call.callee.arity));
                    let arg = self.eval(&call.args[0])?;
                    unsafe { (call.callee.func)(ctx, arg) };
                }
            }
        }

        let next = self.eval(&block.next)?;
        Ok(Outcome::Next(next))
    }

    fn eval(&self, expr: &Expr<W>) -> Result<u64> {
        let v = match expr {
            Expr::Imm(v) => W::to_u64(*v),
            Expr::Tmp(t) => *self.temps.get(t).ok_or(Error::UnboundTemp(*t))?,
            Expr::Get { offset, .. } => self.state_value(*offset),
            Expr::Unary { op, expr } => {
                let v = self.eval(expr)?;
                match op {
                    UnaryOp::Not => !v,
                    UnaryOp::Neg => v.wrapping_neg(),
                }
            }
            Expr::Binary { op, left, right } => {
                let l = self.eval(left)?;
                let r = self.eval(right)?;
                match op {
                    BinaryOp::Add => l.wrapping_add(r),
                    BinaryOp::Sub => l.wrapping_sub(r),
                    BinaryOp::And => l & r,
                    BinaryOp::Or => l | r,
                    BinaryOp::Xor => l ^ r,
                    BinaryOp::Shl => l.wrapping_shl(r as u32),
                    BinaryOp::Shr => l.wrapping_shr(r as u32),
                    BinaryOp::Eq => u64::from(mask::<W>(l) == mask::<W>(r)),
                    BinaryOp::Ne => u64::from(mask::<W>(l) != mask::<W>(r)),
                    BinaryOp::Ltu => u64::from(mask::<W>(l) < mask::<W>(r)),
                }
            }
        };
        Ok(mask::<W>(v))
    }
}

/// Truncate a value to the guest word width.
fn mask<W: Word>(v: u64) -> u64 {
    W::to_u64(W::from_u64(v))
}
