//! The instrumentation pass.
//!
//! Rewrites one basic block at a time, splicing collector hook calls in
//! front of the statements they describe. The rewritten block executes
//! every original operation exactly once, in original order; the hooks
//! are pure side effects.

use sbprof_ir::{Block, Callee, CalleeResolver, Expr, HookCall, Stmt, Word};
use sbprof_stats::{
    sbprof_record_instr_len, sbprof_record_mem_access, sbprof_record_store_count,
};

/// The three resolved collector callees the pass splices in.
#[derive(Clone, Copy, Debug)]
pub struct HookSet {
    pub instr_len: Callee,
    pub mem_access: Callee,
    pub store_count: Callee,
}

impl HookSet {
    /// Resolve the collector entry points through the host service.
    pub fn resolve(resolver: &dyn CalleeResolver) -> Self {
        Self {
            instr_len: resolver.resolve("sbprof_record_instr_len", sbprof_record_instr_len),
            mem_access: resolver.resolve("sbprof_record_mem_access", sbprof_record_mem_access),
            store_count: resolver.resolve("sbprof_record_store_count", sbprof_record_store_count),
        }
    }
}

/// Instrument one basic block.
///
/// Walks the statements in order and splices hook calls:
/// - before each boundary marker, a length-histogram call carrying the
///   instruction's byte length;
/// - before each store, a page-offset call carrying the store's address
///   expression (evaluated at runtime, when the address is known);
/// - before each side exit, a flush of the block-local store tally.
///   Exits may fall through, so the tally restarts at zero and keeps
///   accumulating for the rest of the block.
///
/// A nonzero tally left after the walk is flushed once at the end, ahead
/// of the block-end transfer. Preamble statements before the first
/// boundary marker are framework-owned and copied verbatim; `NoOp`
/// padding is dropped throughout, as the host's own passes do.
pub fn instrument_block<W: Word>(sb_in: &Block<W>, hooks: &HookSet) -> Block<W> {
    let mut sb_out = sb_in.copy_empty();

    // Copy verbatim any preamble preceding the first boundary marker.
    let mut i = 0;
    while i < sb_in.stmts.len() && !sb_in.stmts[i].is_imark() {
        if !matches!(sb_in.stmts[i], Stmt::NoOp) {
            sb_out.push(sb_in.stmts[i].clone());
        }
        i += 1;
    }

    let mut store_tally: u64 = 0;
    for st in &sb_in.stmts[i..] {
        match st {
            Stmt::NoOp => continue,
            Stmt::IMark { len, .. } => {
                sb_out.push(Stmt::hook(HookCall::unary(
                    hooks.instr_len,
                    Expr::imm_u64(u64::from(*len)),
                )));
            }
            Stmt::Store { addr, .. } => {
                store_tally += 1;
                sb_out.push(Stmt::hook(HookCall::unary(hooks.mem_access, addr.clone())));
            }
            Stmt::Exit { .. } => {
                sb_out.push(Stmt::hook(HookCall::unary(
                    hooks.store_count,
                    Expr::imm_u64(store_tally),
                )));
                store_tally = 0;
            }
            _ => {}
        }
        sb_out.push(st.clone());
    }

    // Stores since the last exit have not been flushed yet.
    if store_tally != 0 {
        sb_out.push(Stmt::hook(HookCall::unary(
            hooks.store_count,
            Expr::imm_u64(store_tally),
        )));
    }

    sb_out
}
