//! Synthetic guest workload.
//!
//! A tiny three-block guest program (init, store loop, epilogue) plus
//! the dispatch loop that drives it through the tool and the executor.
//! Used by the CLI and the integration tests; stands in for the real
//! host framework's decoded guest code.

use rustc_hash::FxHashMap;

use sbprof_ir::{Block, BlockBuilder, Expr, JumpKind, Word};

use crate::error::{Error, Result};
use crate::exec::Executor;
use crate::tool::Tool;

/// Jump target meaning "guest finished".
pub const HALT_PC: u64 = 0;

/// Guest entry point.
pub const ENTRY_PC: u64 = 0x1000;

const BODY_PC: u64 = 0x1008;
const DONE_PC: u64 = 0x2000;

/// Guest-state offsets used by the workload.
const COUNTER: u16 = 0;
const PTR: u16 = 8;
const EXIT_CODE: u16 = 16;

/// Store stride; not a divisor of the page size, so offsets spread.
const STRIDE: u64 = 88;

/// Build the workload: a loop that stores its counter through a striding
/// pointer `iterations` times, then an epilogue with one final store.
pub fn build_program<W: Word>(iterations: u64) -> FxHashMap<u64, Block<W>> {
    let iterations = iterations.max(1);
    let mut program = FxHashMap::default();

    let entry = BlockBuilder::<W>::new(ENTRY_PC)
        .instr(4)
        .put(COUNTER, Expr::imm_u64(iterations))
        .instr(4)
        .put(PTR, Expr::imm_u64(0x0001_0000))
        .build_fall();
    program.insert(ENTRY_PC, entry);

    let body = BlockBuilder::<W>::new(BODY_PC)
        .instr(4)
        .wr_tmp(0, Expr::get(COUNTER, 8))
        .wr_tmp(1, Expr::get(PTR, 8))
        .store(Expr::tmp(1), Expr::tmp(0), 8)
        .instr(4)
        .put(PTR, Expr::add(Expr::tmp(1), Expr::imm_u64(STRIDE)))
        .instr(4)
        .wr_tmp(2, Expr::sub(Expr::tmp(0), Expr::imm_u64(1)))
        .put(COUNTER, Expr::tmp(2))
        .exit(Expr::eq(Expr::tmp(2), Expr::imm_u64(0)), DONE_PC)
        .build(Expr::imm_u64(BODY_PC), JumpKind::Fall);
    program.insert(BODY_PC, body);

    let done = BlockBuilder::<W>::new(DONE_PC)
        .instr(4)
        .put(EXIT_CODE, Expr::imm_u64(0))
        .instr(2)
        .store(Expr::imm_u64(0x0002_000a), Expr::get(EXIT_CODE, 8), 8)
        .build(Expr::imm_u64(HALT_PC), JumpKind::Ret);
    program.insert(DONE_PC, done);

    program
}

/// Dispatch loop: fetch, instrument (cached), execute, follow the
/// outcome, until the guest halts or the block budget runs out.
///
/// # Errors
/// [`Error::NoBlock`] on a jump outside the program,
/// [`Error::BlockBudget`] if the guest does not halt in time.
pub fn run_program<W: Word>(
    tool: &mut Tool<W>,
    program: &FxHashMap<u64, Block<W>>,
    entry: u64,
    max_blocks: u64,
) -> Result<i32> {
    let mut exec = Executor::new();
    let ctx = tool.ctx_ptr();
    let mut pc = entry;
    let mut executed: u64 = 0;

    while pc != HALT_PC {
        if executed >= max_blocks {
            return Err(Error::BlockBudget(executed));
        }
        let block = program.get(&pc).ok_or(Error::NoBlock(pc))?;
        let instrumented = tool.instrument(pc, block);
        let outcome = exec.run_block(&instrumented, ctx)?;
        pc = outcome.target();
        executed += 1;
    }

    Ok(exec.state_value(EXIT_CODE) as i32)
}
