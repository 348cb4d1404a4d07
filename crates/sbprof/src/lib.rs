//! sbprof - superblock instrumentation profiler.
//!
//! Rewrites basic blocks of an instruction-level IR, splicing in hook
//! calls that record instruction lengths, store-address page offsets and
//! per-exit store counts into a process-wide statistics store, reported
//! at termination.
//!
//! # Example
//!
//! ```
//! use sbprof::{Tool, Executor, BlockBuilder, Expr, W64};
//!
//! let block = BlockBuilder::<W64>::new(0x1000)
//!     .instr(4)
//!     .store(Expr::imm(0x8000), Expr::imm(1), 8)
//!     .build_fall();
//!
//! let mut tool = Tool::new();
//! let instrumented = tool.instrument(0x1000, &block);
//!
//! let mut exec = Executor::new();
//! exec.run_block(&instrumented, tool.ctx_ptr()).unwrap();
//! assert_eq!(tool.stats().store_total(), 1);
//! ```

// Re-export from sub-crates
pub use sbprof_ir::{
    BinaryOp, Block, BlockBuilder, Callee, CalleeResolver, Expr, FnEntryResolver, HookCall,
    HookFn, JumpKind, Stmt, UnaryOp, W32, W64, Word,
};
pub use sbprof_stats::{MAX_INSTR_LEN, PAGE_SIZE, StatsStore, write_report};

mod demo;
mod error;
mod exec;
mod instrument;
mod tool;

pub use demo::*;
pub use error::*;
pub use exec::*;
pub use instrument::*;
pub use tool::*;
