//! CLI definitions and argument types.

use clap::{Parser, ValueEnum};

/// Exit code for failure.
pub const EXIT_FAILURE: i32 = 1;

#[derive(Parser)]
#[command(name = "sbprof")]
#[command(about = "Superblock instrumentation profiler - runs an instrumented guest workload")]
#[command(version)]
pub struct Cli {
    /// Loop iterations of the guest workload
    #[arg(short, long, default_value = "1000")]
    pub iterations: u64,

    /// Guest word size
    #[arg(long, value_enum, default_value = "w64")]
    pub word_size: WordSizeArg,

    /// Block-execution budget (abort a runaway guest)
    #[arg(long, default_value = "10000000")]
    pub max_blocks: u64,

    /// Enable verbose output (sets RUST_LOG=debug)
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress output (only show errors)
    #[arg(short, long, conflicts_with = "verbose")]
    pub silent: bool,
}

/// Guest word size argument.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum WordSizeArg {
    /// 32-bit guest
    W32,
    /// 64-bit guest
    W64,
}
