//! sbprof CLI - instruments and runs the synthetic guest workload.

mod cli;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use sbprof::{ENTRY_PC, Tool, W32, W64, Word, build_program, run_program};

use cli::{Cli, EXIT_FAILURE, WordSizeArg};

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        "sbprof=debug"
    } else if cli.silent {
        "sbprof=error"
    } else {
        "sbprof=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(default_level.parse().unwrap()),
        )
        .with_target(false)
        .init();

    let exit_code = match cli.word_size {
        WordSizeArg::W32 => run::<W32>(&cli),
        WordSizeArg::W64 => run::<W64>(&cli),
    };

    std::process::exit(exit_code);
}

fn run<W: Word>(cli: &Cli) -> i32 {
    let program = build_program::<W>(cli.iterations);
    let mut tool = Tool::<W>::new();

    let guest_code = match run_program(&mut tool, &program, ENTRY_PC, cli.max_blocks) {
        Ok(code) => code,
        Err(e) => {
            error!("guest execution failed: {e}");
            return EXIT_FAILURE;
        }
    };

    info!(
        blocks = tool.blocks_instrumented(),
        instrs = tool.stats().instr_total(),
        "guest finished"
    );

    let stdout = std::io::stdout();
    if let Err(e) = tool.finish(guest_code, &mut stdout.lock()) {
        error!("failed to write report: {e}");
        return EXIT_FAILURE;
    }

    guest_code
}
